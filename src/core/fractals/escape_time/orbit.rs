use crate::core::data::complex::Complex;
use crate::core::data::device_layout::Precision;
use crate::core::data::extended_complex::ExtendedComplex;
use crate::core::data::extended_scalar::ExtendedScalar;
use crate::core::fractals::escape_time::params::{BAILOUT_SQUARED, EscapeTimeParams};

/// Orbit of a single coordinate, `orbit[0]` being the starting value of `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitTrace {
    pub coordinate: ExtendedComplex,
    pub iterations: u32,
    pub escaped: bool,
    pub orbit: Vec<ExtendedComplex>,
}

/// Runs the escape-time loop for `c` and records every `z` it visits. The
/// iteration count matches what a render at the same precision produces.
#[must_use]
pub fn trace_orbit(c: ExtendedComplex, params: &EscapeTimeParams, precision: Precision) -> OrbitTrace {
    match precision {
        Precision::Native => trace_native(c, params),
        Precision::Extended => trace_extended(c, params),
    }
}

fn trace_native(coordinate: ExtendedComplex, params: &EscapeTimeParams) -> OrbitTrace {
    let c = coordinate.to_complex();
    let (mut z, k) = if params.julia_mode() {
        (c, params.julia_seed())
    } else {
        (Complex::ZERO, c)
    };

    let mut orbit = vec![ExtendedComplex::from_complex(z)];
    let mut iterations = 0;
    let mut escaped = false;

    while iterations < params.max_iterations() {
        let magnitude_squared = z.magnitude_squared();
        if magnitude_squared.is_nan() {
            iterations = params.max_iterations();
            break;
        }
        if magnitude_squared >= BAILOUT_SQUARED {
            escaped = true;
            break;
        }

        z = z.pow(params.power()) + k;
        orbit.push(ExtendedComplex::from_complex(z));
        iterations += 1;
    }

    OrbitTrace {
        coordinate,
        iterations,
        escaped,
        orbit,
    }
}

fn trace_extended(coordinate: ExtendedComplex, params: &EscapeTimeParams) -> OrbitTrace {
    let (mut z, k) = if params.julia_mode() {
        (coordinate, ExtendedComplex::from_complex(params.julia_seed()))
    } else {
        (ExtendedComplex::ZERO, coordinate)
    };

    let bailout = ExtendedScalar::from_f64(BAILOUT_SQUARED);
    let mut orbit = vec![z];
    let mut iterations = 0;
    let mut escaped = false;

    while iterations < params.max_iterations() {
        if !z.is_valid() {
            iterations = params.max_iterations();
            break;
        }
        if z.magnitude_squared() >= bailout {
            escaped = true;
            break;
        }

        z = z.pow(params.power()) + k;
        orbit.push(z);
        iterations += 1;
    }

    OrbitTrace {
        coordinate,
        iterations,
        escaped,
        orbit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fractals::escape_time::algorithm::escape_time;

    #[test]
    fn test_trace_records_every_step() {
        let params = EscapeTimeParams::mandelbrot(100).unwrap();
        let c = ExtendedComplex::from_complex(Complex::new(0.5, 0.0));

        let trace = trace_orbit(c, &params, Precision::Native);

        assert_eq!(trace.iterations, 5);
        assert!(trace.escaped);
        assert_eq!(trace.orbit.len(), 6);
        assert_eq!(trace.orbit[0], ExtendedComplex::ZERO);
        assert_eq!(trace.orbit[1].to_complex(), Complex::new(0.5, 0.0));
        assert_eq!(trace.orbit[2].to_complex(), Complex::new(0.75, 0.0));
    }

    #[test]
    fn test_bounded_point_runs_full_budget() {
        let params = EscapeTimeParams::mandelbrot(8).unwrap();

        let trace = trace_orbit(ExtendedComplex::ZERO, &params, Precision::Extended);

        assert_eq!(trace.iterations, 8);
        assert!(!trace.escaped);
        assert_eq!(trace.orbit.len(), 9);
    }

    #[test]
    fn test_trace_count_matches_kernel() {
        let params = EscapeTimeParams::new(300, 3.0, false, Complex::ZERO).unwrap();

        for c in [Complex::new(-0.2, 0.7), Complex::new(0.4, 0.4), Complex::new(1.5, 0.0)] {
            let trace = trace_orbit(ExtendedComplex::from_complex(c), &params, Precision::Native);
            assert_eq!(trace.iterations, escape_time(c, &params));
        }
    }

    #[test]
    fn test_julia_trace_starts_at_coordinate() {
        let params = EscapeTimeParams::new(10, 2.0, true, Complex::new(-0.516, 0.1023)).unwrap();
        let c = ExtendedComplex::from_complex(Complex::new(0.25, -0.5));

        let trace = trace_orbit(c, &params, Precision::Extended);

        assert_eq!(trace.orbit[0], c);
        assert_eq!(trace.coordinate, c);
    }
}
