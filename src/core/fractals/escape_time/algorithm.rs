use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::device_layout::Precision;
use crate::core::data::extended_complex::ExtendedComplex;
use crate::core::data::extended_scalar::ExtendedScalar;
use crate::core::data::point::Point;
use crate::core::fractals::escape_time::errors::NumericInvalid;
use crate::core::fractals::escape_time::grid::{GridError, PixelGrid};
use crate::core::fractals::escape_time::params::{BAILOUT_SQUARED, EscapeTimeParams};

/// Escape-time count for `c` in native precision.
///
/// A non-finite orbit never escapes and returns the full budget.
#[must_use]
pub fn escape_time(c: Complex, params: &EscapeTimeParams) -> u32 {
    let (mut z, k) = if params.julia_mode() {
        (c, params.julia_seed())
    } else {
        (Complex::ZERO, c)
    };

    let max_iterations = params.max_iterations();
    let mut i = 0;

    while i < max_iterations {
        let magnitude_squared = z.magnitude_squared();
        if magnitude_squared.is_nan() {
            return max_iterations;
        }
        if magnitude_squared >= BAILOUT_SQUARED {
            break;
        }

        z = z.pow(params.power()) + k;
        i += 1;
    }

    i
}

/// Escape-time count for `c` with every intermediate held as
/// [`ExtendedComplex`].
pub fn escape_time_extended(c: ExtendedComplex, params: &EscapeTimeParams) -> Result<u32, NumericInvalid> {
    let (mut z, k) = if params.julia_mode() {
        (c, ExtendedComplex::from_complex(params.julia_seed()))
    } else {
        (ExtendedComplex::ZERO, c)
    };

    let bailout = ExtendedScalar::from_f64(BAILOUT_SQUARED);
    let max_iterations = params.max_iterations();
    let mut i = 0;

    while i < max_iterations {
        if !z.is_valid() {
            return Err(NumericInvalid { iteration: i });
        }
        if z.magnitude_squared() >= bailout {
            break;
        }

        z = z.pow(params.power()) + k;
        i += 1;
    }

    Ok(i)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EscapeTimeAlgorithm {
    grid: PixelGrid,
    params: EscapeTimeParams,
    precision: Precision,
}

impl EscapeTimeAlgorithm {
    #[must_use]
    pub fn new(grid: PixelGrid, params: EscapeTimeParams, precision: Precision) -> Self {
        Self {
            grid,
            params,
            precision,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    #[must_use]
    pub fn params(&self) -> &EscapeTimeParams {
        &self.params
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }
}

impl FractalAlgorithm for EscapeTimeAlgorithm {
    type Success = u32;
    type Failure = GridError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        match self.precision {
            Precision::Native => Ok(escape_time(self.grid.coordinate(pixel)?, &self.params)),
            Precision::Extended => {
                let c = self.grid.extended_coordinate(pixel)?;
                Ok(escape_time_extended(c, &self.params).unwrap_or(self.params.max_iterations()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
    use crate::core::data::pixel_rect::PixelRect;
    use crate::core::data::view_bounds::ViewBounds;

    fn mandelbrot(max_iterations: u32) -> EscapeTimeParams {
        EscapeTimeParams::mandelbrot(max_iterations).unwrap()
    }

    #[test]
    fn test_origin_never_escapes() {
        for budget in [1, 2, 17, 1000] {
            assert_eq!(escape_time(Complex::ZERO, &mandelbrot(budget)), budget);
            assert_eq!(
                escape_time_extended(ExtendedComplex::ZERO, &mandelbrot(budget)),
                Ok(budget)
            );
        }
    }

    #[test]
    fn test_three_escapes_after_one_iteration() {
        // z1 = 0² + 3 = 3, |z1|² = 9
        let c = Complex::new(3.0, 0.0);

        assert_eq!(escape_time(c, &mandelbrot(100)), 1);
        assert_eq!(
            escape_time_extended(ExtendedComplex::from_complex(c), &mandelbrot(100)),
            Ok(1)
        );
    }

    #[test]
    fn test_point_on_bailout_radius_counts_as_escaped() {
        // z1 = 2, |z1|² = 4 is not < 4
        assert_eq!(escape_time(Complex::new(2.0, 0.0), &mandelbrot(100)), 1);
    }

    #[test]
    fn test_known_escape_counts() {
        // -1 cycles between -1 and 0; 0.5 escapes on the fifth step
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), &mandelbrot(50)), 50);
        assert_eq!(escape_time(Complex::new(0.5, 0.0), &mandelbrot(50)), 5);
    }

    #[test]
    fn test_julia_mode_starts_from_pixel_and_adds_seed() {
        let params = EscapeTimeParams::new(20, 2.0, true, Complex::new(3.0, 0.0)).unwrap();

        // z0 = 0 is inside the radius, z1 = 0² + 3 escapes
        assert_eq!(escape_time(Complex::ZERO, &params), 1);
        // z0 = 2.5 is already outside
        assert_eq!(escape_time(Complex::new(2.5, 0.0), &params), 0);
    }

    #[test]
    fn test_general_power_matches_between_precisions() {
        let params = EscapeTimeParams::new(200, 6.0, false, Complex::ZERO).unwrap();

        for c in [
            Complex::new(0.6, 0.2),
            Complex::new(-0.8, 0.1),
            Complex::new(0.1, 0.05),
            Complex::new(1.1, -0.3),
        ] {
            assert_eq!(
                Ok(escape_time(c, &params)),
                escape_time_extended(ExtendedComplex::from_complex(c), &params),
                "mismatch at {}",
                c
            );
        }
    }

    #[test]
    fn test_invalid_extended_orbit_is_reported() {
        let bad = ExtendedComplex {
            real: ExtendedScalar::INVALID,
            imag: ExtendedScalar::ZERO,
        };
        let params = EscapeTimeParams::new(10, 2.0, true, Complex::ZERO).unwrap();

        assert_eq!(escape_time_extended(bad, &params), Err(NumericInvalid { iteration: 0 }));
    }

    #[test]
    fn test_nan_orbit_never_escapes() {
        assert_eq!(escape_time(Complex::new(f64::NAN, 0.0), &mandelbrot(30)), 30);
    }

    #[test]
    fn test_algorithm_maps_invalid_pixels_to_budget() {
        let params = EscapeTimeParams::new(12, -1.0, false, Complex::ZERO).unwrap();
        let bounds = ViewBounds::from_f64(-1.0, 1.0, -1.0, 1.0).unwrap();
        let grid = PixelGrid::new(&bounds, PixelRect::from_size(2, 2).unwrap());
        let algorithm = EscapeTimeAlgorithm::new(grid, params, Precision::Extended);

        // z0 = 0 raised to a negative power is invalid for every pixel
        let counts = generate_fractal_serial(grid.pixel_rect(), &algorithm).unwrap();

        assert_eq!(counts, vec![12; 4]);
    }

    #[test]
    fn test_algorithm_precisions_agree_on_shallow_view() {
        let params = EscapeTimeParams::mandelbrot(64).unwrap();
        let bounds = ViewBounds::from_f64(-2.1, 1.0, -1.3, 1.3).unwrap();
        let grid = PixelGrid::new(&bounds, PixelRect::from_size(24, 16).unwrap());

        let native = EscapeTimeAlgorithm::new(grid, params, Precision::Native);
        let extended = EscapeTimeAlgorithm::new(grid, params, Precision::Extended);

        let native_counts = generate_fractal_serial(grid.pixel_rect(), &native).unwrap();
        let extended_counts = generate_fractal_serial(grid.pixel_rect(), &extended).unwrap();

        let mismatches = native_counts
            .iter()
            .zip(&extended_counts)
            .filter(|(a, b)| a != b)
            .count();

        // rounding can flip a pixel that sits right on the boundary
        assert!(mismatches <= 2, "{} pixels differ", mismatches);
    }
}
