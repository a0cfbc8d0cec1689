//! Device-side escape-time kernel and the host code that marshals a
//! [`RenderRequest`] into its launch record.
//!
//! Every device backend goes through this pair, so the kernel only ever sees
//! what survived the transfer layout.

use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::backends::errors::{DeviceError, RenderError};
use crate::core::backends::request::{ProbeResult, RenderRequest};
use crate::core::data::device_layout::{
    DeviceProbe, DeviceScalar, KernelLaunch, KernelMode, LAYOUT_VERSION, Precision, split_f64,
};
use crate::core::data::extended_complex::ExtendedComplex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::view_bounds::ViewBounds;
use crate::core::fractals::escape_time::algorithm::EscapeTimeAlgorithm;
use crate::core::fractals::escape_time::grid::{GridError, PixelGrid};
use crate::core::fractals::escape_time::params::EscapeTimeParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelOutput {
    pub iterations: Vec<u32>,
    pub probe: Option<DeviceProbe>,
}

impl KernelOutput {
    #[must_use]
    pub fn probe_result(&self) -> Option<ProbeResult> {
        self.probe.map(|probe| ProbeResult {
            coordinate: ExtendedComplex::new(probe.x.to_extended(), probe.y.to_extended()),
            iterations: probe.iterations,
        })
    }
}

/// Marshals `request` for a device. Bounds travel as mantissa/exponent
/// records, everything else as plain or split words. `probe` must lie inside
/// the request's pixel rect.
pub fn build_launch(
    request: &RenderRequest,
    precision: Precision,
    mode: KernelMode,
    probe: Point,
) -> Result<KernelLaunch, RenderError> {
    let pixel_rect = request.pixel_rect();
    let outside = || RenderError::Output(GridError::PixelOutside { pixel: probe, pixel_rect }.to_string());
    if !pixel_rect.contains_point(probe) {
        return Err(outside());
    }
    let probe_x = u32::try_from(probe.x).map_err(|_| outside())?;
    let probe_y = u32::try_from(probe.y).map_err(|_| outside())?;

    let state = request.state();
    let bounds = state.bounds();
    let (power_low, power_high) = split_f64(state.power());
    let (seed_real_low, seed_real_high) = split_f64(state.julia_seed().real);
    let (seed_imag_low, seed_imag_high) = split_f64(state.julia_seed().imag);

    Ok(KernelLaunch {
        layout_version: LAYOUT_VERSION,
        width: request.width(),
        height: request.height(),
        max_iterations: state.iteration_budget(),
        x_min: DeviceScalar::from_extended(bounds.x_min()),
        x_max: DeviceScalar::from_extended(bounds.x_max()),
        y_min: DeviceScalar::from_extended(bounds.y_min()),
        y_max: DeviceScalar::from_extended(bounds.y_max()),
        power_low,
        power_high,
        seed_real_low,
        seed_real_high,
        seed_imag_low,
        seed_imag_high,
        julia_mode: u32::from(state.julia_mode()),
        precision: precision.to_word(),
        mode: mode.to_word(),
        probe_x,
        probe_y,
    })
}

struct DecodedLaunch {
    algorithm: EscapeTimeAlgorithm,
    mode: KernelMode,
    probe: Point,
}

fn decode(launch: &KernelLaunch) -> Result<DecodedLaunch, DeviceError> {
    if launch.layout_version != LAYOUT_VERSION {
        return Err(DeviceError::UnsupportedLayout {
            version: launch.layout_version,
        });
    }

    let precision = Precision::from_word(launch.precision).ok_or(DeviceError::UnknownWord {
        field: "precision",
        value: launch.precision,
    })?;
    let mode = KernelMode::from_word(launch.mode).ok_or(DeviceError::UnknownWord {
        field: "mode",
        value: launch.mode,
    })?;

    let pixel_rect = PixelRect::from_size(launch.width, launch.height)
        .map_err(|err| DeviceError::InvalidLaunch(err.to_string()))?;
    let bounds = ViewBounds::new(
        launch.x_min.to_extended(),
        launch.x_max.to_extended(),
        launch.y_min.to_extended(),
        launch.y_max.to_extended(),
    )
    .map_err(|err| DeviceError::InvalidLaunch(err.to_string()))?;
    let params = EscapeTimeParams::new(
        launch.max_iterations,
        launch.power(),
        launch.julia_mode != 0,
        launch.julia_seed(),
    )
    .map_err(|err| DeviceError::InvalidLaunch(err.to_string()))?;

    let probe = Point {
        x: i32::try_from(launch.probe_x).unwrap_or(i32::MAX),
        y: i32::try_from(launch.probe_y).unwrap_or(i32::MAX),
    };

    Ok(DecodedLaunch {
        algorithm: EscapeTimeAlgorithm::new(PixelGrid::new(&bounds, pixel_rect), params, precision),
        mode,
        probe,
    })
}

/// Runs one launch on the current rayon pool.
pub fn run_kernel(launch: &KernelLaunch) -> Result<KernelOutput, DeviceError> {
    let decoded = decode(launch)?;
    let algorithm = &decoded.algorithm;

    match decoded.mode {
        KernelMode::Render => {
            let iterations = generate_fractal_parallel_rayon(algorithm.grid().pixel_rect(), algorithm)
                .map_err(|err| DeviceError::Execution(err.to_string()))?;

            Ok(KernelOutput {
                iterations,
                probe: None,
            })
        }
        KernelMode::Probe => {
            let coordinate = algorithm
                .grid()
                .extended_coordinate(decoded.probe)
                .map_err(|err| DeviceError::InvalidLaunch(err.to_string()))?;
            let iterations = algorithm
                .compute(decoded.probe)
                .map_err(|err| DeviceError::InvalidLaunch(err.to_string()))?;

            Ok(KernelOutput {
                iterations: Vec::new(),
                probe: Some(DeviceProbe {
                    x: DeviceScalar::from_extended(coordinate.real),
                    y: DeviceScalar::from_extended(coordinate.imag),
                    iterations,
                }),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use crate::core::data::viewport_state::ViewportState;

    fn request(width: u32, height: u32) -> RenderRequest {
        let bounds = ViewBounds::from_f64(-2.1, 1.0, -1.3, 1.3).unwrap();
        let state = ViewportState::new(bounds, 40, 6.0, true, Complex::new(-0.516, 0.1023)).unwrap();
        RenderRequest::new(state, width, height).unwrap()
    }

    #[test]
    fn test_launch_carries_request() {
        let launch = build_launch(&request(16, 9), Precision::Native, KernelMode::Render, Point::default()).unwrap();

        assert_eq!(launch.layout_version, LAYOUT_VERSION);
        assert_eq!((launch.width, launch.height, launch.max_iterations), (16, 9, 40));
        assert_eq!(launch.power(), 6.0);
        assert_eq!(launch.julia_seed(), Complex::new(-0.516, 0.1023));
        assert_eq!(launch.julia_mode, 1);
    }

    #[test]
    fn test_render_launch_returns_one_count_per_pixel() {
        let launch = build_launch(&request(16, 9), Precision::Native, KernelMode::Render, Point::default()).unwrap();

        let output = run_kernel(&launch).unwrap();

        assert_eq!(output.iterations.len(), 144);
        assert!(output.iterations.iter().all(|&count| count <= 40));
        assert_eq!(output.probe, None);
    }

    #[test]
    fn test_unknown_layout_version_is_rejected() {
        let mut launch = build_launch(&request(4, 4), Precision::Native, KernelMode::Render, Point::default()).unwrap();
        launch.layout_version = 2;

        assert_eq!(run_kernel(&launch), Err(DeviceError::UnsupportedLayout { version: 2 }));
    }

    #[test]
    fn test_unknown_precision_is_rejected() {
        let mut launch = build_launch(&request(4, 4), Precision::Native, KernelMode::Render, Point::default()).unwrap();
        launch.precision = 9;

        assert_eq!(
            run_kernel(&launch),
            Err(DeviceError::UnknownWord {
                field: "precision",
                value: 9
            })
        );
    }

    #[test]
    fn test_probe_matches_rendered_pixel() {
        let request = request(16, 9);
        let pixel = Point { x: 5, y: 4 };

        let frame = run_kernel(&build_launch(&request, Precision::Native, KernelMode::Render, Point::default()).unwrap()).unwrap();
        let probe = run_kernel(&build_launch(&request, Precision::Native, KernelMode::Probe, pixel).unwrap())
            .unwrap()
            .probe_result()
            .unwrap();

        assert!(frame.iterations.len() == 144);
        assert_eq!(probe.iterations, frame.iterations[4 * 16 + 5]);
        assert_eq!(probe.coordinate, request.grid().extended_coordinate(pixel).unwrap());
    }

    #[test]
    fn test_probe_outside_view_is_rejected_when_building() {
        for pixel in [Point { x: 9, y: 0 }, Point { x: -3, y: 0 }, Point { x: 0, y: -1 }] {
            let result = build_launch(&request(4, 4), Precision::Native, KernelMode::Probe, pixel);

            assert!(matches!(result, Err(RenderError::Output(_))), "{:?} was accepted", pixel);
        }
    }

    #[test]
    fn test_probe_outside_view_is_rejected_by_device() {
        let mut launch = build_launch(&request(4, 4), Precision::Native, KernelMode::Probe, Point::default()).unwrap();
        launch.probe_x = 9;

        assert!(matches!(run_kernel(&launch), Err(DeviceError::InvalidLaunch(_))));
    }
}
