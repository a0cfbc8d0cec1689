use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::backends::backend::ComputeBackend;
use crate::core::backends::errors::RenderError;
use crate::core::backends::kind::BackendKind;
use crate::core::backends::request::{ProbeResult, RenderRequest};
use crate::core::data::device_layout::Precision;
use crate::core::data::point::Point;
use crate::core::fractals::escape_time::algorithm::EscapeTimeAlgorithm;

/// Reference backend: every pixel in native `f64` on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarBackend;

impl ScalarBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn algorithm(request: &RenderRequest) -> Result<EscapeTimeAlgorithm, RenderError> {
        Ok(EscapeTimeAlgorithm::new(
            request.grid(),
            request.params()?,
            Precision::Native,
        ))
    }
}

impl ComputeBackend for ScalarBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Scalar
    }

    fn compute_iterations(&self, request: &RenderRequest) -> Result<Vec<u32>, RenderError> {
        let algorithm = Self::algorithm(request)?;

        log::debug!(
            "Scalar render {}x{} at {} iterations",
            request.width(),
            request.height(),
            request.state().iteration_budget()
        );

        generate_fractal_serial(request.pixel_rect(), &algorithm)
            .map_err(|err| RenderError::Output(err.to_string()))
    }

    fn probe(&self, request: &RenderRequest, pixel: Point) -> Result<ProbeResult, RenderError> {
        let algorithm = Self::algorithm(request)?;
        let coordinate = algorithm
            .grid()
            .extended_coordinate(pixel)
            .map_err(|err| RenderError::Output(err.to_string()))?;
        let iterations = algorithm
            .compute(pixel)
            .map_err(|err| RenderError::Output(err.to_string()))?;

        Ok(ProbeResult {
            coordinate,
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour_mapping::gradient::ColourGradient;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::data::view_bounds::ViewBounds;
    use crate::core::data::viewport_state::ViewportState;

    fn request(width: u32, height: u32, budget: u32) -> RenderRequest {
        let bounds = ViewBounds::from_f64(-2.0, 2.0, -2.0, 2.0).unwrap();
        let state = ViewportState::new(bounds, budget, 2.0, false, Complex::ZERO).unwrap();
        RenderRequest::new(state, width, height).unwrap()
    }

    #[test]
    fn test_counts_are_row_major_and_bounded() {
        let counts = ScalarBackend::new().compute_iterations(&request(4, 4, 20)).unwrap();

        assert_eq!(counts.len(), 16);
        assert!(counts.iter().all(|&count| count <= 20));
        // pixel (0, 0) is -2-2i, which escapes on the first step
        assert_eq!(counts[0], 1);
        // pixel (2, 2) is the origin
        assert_eq!(counts[2 * 4 + 2], 20);
    }

    #[test]
    fn test_probe_reports_coordinate_and_count() {
        let probe = ScalarBackend::new()
            .probe(&request(4, 4, 20), Point { x: 2, y: 2 })
            .unwrap();

        assert_eq!(probe.coordinate.to_complex(), Complex::ZERO);
        assert_eq!(probe.iterations, 20);
    }

    #[test]
    fn test_probe_outside_view_fails() {
        let result = ScalarBackend::new().probe(&request(4, 4, 20), Point { x: 4, y: 0 });

        assert!(matches!(result, Err(RenderError::Output(_))));
    }

    #[test]
    fn test_render_refuses_empty_gradient() {
        let result = ScalarBackend::new().render(&request(4, 4, 20), &ColourGradient::new(Vec::new()));

        assert_eq!(result, Err(RenderError::EmptyGradient));
    }

    #[test]
    fn test_render_colours_bounded_pixels_with_first_stop() {
        let gradient = ColourGradient::new(vec![Colour::new(0, 0, 0), Colour::new(255, 255, 255)]);

        let buffer = ScalarBackend::new().render(&request(4, 4, 20), &gradient).unwrap();

        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.colour_at(Point { x: 2, y: 2 }), Ok(Colour::new(0, 0, 0)));
        assert_eq!(buffer.colour_at(Point { x: 0, y: 0 }), Ok(Colour::new(255, 255, 255)));
    }
}
