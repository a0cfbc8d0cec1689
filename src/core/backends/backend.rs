use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer;
use crate::core::backends::errors::RenderError;
use crate::core::backends::kind::{BackendKind, DispatchMode};
use crate::core::backends::request::{ProbeResult, RenderRequest};
use crate::core::colour_mapping::escape_fraction::EscapeFractionColourMap;
use crate::core::colour_mapping::gradient::ColourGradient;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;

/// A compute device able to run the escape-time kernel over a request.
///
/// Implementations differ in precision and parallelism only; for the same
/// request every backend reports the same iteration counts at native
/// precision.
pub trait ComputeBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn dispatch_mode(&self) -> DispatchMode {
        self.kind().dispatch_mode()
    }

    /// Iteration count per pixel, row-major.
    fn compute_iterations(&self, request: &RenderRequest) -> Result<Vec<u32>, RenderError>;

    /// Coordinate and iteration count of one pixel without a full render.
    fn probe(&self, request: &RenderRequest, pixel: Point) -> Result<ProbeResult, RenderError>;

    /// Full frame: validates the request, refuses an empty gradient before
    /// computing anything, then colours the counts.
    fn render(&self, request: &RenderRequest, gradient: &ColourGradient) -> Result<PixelBuffer, RenderError> {
        let params = request.params()?;

        if gradient.is_empty() {
            return Err(RenderError::EmptyGradient);
        }

        let iterations = self.compute_iterations(request)?;
        let colour_map = EscapeFractionColourMap::new(gradient, params.max_iterations());

        generate_pixel_buffer(iterations, &colour_map, request.pixel_rect())
            .map_err(|err| RenderError::Output(err.to_string()))
    }
}
