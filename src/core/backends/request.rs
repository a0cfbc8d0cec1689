use crate::core::data::extended_complex::ExtendedComplex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::viewport_state::ViewportState;
use crate::core::errors::configuration::ConfigurationError;
use crate::core::fractals::escape_time::grid::PixelGrid;
use crate::core::fractals::escape_time::params::EscapeTimeParams;

/// Immutable snapshot of everything one render needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    state: ViewportState,
    pixel_rect: PixelRect,
}

impl RenderRequest {
    pub fn new(state: ViewportState, width: u32, height: u32) -> Result<Self, ConfigurationError> {
        let pixel_rect = PixelRect::from_size(width, height)
            .map_err(|_| ConfigurationError::InvalidDimensions { width, height })?;

        Ok(Self { state, pixel_rect })
    }

    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    pub fn params(&self) -> Result<EscapeTimeParams, ConfigurationError> {
        EscapeTimeParams::from_state(&self.state)
    }

    #[must_use]
    pub fn grid(&self) -> PixelGrid {
        PixelGrid::new(&self.state.bounds(), self.pixel_rect)
    }
}

/// Answer to a point inspection: the probed coordinate and its final
/// iteration count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub coordinate: ExtendedComplex,
    pub iterations: u32,
}
