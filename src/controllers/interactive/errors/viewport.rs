use crate::core::backends::errors::RenderError;
use crate::core::data::point::Point;
use crate::core::data::view_bounds::ViewBoundsError;
use crate::core::errors::configuration::ConfigurationError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewportError {
    DegenerateBounds(ViewBoundsError),
    Configuration(ConfigurationError),
    NotRendered,
    PixelOutsideView { pixel: Point, width: u32, height: u32 },
    Render(RenderError),
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateBounds(err) => write!(f, "transition rejected: {}", err),
            Self::Configuration(err) => write!(f, "transition rejected: {}", err),
            Self::NotRendered => write!(f, "nothing has been rendered yet"),
            Self::PixelOutsideView {
                pixel,
                width,
                height,
            } => write!(
                f,
                "pixel ({}, {}) is outside the {}x{} view",
                pixel.x, pixel.y, width, height
            ),
            Self::Render(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ViewportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DegenerateBounds(err) => Some(err),
            Self::Configuration(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewBoundsError> for ViewportError {
    fn from(err: ViewBoundsError) -> Self {
        Self::DegenerateBounds(err)
    }
}

impl From<ConfigurationError> for ViewportError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<RenderError> for ViewportError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}
