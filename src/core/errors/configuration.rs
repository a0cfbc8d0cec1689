use crate::core::data::view_bounds::ViewBoundsError;
use std::error::Error;
use std::fmt;

/// Request parameters that are rejected before any computation starts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConfigurationError {
    ZeroIterationBudget,
    InvalidDimensions { width: u32, height: u32 },
    InvalidBounds(ViewBoundsError),
    NonFinite { parameter: &'static str },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIterationBudget => write!(f, "iteration budget must be at least 1"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "image dimensions must be positive: {}x{}", width, height)
            }
            Self::InvalidBounds(err) => write!(f, "invalid view bounds: {}", err),
            Self::NonFinite { parameter } => write!(f, "{} must be finite", parameter),
        }
    }
}

impl Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBounds(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewBoundsError> for ConfigurationError {
    fn from(err: ViewBoundsError) -> Self {
        Self::InvalidBounds(err)
    }
}
