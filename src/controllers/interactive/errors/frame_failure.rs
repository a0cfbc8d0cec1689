use crate::core::backends::errors::RenderError;
use std::error::Error;
use std::fmt;

/// A render that finished with an error instead of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameFailure {
    pub generation: u64,
    pub error: RenderError,
}

impl fmt::Display for FrameFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render {} failed: {}", self.generation, self.error)
    }
}

impl Error for FrameFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
