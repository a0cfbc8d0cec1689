use std::error::Error;
use std::fmt;

/// An extended-precision value left the valid range mid-iteration. Never
/// surfaced: the pixel is treated as bounded instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NumericInvalid {
    pub iteration: u32,
}

impl fmt::Display for NumericInvalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "orbit became invalid at iteration {}", self.iteration)
    }
}

impl Error for NumericInvalid {}
