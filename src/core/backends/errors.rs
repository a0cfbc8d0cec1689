use crate::core::backends::kind::BackendKind;
use crate::core::errors::configuration::ConfigurationError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    UnsupportedLayout { version: u32 },
    MalformedLaunch { expected: usize, actual: usize },
    UnknownWord { field: &'static str, value: u32 },
    InvalidLaunch(String),
    Execution(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLayout { version } => {
                write!(f, "unsupported transfer layout version {}", version)
            }
            Self::MalformedLaunch { expected, actual } => {
                write!(f, "launch record must be {} bytes, got {}", expected, actual)
            }
            Self::UnknownWord { field, value } => write!(f, "unknown {} word {}", field, value),
            Self::InvalidLaunch(reason) => write!(f, "invalid launch: {}", reason),
            Self::Execution(reason) => write!(f, "device execution failed: {}", reason),
        }
    }
}

impl Error for DeviceError {}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Configuration(ConfigurationError),
    EmptyGradient,
    BackendUnavailable { backend: BackendKind, reason: String },
    Device(DeviceError),
    Output(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "configuration error: {}", err),
            Self::EmptyGradient => write!(f, "no gradient configured"),
            Self::BackendUnavailable { backend, reason } => {
                write!(f, "{} backend unavailable: {}", backend, reason)
            }
            Self::Device(err) => write!(f, "device error: {}", err),
            Self::Output(reason) => write!(f, "could not build pixel buffer: {}", reason),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Device(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for RenderError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<DeviceError> for RenderError {
    fn from(err: DeviceError) -> Self {
        Self::Device(err)
    }
}
