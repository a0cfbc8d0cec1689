use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Scalar,
    DataParallel,
    ExternalAccelerator,
}

impl BackendKind {
    pub const ALL: &'static [Self] = &[Self::DataParallel, Self::Scalar, Self::ExternalAccelerator];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::DataParallel => "Data-parallel",
            Self::ExternalAccelerator => "External accelerator",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::DataParallel => "data-parallel",
            Self::ExternalAccelerator => "external-accelerator",
        }
    }

    /// Scalar renders block the caller; device backends complete on a later
    /// frame.
    #[must_use]
    pub const fn dispatch_mode(self) -> DispatchMode {
        match self {
            Self::Scalar => DispatchMode::Synchronous,
            Self::DataParallel | Self::ExternalAccelerator => DispatchMode::Asynchronous,
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::DataParallel
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown backend '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Synchronous,
    Asynchronous,
}
