use crate::core::backends::kind::BackendKind;
use crate::core::colour_mapping::factory::gradient_factory;
use crate::core::colour_mapping::gradient::ColourGradient;
use crate::core::colour_mapping::kinds::GradientKind;
use crate::core::data::complex::Complex;
use crate::core::data::view_bounds::ViewBounds;
use crate::core::data::viewport_state::ViewportState;
use crate::core::errors::configuration::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

const DEFAULT_WIDTH: u32 = 100;
const DEFAULT_HEIGHT: u32 = 100;
const DEFAULT_ITERATION_BUDGET: u32 = 1000;
const DEFAULT_POWER: f64 = 6.0;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(ConfigurationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read configuration: {}", err),
            Self::Parse(err) => write!(f, "could not parse configuration: {}", err),
            Self::Invalid(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigurationError> for ConfigError {
    fn from(err: ConfigurationError) -> Self {
        Self::Invalid(err)
    }
}

/// Start-up settings for the explorer. Missing JSON fields take their
/// default. Speeds are fractions of the view span (or raw units for power
/// and seed) per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub width: u32,
    pub height: u32,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub iteration_budget: u32,
    pub power: f64,
    pub julia_mode: bool,
    pub julia_seed: (f64, f64),
    pub pan_speed: f64,
    pub zoom_speed: f64,
    pub power_speed: f64,
    pub seed_speed: f64,
    pub backend: BackendKind,
    /// Worker threads for the in-process accelerator; 0 lets rayon decide.
    pub accelerator_threads: usize,
    pub colour_stops: ColourGradient,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x_min: -2.1,
            x_max: 1.0,
            y_min: -1.3,
            y_max: 1.3,
            iteration_budget: DEFAULT_ITERATION_BUDGET,
            power: DEFAULT_POWER,
            julia_mode: false,
            julia_seed: (-0.516, 0.1023),
            pan_speed: 0.1,
            zoom_speed: 0.1,
            power_speed: 0.1,
            seed_speed: 0.01,
            backend: BackendKind::default(),
            accelerator_threads: 0,
            colour_stops: gradient_factory(GradientKind::default()),
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// An empty stop list is accepted here; renders are skipped until a
    /// gradient is set.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigurationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        self.default_bounds()?;

        let speeds = [
            ("pan speed", self.pan_speed),
            ("zoom speed", self.zoom_speed),
            ("power speed", self.power_speed),
            ("seed speed", self.seed_speed),
        ];
        if let Some((parameter, _)) = speeds.iter().find(|(_, speed)| !speed.is_finite()) {
            return Err(ConfigurationError::NonFinite { parameter: *parameter });
        }

        self.initial_state().map(|_| ())
    }

    pub fn default_bounds(&self) -> Result<ViewBounds, ConfigurationError> {
        Ok(ViewBounds::from_f64(self.x_min, self.x_max, self.y_min, self.y_max)?)
    }

    #[must_use]
    pub fn julia_seed(&self) -> Complex {
        Complex::new(self.julia_seed.0, self.julia_seed.1)
    }

    pub fn initial_state(&self) -> Result<ViewportState, ConfigurationError> {
        ViewportState::new(
            self.default_bounds()?,
            self.iteration_budget,
            self.power,
            self.julia_mode,
            self.julia_seed(),
        )
    }
}
