use crate::core::data::complex::Complex;
use crate::core::data::viewport_state::ViewportState;
use crate::core::errors::configuration::ConfigurationError;

/// Squared escape radius.
pub const BAILOUT_SQUARED: f64 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EscapeTimeParams {
    max_iterations: u32,
    power: f64,
    julia_mode: bool,
    julia_seed: Complex,
}

impl EscapeTimeParams {
    pub fn new(
        max_iterations: u32,
        power: f64,
        julia_mode: bool,
        julia_seed: Complex,
    ) -> Result<Self, ConfigurationError> {
        if max_iterations == 0 {
            return Err(ConfigurationError::ZeroIterationBudget);
        }
        if !power.is_finite() {
            return Err(ConfigurationError::NonFinite { parameter: "power" });
        }
        if !julia_seed.is_finite() {
            return Err(ConfigurationError::NonFinite {
                parameter: "julia seed",
            });
        }

        Ok(Self {
            max_iterations,
            power,
            julia_mode,
            julia_seed,
        })
    }

    /// Classic quadratic Mandelbrot parameters.
    pub fn mandelbrot(max_iterations: u32) -> Result<Self, ConfigurationError> {
        Self::new(max_iterations, 2.0, false, Complex::ZERO)
    }

    pub fn from_state(state: &ViewportState) -> Result<Self, ConfigurationError> {
        Self::new(
            state.iteration_budget(),
            state.power(),
            state.julia_mode(),
            state.julia_seed(),
        )
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn power(&self) -> f64 {
        self.power
    }

    #[must_use]
    pub fn julia_mode(&self) -> bool {
        self.julia_mode
    }

    #[must_use]
    pub fn julia_seed(&self) -> Complex {
        self.julia_seed
    }
}
