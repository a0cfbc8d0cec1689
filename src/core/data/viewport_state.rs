use crate::core::data::complex::Complex;
use crate::core::data::view_bounds::{ViewBounds, ViewBoundsError};
use crate::core::errors::configuration::ConfigurationError;

/// Everything a render needs to know about the current view. The controller
/// owns the single mutable copy and hands clones to backends.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    bounds: ViewBounds,
    iteration_budget: u32,
    zoom_level: i32,
    power: f64,
    julia_mode: bool,
    julia_seed: Complex,
}

impl ViewportState {
    pub fn new(
        bounds: ViewBounds,
        iteration_budget: u32,
        power: f64,
        julia_mode: bool,
        julia_seed: Complex,
    ) -> Result<Self, ConfigurationError> {
        if iteration_budget == 0 {
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
            bounds,
            iteration_budget,
            zoom_level: 0,
            power,
            julia_mode,
            julia_seed,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    #[must_use]
    pub fn iteration_budget(&self) -> u32 {
        self.iteration_budget
    }

    #[must_use]
    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
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

    /// Shifts the view by `dx`/`dy` spans. Deltas are taken from the span
    /// before the move so opposite edges stay the same distance apart.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<(), ViewBoundsError> {
        self.bounds = self.bounds.translated(dx, dy)?;
        Ok(())
    }

    /// Zooms in by `amount` spans per edge when `toward_center` is set,
    /// otherwise zooms out by the same amount. The state is left untouched
    /// when the result would be degenerate.
    pub fn zoom(&mut self, amount: f64, toward_center: bool) -> Result<(), ViewBoundsError> {
        if toward_center {
            self.bounds = self.bounds.shrunk(amount)?;
            self.zoom_level = self.zoom_level.saturating_add(1);
        } else {
            self.bounds = self.bounds.shrunk(-amount)?;
            self.zoom_level = self.zoom_level.saturating_sub(1);
        }

        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = bounds;
    }

    /// Back to `bounds` and `iteration_budget` at zoom level zero. Power and
    /// Julia settings are kept.
    pub fn reset_view(&mut self, bounds: ViewBounds, iteration_budget: u32) -> Result<(), ConfigurationError> {
        self.set_iteration_budget(iteration_budget)?;
        self.bounds = bounds;
        self.zoom_level = 0;
        Ok(())
    }

    pub fn grow_iteration_budget(&mut self) {
        self.iteration_budget = self.iteration_budget.saturating_add(1);
    }

    pub fn set_iteration_budget(&mut self, iteration_budget: u32) -> Result<(), ConfigurationError> {
        if iteration_budget == 0 {
            return Err(ConfigurationError::ZeroIterationBudget);
        }

        self.iteration_budget = iteration_budget;
        Ok(())
    }

    pub fn adjust_power(&mut self, delta: f64) -> Result<(), ConfigurationError> {
        let power = self.power + delta;
        if !power.is_finite() {
            return Err(ConfigurationError::NonFinite { parameter: "power" });
        }

        self.power = power;
        Ok(())
    }

    pub fn nudge_julia_seed(&mut self, delta: Complex) -> Result<(), ConfigurationError> {
        let seed = self.julia_seed + delta;
        if !seed.is_finite() {
            return Err(ConfigurationError::NonFinite {
                parameter: "julia seed",
            });
        }

        self.julia_seed = seed;
        Ok(())
    }

    pub fn toggle_julia_mode(&mut self) {
        self.julia_mode = !self.julia_mode;
    }
}
