use crate::core::data::view_bounds::ViewBounds;

/// Discrete input events, applied in arrival order on the next tick.
///
/// Directions are unit-less (usually -1, 0 or 1) and get scaled by the
/// elapsed time and the configured speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewTransition {
    Pan { dx: f64, dy: f64 },
    Zoom { toward_center: bool },
    ChangePower { direction: f64 },
    NudgeJuliaSeed { dx: f64, dy: f64 },
    ToggleJulia,
    Resize { width: u32, height: u32 },
    SetBounds(ViewBounds),
    /// Re-render the current view; `capture` marks the resulting frame for
    /// export.
    Rerender { capture: bool },
    Reset,
}

impl ViewTransition {
    /// Whether applying this transition invalidates frames already in flight.
    #[must_use]
    pub fn changes_view(&self) -> bool {
        !matches!(self, Self::Rerender { .. })
    }
}
