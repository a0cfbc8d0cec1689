use crate::controllers::interactive::events::render_event::RenderEvent;

/// Receives every accepted frame by value, and render failures for the
/// current view.
pub trait PresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
