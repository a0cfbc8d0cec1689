//! Frame-driven viewport controller.
//!
//! The controller owns the viewport state, applies queued transitions once
//! per tick and hands finished frames to a [`PresenterPort`]. Asynchronous
//! backends run on an [`AsyncRenderWorker`] whose completions are picked up
//! on a later tick.

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
pub mod scheduler;
pub mod transitions;
pub mod worker;

pub use controller::{FrameOutcome, RenderDispatch, TickReport, ViewportController};
pub use events::render_event::RenderEvent;
pub use ports::presenter_port::PresenterPort;
pub use transitions::ViewTransition;
pub use worker::AsyncRenderWorker;
