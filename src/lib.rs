pub mod controllers;
pub mod core;
pub mod presenters;
pub mod storage;

pub use controllers::interactive::{
    FrameOutcome, PresenterPort, RenderDispatch, RenderEvent, TickReport, ViewTransition,
    ViewportController,
};
pub use core::backends::backend::ComputeBackend;
pub use core::backends::factory::create_backend;
pub use core::backends::host_device::HostAcceleratorDevice;
pub use core::backends::kind::BackendKind;
pub use core::backends::request::RenderRequest;
pub use core::config::explorer_config::ExplorerConfig;
pub use presenters::file::ppm::PpmCapturePresenter;
