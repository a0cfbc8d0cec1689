use crate::core::backends::backend::ComputeBackend;
use crate::core::backends::device::AcceleratorDevice;
use crate::core::backends::errors::RenderError;
use crate::core::backends::kernel::{KernelOutput, build_launch};
use crate::core::backends::kind::BackendKind;
use crate::core::backends::request::{ProbeResult, RenderRequest};
use crate::core::data::device_layout::{KernelMode, Precision};
use crate::core::data::point::Point;
use std::sync::{Arc, Mutex};

/// Hands marshalled launches to an [`AcceleratorDevice`]. One launch is in
/// flight at a time.
pub struct ExternalAcceleratorBackend {
    device: Arc<dyn AcceleratorDevice>,
    dispatch: Mutex<()>,
}

impl ExternalAcceleratorBackend {
    /// Fails with [`RenderError::BackendUnavailable`] when no device was
    /// found.
    pub fn open(device: Option<Arc<dyn AcceleratorDevice>>) -> Result<Self, RenderError> {
        let device = device.ok_or_else(|| RenderError::BackendUnavailable {
            backend: BackendKind::ExternalAccelerator,
            reason: "no accelerator device found".to_string(),
        })?;

        log::info!("Opened accelerator device: {}", device.name());

        Ok(Self {
            device,
            dispatch: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn device_name(&self) -> &str {
        self.device.name()
    }

    fn dispatch(&self, request: &RenderRequest, mode: KernelMode, pixel: Point) -> Result<KernelOutput, RenderError> {
        request.params()?;

        let precision = Precision::for_view(&request.state().bounds(), request.width(), request.height());
        let launch = build_launch(request, precision, mode, pixel)?;

        let _guard = self.dispatch.lock().map_err(|_| RenderError::BackendUnavailable {
            backend: BackendKind::ExternalAccelerator,
            reason: "dispatch lock poisoned".to_string(),
        })?;

        log::debug!(
            "Dispatching {:?} launch {}x{} to {}",
            mode,
            request.width(),
            request.height(),
            self.device.name()
        );

        Ok(self.device.execute(launch.as_bytes())?)
    }
}

impl ComputeBackend for ExternalAcceleratorBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::ExternalAccelerator
    }

    fn compute_iterations(&self, request: &RenderRequest) -> Result<Vec<u32>, RenderError> {
        let output = self.dispatch(request, KernelMode::Render, Point::default())?;
        let expected = request.pixel_rect().size() as usize;

        if output.iterations.len() != expected {
            return Err(RenderError::Output(format!(
                "device returned {} counts for {} pixels",
                output.iterations.len(),
                expected
            )));
        }

        Ok(output.iterations)
    }

    fn probe(&self, request: &RenderRequest, pixel: Point) -> Result<ProbeResult, RenderError> {
        self.dispatch(request, KernelMode::Probe, pixel)?
            .probe_result()
            .ok_or_else(|| RenderError::Output("device returned no probe".to_string()))
    }
}
