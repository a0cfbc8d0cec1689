use crate::core::backends::backend::ComputeBackend;
use crate::core::backends::errors::RenderError;
use crate::core::backends::kernel::{build_launch, run_kernel};
use crate::core::backends::kind::BackendKind;
use crate::core::backends::request::{ProbeResult, RenderRequest};
use crate::core::data::device_layout::{KernelMode, Precision};
use crate::core::data::point::Point;

/// Runs the kernel across the global rayon pool, switching to extended
/// precision once the view outgrows `f64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataParallelBackend;

impl DataParallelBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn precision(request: &RenderRequest) -> Precision {
        Precision::for_view(&request.state().bounds(), request.width(), request.height())
    }
}

impl ComputeBackend for DataParallelBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::DataParallel
    }

    fn compute_iterations(&self, request: &RenderRequest) -> Result<Vec<u32>, RenderError> {
        request.params()?;
        let precision = Self::precision(request);

        log::debug!(
            "Data-parallel render {}x{} at {} iterations, {:?} precision",
            request.width(),
            request.height(),
            request.state().iteration_budget(),
            precision
        );

        let launch = build_launch(request, precision, KernelMode::Render, Point::default())?;
        Ok(run_kernel(&launch)?.iterations)
    }

    fn probe(&self, request: &RenderRequest, pixel: Point) -> Result<ProbeResult, RenderError> {
        request.params()?;

        let launch = build_launch(request, Self::precision(request), KernelMode::Probe, pixel)?;
        run_kernel(&launch)?
            .probe_result()
            .ok_or_else(|| RenderError::Output("kernel returned no probe".to_string()))
    }
}
