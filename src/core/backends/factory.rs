use crate::core::backends::backend::ComputeBackend;
use crate::core::backends::data_parallel::DataParallelBackend;
use crate::core::backends::device::AcceleratorDevice;
use crate::core::backends::errors::RenderError;
use crate::core::backends::external_accelerator::ExternalAcceleratorBackend;
use crate::core::backends::kind::BackendKind;
use crate::core::backends::scalar::ScalarBackend;
use std::sync::Arc;

/// Creates the backend for `kind`. Only the external accelerator can fail,
/// when `accelerator` is `None`.
pub fn create_backend(
    kind: BackendKind,
    accelerator: Option<Arc<dyn AcceleratorDevice>>,
) -> Result<Arc<dyn ComputeBackend>, RenderError> {
    match kind {
        BackendKind::Scalar => Ok(Arc::new(ScalarBackend::new())),
        BackendKind::DataParallel => Ok(Arc::new(DataParallelBackend::new())),
        BackendKind::ExternalAccelerator => Ok(Arc::new(ExternalAcceleratorBackend::open(accelerator)?)),
    }
}
