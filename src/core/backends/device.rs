use crate::core::backends::errors::DeviceError;
use crate::core::backends::kernel::KernelOutput;

/// An accelerator reachable only through the byte image of a
/// [`KernelLaunch`](crate::core::data::device_layout::KernelLaunch).
pub trait AcceleratorDevice: Send + Sync {
    fn name(&self) -> &str;

    fn execute(&self, launch: &[u8]) -> Result<KernelOutput, DeviceError>;
}
