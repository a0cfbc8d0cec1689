use crate::core::backends::device::AcceleratorDevice;
use crate::core::backends::errors::DeviceError;
use crate::core::backends::kernel::{KernelOutput, run_kernel};
use crate::core::data::device_layout::{KernelLaunch, LAYOUT_VERSION};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::mem::size_of;

/// Accelerator emulated on a private rayon pool. It decodes launches from
/// raw bytes exactly as a real device would.
pub struct HostAcceleratorDevice {
    name: String,
    pool: ThreadPool,
}

impl HostAcceleratorDevice {
    pub fn new(threads: usize) -> Result<Self, DeviceError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("accelerator-{}", index))
            .build()
            .map_err(|err| DeviceError::Execution(err.to_string()))?;

        Ok(Self {
            name: format!("host accelerator ({} threads)", pool.current_num_threads()),
            pool,
        })
    }

    fn decode(launch: &[u8]) -> Result<KernelLaunch, DeviceError> {
        let version = launch
            .get(..size_of::<u32>())
            .and_then(|word| bytemuck::try_pod_read_unaligned::<u32>(word).ok());

        match version {
            Some(version) if version != LAYOUT_VERSION => {
                return Err(DeviceError::UnsupportedLayout { version });
            }
            _ => {}
        }

        bytemuck::try_pod_read_unaligned(launch).map_err(|_| DeviceError::MalformedLaunch {
            expected: size_of::<KernelLaunch>(),
            actual: launch.len(),
        })
    }
}

impl AcceleratorDevice for HostAcceleratorDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, launch: &[u8]) -> Result<KernelOutput, DeviceError> {
        let launch = Self::decode(launch)?;

        self.pool.install(|| run_kernel(&launch))
    }
}
