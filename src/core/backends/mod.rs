//! Compute backends for the escape-time kernel.
//!
//! Every backend takes the same [`RenderRequest`](request::RenderRequest) and
//! produces the same per-pixel counts; they differ only in where the work
//! runs and whether the caller waits for it.

pub mod backend;
pub mod data_parallel;
pub mod device;
pub mod errors;
pub mod external_accelerator;
pub mod factory;
pub mod host_device;
pub mod kernel;
pub mod kind;
pub mod request;
pub mod scalar;
