pub mod frame_failure;
pub mod viewport;
