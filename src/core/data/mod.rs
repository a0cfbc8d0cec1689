pub mod colour;
pub mod complex;
pub mod device_layout;
pub mod extended_complex;
pub mod extended_scalar;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod point;
pub mod view_bounds;
pub mod viewport_state;
