pub mod actions;
pub mod backends;
pub mod colour_mapping;
pub mod config;
pub mod data;
pub mod errors;
pub mod fractals;
