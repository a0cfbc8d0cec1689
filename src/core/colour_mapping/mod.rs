pub mod escape_fraction;
pub mod factory;
pub mod gradient;
pub mod kinds;
