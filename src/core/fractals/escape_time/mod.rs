pub mod algorithm;
pub mod errors;
pub mod grid;
pub mod orbit;
pub mod params;
