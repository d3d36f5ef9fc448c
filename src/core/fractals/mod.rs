pub mod algorithm;
pub mod escape;
pub mod mode;
pub mod params;
