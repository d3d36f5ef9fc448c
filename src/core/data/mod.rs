pub mod colour;
pub mod colour_buffer;
pub mod complex;
pub mod escape_buffer;
pub mod point;
pub mod raster;
