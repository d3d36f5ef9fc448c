pub mod overlay;
pub mod pixel_format;
