use std::path::Path;

use crate::core::data::colour_buffer::ColourBuffer;

pub trait FilePresenterPort {
    fn present(&self, buffer: &ColourBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()>;
}
