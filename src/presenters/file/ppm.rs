use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::colour_buffer::ColourBuffer;

/// Writes binary (P6) PPM images.
#[derive(Debug, Default, Clone, Copy)]
pub struct PpmFilePresenter;

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_to(&self, buffer: &ColourBuffer, mut out: impl Write) -> std::io::Result<()> {
        let raster = buffer.raster();

        write!(out, "P6\n{} {}\n255\n", raster.width, raster.height)?;
        out.write_all(buffer.buffer())?;
        out.flush()
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &ColourBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let filepath = filepath.as_ref();
        if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        self.write_to(buffer, BufWriter::new(File::create(filepath)?))
    }
}
