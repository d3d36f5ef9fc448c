use crate::core::data::colour::Colour;
use crate::core::data::raster::RasterSize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColourBufferError {
    #[error("pixel at x:{x}, y:{y} outside of raster {width}x{height}")]
    PixelOutsideBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("raster size {raster_size} does not match buffer size {buffer_size}")]
    BoundsMismatch {
        raster_size: usize,
        buffer_size: usize,
    },
}

pub type ColourBufferData = Vec<u8>;

/// Packed RGB image, three bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourBuffer {
    raster: RasterSize,
    buffer: ColourBufferData,
}

impl ColourBuffer {
    #[must_use]
    pub fn new(raster: RasterSize) -> Self {
        Self {
            raster,
            buffer: vec![0; raster.rgb_len()],
        }
    }

    pub fn from_data(
        raster: RasterSize,
        buffer: ColourBufferData,
    ) -> Result<Self, ColourBufferError> {
        if raster.rgb_len() != buffer.len() {
            return Err(ColourBufferError::BoundsMismatch {
                raster_size: raster.rgb_len(),
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { raster, buffer })
    }

    #[must_use]
    pub fn raster(&self) -> RasterSize {
        self.raster
    }

    #[must_use]
    pub fn buffer(&self) -> &ColourBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if !self.raster.contains(x, y) {
            return None;
        }

        let index = self.index_of(x, y);
        Some(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) -> Result<(), ColourBufferError> {
        if !self.raster.contains(x, y) {
            return Err(ColourBufferError::PixelOutsideBounds {
                x,
                y,
                width: self.raster.width,
                height: self.raster.height,
            });
        }

        let index = self.index_of(x, y);
        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        (y as usize * self.raster.width as usize + x as usize) * 3
    }
}
