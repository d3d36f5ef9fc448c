use crate::core::data::point::PixelPoint;
use serde::{Deserialize, Serialize};

/// Width and height of a pixel raster.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero and nothing can be rendered.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn rgb_len(&self) -> usize {
        self.pixel_count() * 3
    }

    #[must_use]
    pub fn center(&self) -> PixelPoint {
        PixelPoint {
            x: f64::from(self.width) / 2.0,
            y: f64::from(self.height) / 2.0,
        }
    }

    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Maps a position measured in `other` onto this raster, axis by axis.
    ///
    /// Returns the position unchanged when `other` is degenerate.
    #[must_use]
    pub fn rescale_from(&self, position: PixelPoint, other: RasterSize) -> PixelPoint {
        if other.is_degenerate() {
            return position;
        }

        PixelPoint {
            x: position.x * f64::from(self.width) / f64::from(other.width),
            y: position.y * f64::from(self.height) / f64::from(other.height),
        }
    }
}
