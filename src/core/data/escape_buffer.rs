use crate::core::data::raster::RasterSize;
use thiserror::Error;

/// Largest remainder that stays strictly below one after the f64 to f32 narrowing.
pub const MAX_REMAINDER: f32 = 1.0 - f32::EPSILON;

/// Fractional iteration count of one pixel.
///
/// `count == max_iter` marks an interior point; escaped samples always carry a
/// count below `max_iter` and a remainder in `[0, 1)`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EscapeSample {
    pub count: u32,
    pub remainder: f32,
}

impl EscapeSample {
    #[must_use]
    pub fn interior(max_iter: u32) -> Self {
        Self {
            count: max_iter,
            remainder: 0.0,
        }
    }

    /// Splits a smoothed value clamped into `[0, max_iter)`.
    #[must_use]
    pub fn from_smoothed(smoothed: f64, max_iter: u32) -> Self {
        let ceiling = f64::from(max_iter);
        if max_iter == 0 {
            return Self::interior(0);
        }
        if !smoothed.is_finite() || smoothed <= 0.0 {
            return Self {
                count: 0,
                remainder: 0.0,
            };
        }
        if smoothed >= ceiling {
            return Self {
                count: max_iter - 1,
                remainder: MAX_REMAINDER,
            };
        }

        let whole = smoothed.floor();
        Self {
            count: whole as u32,
            remainder: ((smoothed - whole) as f32).min(MAX_REMAINDER),
        }
    }

    #[must_use]
    pub fn is_interior(&self, max_iter: u32) -> bool {
        self.count >= max_iter
    }

    #[must_use]
    pub fn smoothed(&self) -> f64 {
        f64::from(self.count) + f64::from(self.remainder)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EscapeBufferError {
    #[error("raster {width}x{height} expects {expected} samples, got {actual}")]
    BoundsMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Row-major escape samples for a whole raster, tagged with the iteration
/// limit they were computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEscapeBuffer {
    raster: RasterSize,
    max_iter: u32,
    samples: Vec<EscapeSample>,
}

impl RawEscapeBuffer {
    pub fn from_samples(
        raster: RasterSize,
        max_iter: u32,
        samples: Vec<EscapeSample>,
    ) -> Result<Self, EscapeBufferError> {
        if samples.len() != raster.pixel_count() {
            return Err(EscapeBufferError::BoundsMismatch {
                width: raster.width,
                height: raster.height,
                expected: raster.pixel_count(),
                actual: samples.len(),
            });
        }

        Ok(Self {
            raster,
            max_iter,
            samples,
        })
    }

    #[must_use]
    pub fn raster(&self) -> RasterSize {
        self.raster
    }

    #[must_use]
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    #[must_use]
    pub fn samples(&self) -> &[EscapeSample] {
        &self.samples
    }

    #[must_use]
    pub fn sample(&self, x: u32, y: u32) -> Option<EscapeSample> {
        if !self.raster.contains(x, y) {
            return None;
        }
        let index = y as usize * self.raster.width as usize + x as usize;
        self.samples.get(index).copied()
    }

    #[must_use]
    pub fn interior_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|sample| sample.is_interior(self.max_iter))
            .count()
    }
}
