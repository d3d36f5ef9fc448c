use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::equalize::histogram::{
    DEFAULT_PRECISION_FACTOR, HistogramTable, MAX_PRECISION_FACTOR, bucket_of,
};
use crate::core::actions::equalize::spectrum::spectrum_colour;
use crate::core::data::colour::Colour;
use crate::core::data::colour_buffer::{ColourBuffer, ColourBufferError};
use crate::core::data::escape_buffer::{EscapeSample, RawEscapeBuffer};

/// Dense-index window used by the default suppression policy.
pub const DEFAULT_SUPPRESSION_WINDOW: u32 = 1000;

const MAP_CHUNK_PIXELS: usize = 4 * 1024;

/// Which barely-escaping pixels are painted as background.
///
/// Pixels near the set boundary occupy the last few dense indices; painting
/// them black keeps the edge crisp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum EdgeSuppression {
    None,
    /// Suppress when `total + 1 - index < window`.
    DenseTail { window: u32 },
    /// Suppress when `bucket + buckets > max_bucket`.
    BucketBand { buckets: u32 },
}

impl EdgeSuppression {
    #[must_use]
    pub fn suppresses(&self, bucket: usize, index: u32, table: &HistogramTable) -> bool {
        match *self {
            Self::None => false,
            Self::DenseTail { window } => {
                u64::from(table.total()) + 1 - u64::from(index) < u64::from(window)
            }
            Self::BucketBand { buckets } => bucket + buckets as usize > table.max_bucket(),
        }
    }
}

impl Default for EdgeSuppression {
    fn default() -> Self {
        Self::DenseTail {
            window: DEFAULT_SUPPRESSION_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqualizerSettings {
    /// Histogram equalization on; otherwise a linear ramp over `max_iter`.
    pub enabled: bool,
    pub precision_factor: u32,
    pub edge_suppression: EdgeSuppression,
}

impl Default for EqualizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            precision_factor: DEFAULT_PRECISION_FACTOR,
            edge_suppression: EdgeSuppression::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EqualizeError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("colour buffer error: {0}")]
    ColourBuffer(#[from] ColourBufferError),
}

/// Converts a raw escape image to colours.
pub fn equalize(
    buffer: &RawEscapeBuffer,
    settings: &EqualizerSettings,
) -> Result<ColourBuffer, ColourBufferError> {
    equalize_cancelable(buffer, settings, &NeverCancel).map_err(|e| match e {
        EqualizeError::ColourBuffer(err) => err,
        EqualizeError::Cancelled(_) => {
            unreachable!("NeverCancel token should never signal cancellation")
        }
    })
}

/// Count, compact and map, polling `cancel` between phases and per chunk.
pub fn equalize_cancelable<C: CancelToken>(
    buffer: &RawEscapeBuffer,
    settings: &EqualizerSettings,
    cancel: &C,
) -> Result<ColourBuffer, EqualizeError> {
    let raster = buffer.raster();
    let max_iter = buffer.max_iter();
    let precision_factor = settings.precision_factor.clamp(1, MAX_PRECISION_FACTOR);

    let table = if settings.enabled {
        cancel.check()?;
        let table = HistogramTable::build(buffer, precision_factor);
        cancel.check()?;
        Some(table)
    } else {
        None
    };

    let mut data = vec![0u8; raster.rgb_len()];
    data.par_chunks_mut(MAP_CHUNK_PIXELS * 3)
        .zip(buffer.samples().par_chunks(MAP_CHUNK_PIXELS))
        .try_for_each(|(rgb, samples)| {
            cancel.check()?;
            for (pixel, sample) in rgb.chunks_exact_mut(3).zip(samples) {
                let colour = match &table {
                    Some(table) => equalized_colour(
                        *sample,
                        max_iter,
                        precision_factor,
                        table,
                        settings.edge_suppression,
                    ),
                    None => linear_colour(*sample, max_iter),
                };
                pixel.copy_from_slice(&colour.to_rgb());
            }
            Ok::<(), Cancelled>(())
        })?;

    Ok(ColourBuffer::from_data(raster, data)?)
}

/// Colour of one sample under histogram equalization.
#[must_use]
pub fn equalized_colour(
    sample: EscapeSample,
    max_iter: u32,
    precision_factor: u32,
    table: &HistogramTable,
    suppression: EdgeSuppression,
) -> Colour {
    let Some(bucket) = bucket_of(sample, max_iter, precision_factor) else {
        return Colour::BLACK;
    };
    let Some(index) = table.index_of(bucket) else {
        return Colour::BLACK;
    };
    if suppression.suppresses(bucket, index, table) {
        return Colour::BLACK;
    }

    spectrum_colour(f64::from(index) / f64::from(table.total()))
}

/// Colour of one sample on a linear ramp, `t = smoothed / max_iter`.
#[must_use]
pub fn linear_colour(sample: EscapeSample, max_iter: u32) -> Colour {
    if sample.is_interior(max_iter) {
        return Colour::BLACK;
    }
    spectrum_colour(sample.smoothed() / f64::from(max_iter))
}
