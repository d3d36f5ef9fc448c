use rayon::prelude::*;

use crate::core::data::escape_buffer::{EscapeSample, RawEscapeBuffer};

/// Buckets per unit of smoothed iteration count.
pub const DEFAULT_PRECISION_FACTOR: u32 = 128;

/// Largest accepted precision factor.
pub const MAX_PRECISION_FACTOR: u32 = 1024;

/// Headroom, in whole iterations, kept above `max_iter` in the bucket range.
pub const BUCKET_HEADROOM_ITERATIONS: u32 = 50;

const COUNT_CHUNK_PIXELS: usize = 16 * 1024;

/// Highest bucket index tracked for a given iteration limit.
#[must_use]
pub fn max_bucket(max_iter: u32, precision_factor: u32) -> usize {
    (max_iter as usize + BUCKET_HEADROOM_ITERATIONS as usize) * precision_factor as usize
}

/// Bucket of an escaped sample, or `None` for interior and out-of-range samples.
#[must_use]
pub fn bucket_of(
    sample: EscapeSample,
    max_iter: u32,
    precision_factor: u32,
) -> Option<usize> {
    if sample.is_interior(max_iter) {
        return None;
    }

    let scaled = (sample.smoothed() * f64::from(precision_factor)).floor().max(0.0);
    let bucket = scaled as usize;

    (bucket <= max_bucket(max_iter, precision_factor)).then_some(bucket)
}

/// Counts samples per bucket.
///
/// Chunks of the buffer are counted into private histograms which are then
/// summed element-wise, so no counter is shared between workers. There is at
/// most one chunk per pool thread, which bounds the number of histograms.
#[must_use]
pub fn count_buckets(buffer: &RawEscapeBuffer, precision_factor: u32) -> Vec<u32> {
    let max_iter = buffer.max_iter();
    let len = max_bucket(max_iter, precision_factor) + 1;
    let samples = buffer.samples();
    let chunk_len = samples
        .len()
        .div_ceil(rayon::current_num_threads())
        .max(COUNT_CHUNK_PIXELS);

    samples
        .par_chunks(chunk_len)
        .fold(
            || vec![0u32; len],
            |mut counts, chunk| {
                for sample in chunk {
                    if let Some(bucket) = bucket_of(*sample, max_iter, precision_factor) {
                        counts[bucket] += 1;
                    }
                }
                counts
            },
        )
        .reduce(
            || vec![0u32; len],
            |mut left, right| {
                for (l, r) in left.iter_mut().zip(right) {
                    *l += r;
                }
                left
            },
        )
}

/// Dense "used colour index" for every occupied bucket.
///
/// Occupied buckets are numbered `1..=total` in ascending order; empty buckets
/// and bucket zero map to no index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramTable {
    dense: Vec<u32>,
    total: u32,
}

impl HistogramTable {
    #[must_use]
    pub fn from_counts(counts: &[u32]) -> Self {
        let mut dense = vec![0u32; counts.len()];
        let mut next = 0u32;

        for (bucket, &count) in counts.iter().enumerate().skip(1) {
            if count > 0 {
                next += 1;
                dense[bucket] = next;
            }
        }

        Self { dense, total: next }
    }

    #[must_use]
    pub fn build(buffer: &RawEscapeBuffer, precision_factor: u32) -> Self {
        Self::from_counts(&count_buckets(buffer, precision_factor))
    }

    /// Dense index of `bucket`, if it was occupied.
    #[must_use]
    pub fn index_of(&self, bucket: usize) -> Option<u32> {
        self.dense.get(bucket).copied().filter(|&index| index > 0)
    }

    /// Number of distinct occupied buckets.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn max_bucket(&self) -> usize {
        self.dense.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::raster::RasterSize;

    fn counts_with(buckets: &[usize], len: usize) -> Vec<u32> {
        let mut counts = vec![0; len];
        for &bucket in buckets {
            counts[bucket] += 1;
        }
        counts
    }

    fn buffer_of(smoothed: &[f64], max_iter: u32) -> RawEscapeBuffer {
        let samples = smoothed
            .iter()
            .map(|&s| {
                if s < 0.0 {
                    EscapeSample::interior(max_iter)
                } else {
                    EscapeSample::from_smoothed(s, max_iter)
                }
            })
            .collect::<Vec<_>>();
        let raster = RasterSize::new(samples.len() as u32, 1);
        RawEscapeBuffer::from_samples(raster, max_iter, samples).unwrap()
    }

    #[test]
    fn compaction_assigns_dense_indices_in_bucket_order() {
        let table = HistogramTable::from_counts(&counts_with(&[2, 5, 5, 9], 12));

        assert_eq!(table.index_of(2), Some(1));
        assert_eq!(table.index_of(5), Some(2));
        assert_eq!(table.index_of(9), Some(3));
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn holes_and_bucket_zero_have_no_index() {
        let table = HistogramTable::from_counts(&counts_with(&[0, 0, 3], 6));

        assert_eq!(table.index_of(0), None);
        assert_eq!(table.index_of(1), None);
        assert_eq!(table.index_of(3), Some(1));
        assert_eq!(table.index_of(100), None);
        assert_eq!(table.total(), 1);
    }

    #[test]
    fn empty_histogram_has_zero_total() {
        let table = HistogramTable::from_counts(&[0; 8]);

        assert_eq!(table.total(), 0);
        assert_eq!(table.max_bucket(), 7);
    }

    #[test]
    fn max_bucket_includes_headroom() {
        assert_eq!(max_bucket(100, 128), 150 * 128);
    }

    #[test]
    fn bucket_of_scales_smoothed_count() {
        let sample = EscapeSample::from_smoothed(2.5, 100);

        assert_eq!(bucket_of(sample, 100, 128), Some(320));
    }

    #[test]
    fn bucket_of_skips_interior() {
        assert_eq!(bucket_of(EscapeSample::interior(100), 100, 128), None);
    }

    #[test]
    fn bucket_of_excludes_samples_at_or_above_the_limit() {
        let sample = EscapeSample {
            count: 90,
            remainder: 0.0,
        };

        assert_eq!(bucket_of(sample, 20, 1), None);
        assert_eq!(bucket_of(sample, 100, 1), Some(90));
    }

    #[test]
    fn count_buckets_ignores_interior_pixels() {
        let buffer = buffer_of(&[1.0, 1.0, -1.0, 3.25], 10);

        let counts = count_buckets(&buffer, 4);

        assert_eq!(counts.len(), max_bucket(10, 4) + 1);
        assert_eq!(counts[4], 2);
        assert_eq!(counts[13], 1);
        assert_eq!(counts.iter().sum::<u32>(), 3);
    }

    #[test]
    fn parallel_count_matches_serial_count_on_large_buffer() {
        let smoothed: Vec<f64> = (0..50_000).map(|i| f64::from(i % 997) / 10.0).collect();
        let buffer = buffer_of(&smoothed, 100);

        let counts = count_buckets(&buffer, 16);

        let mut expected = vec![0u32; max_bucket(100, 16) + 1];
        for sample in buffer.samples() {
            if let Some(bucket) = bucket_of(*sample, 100, 16) {
                expected[bucket] += 1;
            }
        }
        assert_eq!(counts, expected);
    }

    #[test]
    fn compaction_is_monotonic_and_dense() {
        let smoothed: Vec<f64> = (0..2_000).map(|i| f64::from(i * 7 % 131) / 3.0).collect();
        let buffer = buffer_of(&smoothed, 60);
        let counts = count_buckets(&buffer, 32);
        let table = HistogramTable::from_counts(&counts);

        let assigned: Vec<u32> = (0..counts.len()).filter_map(|b| table.index_of(b)).collect();

        assert_eq!(assigned, (1..=table.total()).collect::<Vec<_>>());
        let occupied = counts.iter().skip(1).filter(|&&c| c > 0).count();
        assert_eq!(table.total() as usize, occupied);
    }
}
