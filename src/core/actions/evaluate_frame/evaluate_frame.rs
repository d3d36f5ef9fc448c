use rayon::prelude::*;
use thiserror::Error;

use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled, NeverCancel,
};
use crate::core::actions::evaluate_frame::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::escape_buffer::{EscapeBufferError, RawEscapeBuffer};
use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;
use crate::core::fractals::algorithm::{EscapeTimeAlgorithm, EscapeTimeError};
use crate::core::fractals::params::{FractalParameters, FractalParamsError};
use crate::core::view::transform::ViewTransform;

/// Error type for cancelable frame evaluation.
///
/// Cancellation is expected control flow and should not be shown to users.
#[derive(Debug, Error)]
pub enum EvaluateFrameError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("algorithm error: {0}")]
    Algorithm(#[source] E),
}

/// Serial reference evaluation, row-major.
pub fn evaluate_frame_serial<Alg: FractalAlgorithm>(
    raster: RasterSize,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    (0..raster.height)
        .flat_map(|y| (0..raster.width).map(move |x| pixel_centre(x, y)))
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}

/// Evaluates every pixel in parallel on rayon's pool.
pub fn evaluate_frame<Alg>(
    raster: RasterSize,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    Alg::Failure: Send + 'static,
{
    evaluate_frame_cancelable(raster, algorithm, &NeverCancel).map_err(|e| match e {
        EvaluateFrameError::Algorithm(err) => err,
        EvaluateFrameError::Cancelled(_) => {
            unreachable!("NeverCancel token should never signal cancellation")
        }
    })
}

/// Parallel evaluation with a cancellation token polled at the start of each
/// row and every [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels within it.
pub fn evaluate_frame_cancelable<Alg, C>(
    raster: RasterSize,
    algorithm: &Alg,
    cancel: &C,
) -> Result<Vec<Alg::Success>, EvaluateFrameError<Alg::Failure>>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    Alg::Failure: Send + 'static,
    C: CancelToken,
{
    let row_width = raster.width as usize;

    let rows: Result<Vec<Vec<Alg::Success>>, EvaluateFrameError<Alg::Failure>> = (0
        ..raster.height)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(row_width);

            for x in 0..raster.width {
                if x as usize % CANCEL_CHECK_INTERVAL_PIXELS == 0 {
                    cancel.check()?;
                }

                let sample = algorithm
                    .compute(pixel_centre(x, y))
                    .map_err(EvaluateFrameError::Algorithm)?;
                row.push(sample);
            }

            Ok(row)
        })
        .collect();

    rows.map(|r| r.into_iter().flatten().collect())
}

#[derive(Debug, Error)]
pub enum EvaluateEscapeBufferError {
    #[error(transparent)]
    Params(#[from] FractalParamsError),
    #[error(transparent)]
    Frame(#[from] EvaluateFrameError<EscapeTimeError>),
    #[error(transparent)]
    Buffer(#[from] EscapeBufferError),
}

impl EvaluateEscapeBufferError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Frame(EvaluateFrameError::Cancelled(_)))
    }
}

/// Produces the raw escape image for one view snapshot.
pub fn evaluate_escape_buffer<C: CancelToken>(
    raster: RasterSize,
    view: ViewTransform,
    params: FractalParameters,
    cancel: &C,
) -> Result<RawEscapeBuffer, EvaluateEscapeBufferError> {
    let algorithm = EscapeTimeAlgorithm::new(view, params)?;
    let samples = evaluate_frame_cancelable(raster, &algorithm, cancel)?;

    Ok(RawEscapeBuffer::from_samples(
        raster,
        params.max_iter,
        samples,
    )?)
}

/// Pixel `(i, j)` is sampled at its integer coordinate.
fn pixel_centre(x: u32, y: u32) -> PixelPoint {
    PixelPoint {
        x: f64::from(x),
        y: f64::from(y),
    }
}
