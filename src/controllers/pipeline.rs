use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::controllers::session::state::SessionState;
use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::equalize::{EqualizeError, EqualizerSettings, equalize_cancelable};
use crate::core::actions::evaluate_frame::{EvaluateEscapeBufferError, evaluate_escape_buffer};
use crate::core::data::colour_buffer::ColourBuffer;
use crate::core::data::escape_buffer::RawEscapeBuffer;
use crate::core::data::raster::RasterSize;
use crate::core::fractals::params::FractalParameters;
use crate::core::view::transform::ViewTransform;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("evaluation failed: {0}")]
    Evaluate(#[from] EvaluateEscapeBufferError),
    #[error("equalization failed: {0}")]
    Equalize(#[from] EqualizeError),
}

impl PipelineError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Evaluate(err) => err.is_cancelled(),
            Self::Equalize(err) => matches!(err, EqualizeError::Cancelled(_)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Zero-sized raster; nothing was produced and the session stays dirty.
    Skipped,
    /// Nothing changed since the last frame.
    Reused,
    Rendered { duration: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EvaluationKey {
    raster: RasterSize,
    view: ViewTransform,
    params: FractalParameters,
}

/// Synchronous evaluate-then-equalize driver gated on `SessionState::dirty`.
///
/// The raw buffer is kept between passes and only re-evaluated when the view,
/// parameters or raster change, so toggling equalization re-runs only the
/// colour pass. A failed pass keeps the previous colour buffer and leaves the
/// session dirty.
#[derive(Debug, Default)]
pub struct FramePipeline {
    raw: Option<(EvaluationKey, RawEscapeBuffer)>,
    colour: Option<(EvaluationKey, EqualizerSettings, ColourBuffer)>,
    last_duration: Option<Duration>,
}

impl FramePipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&mut self, state: &mut SessionState) -> Result<PipelineOutcome, PipelineError> {
        self.run_cancelable(state, &NeverCancel)
    }

    pub fn run_cancelable<C: CancelToken>(
        &mut self,
        state: &mut SessionState,
        cancel: &C,
    ) -> Result<PipelineOutcome, PipelineError> {
        if state.raster.is_degenerate() {
            debug!(
                width = state.raster.width,
                height = state.raster.height,
                "skipping degenerate raster"
            );
            return Ok(PipelineOutcome::Skipped);
        }
        if !state.dirty && self.colour.is_some() {
            return Ok(PipelineOutcome::Reused);
        }

        let start = Instant::now();
        let key = EvaluationKey {
            raster: state.raster,
            view: state.view,
            params: state.params,
        };

        let raw_changed = self.raw.as_ref().is_none_or(|(cached, _)| *cached != key);
        if raw_changed {
            let raw = evaluate_escape_buffer(key.raster, key.view, key.params, cancel)
                .inspect_err(|err| log_failure(err.is_cancelled(), err))?;
            self.raw = Some((key, raw));
        }

        let colour_changed = self
            .colour
            .as_ref()
            .is_none_or(|(cached, settings, _)| *cached != key || *settings != state.equalizer);
        if colour_changed {
            if let Some((_, raw)) = &self.raw {
                let colour = equalize_cancelable(raw, &state.equalizer, cancel).inspect_err(
                    |err| log_failure(matches!(err, EqualizeError::Cancelled(_)), err),
                )?;
                self.colour = Some((key, state.equalizer, colour));
            }
        }

        state.dirty = false;
        if !colour_changed {
            return Ok(PipelineOutcome::Reused);
        }

        let duration = start.elapsed();
        self.last_duration = Some(duration);
        info!(
            width = key.raster.width,
            height = key.raster.height,
            max_iter = key.params.max_iter,
            evaluated = raw_changed,
            ?duration,
            "frame rendered"
        );

        Ok(PipelineOutcome::Rendered { duration })
    }

    #[must_use]
    pub fn colour_buffer(&self) -> Option<&ColourBuffer> {
        self.colour.as_ref().map(|(_, _, buffer)| buffer)
    }

    #[must_use]
    pub fn raw_buffer(&self) -> Option<&RawEscapeBuffer> {
        self.raw.as_ref().map(|(_, buffer)| buffer)
    }

    #[must_use]
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }
}

fn log_failure(cancelled: bool, err: &dyn std::error::Error) {
    if cancelled {
        debug!("frame pass cancelled");
    } else {
        warn!(error = %err, "frame pass failed");
    }
}
