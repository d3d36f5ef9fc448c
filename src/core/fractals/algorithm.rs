use crate::core::actions::evaluate_frame::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::escape_buffer::EscapeSample;
use crate::core::data::point::PixelPoint;
use crate::core::fractals::escape::escape_time;
use crate::core::fractals::params::{FractalParameters, FractalParamsError};
use crate::core::view::transform::ViewTransform;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EscapeTimeError {
    #[error("pixel at x:{x}, y:{y} maps outside the representable plane")]
    NonFinitePlanePoint { x: f64, y: f64 },
}

/// Escape-time evaluation of one pixel against an immutable view snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeTimeAlgorithm {
    view: ViewTransform,
    params: FractalParameters,
}

impl EscapeTimeAlgorithm {
    pub fn new(view: ViewTransform, params: FractalParameters) -> Result<Self, FractalParamsError> {
        params.validate()?;

        Ok(Self { view, params })
    }

    #[must_use]
    pub fn max_iter(&self) -> u32 {
        self.params.max_iter
    }
}

impl FractalAlgorithm for EscapeTimeAlgorithm {
    type Success = EscapeSample;
    type Failure = EscapeTimeError;

    fn compute(&self, pixel: PixelPoint) -> Result<Self::Success, Self::Failure> {
        let point = self.view.pixel_to_plane(pixel);
        if !point.is_finite() {
            return Err(EscapeTimeError::NonFinitePlanePoint {
                x: pixel.x,
                y: pixel.y,
            });
        }

        Ok(escape_time(point, &self.params))
    }
}
