use crate::core::data::point::PixelPoint;
use std::error::Error;

/// Per-pixel computation plugged into the frame evaluator.
pub trait FractalAlgorithm {
    type Success;
    type Failure: Error;

    fn compute(&self, pixel: PixelPoint) -> Result<Self::Success, Self::Failure>;
}
