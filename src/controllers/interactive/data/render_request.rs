use crate::core::actions::equalize::EqualizerSettings;
use crate::core::data::raster::RasterSize;
use crate::core::fractals::params::FractalParameters;
use crate::core::view::transform::ViewTransform;

/// Immutable snapshot of everything one frame depends on.
///
/// `PartialEq` lets callers skip submitting a request identical to the last one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub raster: RasterSize,
    pub view: ViewTransform,
    pub params: FractalParameters,
    pub equalizer: EqualizerSettings,
}
