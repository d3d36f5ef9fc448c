use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ExplorerConfig;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::session::diagnostics::Diagnostics;
use crate::core::actions::equalize::EqualizerSettings;
use crate::core::animation::AnimationState;
use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;
use crate::core::fractals::params::FractalParameters;
use crate::core::view::iterations::derive_max_iter;
use crate::core::view::transform::ViewTransform;

/// Everything one exploration session mutates, in one place.
///
/// The router and animation step write to it; the pipeline and worker read
/// snapshots of it. `dirty` stays set until a frame has been produced from
/// the current values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub view: ViewTransform,
    pub params: FractalParameters,
    pub animation: AnimationState,
    pub equalizer: EqualizerSettings,
    /// Size of the evaluated image.
    pub raster: RasterSize,
    /// Size of the host window; pointer input arrives in these units.
    pub window: RasterSize,
    /// Last pointer position in raster pixels.
    pub pointer: PixelPoint,
    pub pan_anchor: Option<PixelPoint>,
    pub dragging_marker: bool,
    pub dirty: bool,
}

impl SessionState {
    #[must_use]
    pub fn new(raster: RasterSize, params: FractalParameters, equalizer: EqualizerSettings) -> Self {
        let mut state = Self {
            view: ViewTransform::home(raster),
            params,
            animation: AnimationState::Idle,
            equalizer,
            raster,
            window: raster,
            pointer: raster.center(),
            pan_anchor: None,
            dragging_marker: false,
            dirty: true,
        };
        state.refresh_max_iter();

        state
    }

    #[must_use]
    pub fn from_config(config: &ExplorerConfig) -> Self {
        let params = FractalParameters {
            c: config.julia_constant,
            power: config.power,
            ..Default::default()
        };

        Self::new(config.raster(), params, config.equalizer)
    }

    /// Re-derives `max_iter` from the current scale and bias.
    pub fn refresh_max_iter(&mut self) {
        self.params.max_iter = derive_max_iter(self.view.scale(), self.params.iter_offset);
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Raster position of `c`, when the marker is shown.
    #[must_use]
    pub fn marker_pixel(&self) -> Option<PixelPoint> {
        self.params
            .marker_visible()
            .then(|| self.view.plane_to_pixel(self.params.c))
    }

    #[must_use]
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            raster: self.raster,
            view: self.view,
            params: self.params,
            equalizer: self.equalizer,
        }
    }

    #[must_use]
    pub fn diagnostics(&self, frame_time: Option<Duration>) -> Diagnostics {
        Diagnostics {
            max_iter: self.params.max_iter,
            units_per_pixel: self.view.scale(),
            zoom: self.view.zoom_factor(self.raster),
            frame_time,
        }
    }
}
