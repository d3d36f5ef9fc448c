use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;
use crate::core::view::transform::{ViewTransform, home_scale};
use serde::{Deserialize, Serialize};

/// Relative scale difference below which a reset is treated as pan-only.
const SAME_SCALE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Continuous zoom-in while a button is held; never reaches its target.
    HoldToZoom,
    /// Eased return to the home scale.
    ResetToHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomAnimation {
    pub kind: AnimationKind,
    pub target_scale: f64,
    pub anchor: PixelPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Animating(ZoomAnimation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Started,
    /// A reset request while animating stops the animation instead.
    Cancelled,
    /// Already at the home scale; the offset was restored directly.
    Snapped,
}

impl AnimationState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Animating(_))
    }

    #[must_use]
    pub fn kind(&self) -> Option<AnimationKind> {
        match self {
            Self::Idle => None,
            Self::Animating(animation) => Some(animation.kind),
        }
    }

    pub fn start_hold_zoom(&mut self, anchor: PixelPoint) {
        *self = Self::Animating(ZoomAnimation {
            kind: AnimationKind::HoldToZoom,
            target_scale: 0.0,
            anchor,
        });
    }

    /// Moves the hold-to-zoom anchor with the pointer. Other animations keep
    /// their anchor.
    pub fn track_pointer(&mut self, pointer: PixelPoint) {
        if let Self::Animating(animation) = self {
            if animation.kind == AnimationKind::HoldToZoom {
                animation.anchor = pointer;
            }
        }
    }

    /// Ends a hold-to-zoom gesture. Returns whether one was running.
    pub fn release_hold(&mut self) -> bool {
        if self.kind() == Some(AnimationKind::HoldToZoom) {
            *self = Self::Idle;
            return true;
        }
        false
    }

    /// Stops any animation where it is. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        *self = Self::Idle;
        was_active
    }

    /// Starts the eased return to the home view, or cancels a running animation.
    ///
    /// With `centered` the raster centre stays fixed; otherwise the anchor is
    /// chosen so that the view ends on the home offset.
    pub fn start_reset(
        &mut self,
        view: &mut ViewTransform,
        raster: RasterSize,
        centered: bool,
    ) -> ResetOutcome {
        if self.cancel() {
            return ResetOutcome::Cancelled;
        }

        let target_scale = home_scale(raster);
        let scale = view.scale();
        if (target_scale - scale).abs() <= SAME_SCALE_TOLERANCE * target_scale.max(scale) {
            *view = ViewTransform::home(raster);
            return ResetOutcome::Snapped;
        }

        let anchor = if centered {
            raster.center()
        } else {
            home_anchor(view, raster.center(), target_scale)
        };

        *self = Self::Animating(ZoomAnimation {
            kind: AnimationKind::ResetToHome,
            target_scale,
            anchor,
        });
        ResetOutcome::Started
    }
}

/// Pixel whose plane point is the same in the current view and in the view
/// with scale `target` and offset `home_offset`.
///
/// Solves `(A - offset) * scale = (A - home_offset) * target` for `A`. Callers
/// guarantee `target != scale`.
#[must_use]
pub fn home_anchor(view: &ViewTransform, home_offset: PixelPoint, target: f64) -> PixelPoint {
    let scale = view.scale();
    (home_offset * target - view.offset() * scale) / (target - scale)
}
