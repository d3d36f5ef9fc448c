use crate::core::data::complex::Complex;
use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;
use serde::{Deserialize, Serialize};

/// Plane width covered by the home view, in plane units.
pub const HOME_PLANE_WIDTH: f64 = 4.0;

/// Default wheel sensitivity: one unit of scroll changes the scale by 3%.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.03;

/// Affine map between raster pixels and the complex plane.
///
/// `plane = (pixel - offset) * scale`, so `offset` is the pixel that lands on
/// the plane origin and `scale` is plane units per pixel (always positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    scale: f64,
    offset: PixelPoint,
}

impl ViewTransform {
    /// Builds a transform, or `None` when `scale` is not a positive finite number.
    #[must_use]
    pub fn new(scale: f64, offset: PixelPoint) -> Option<Self> {
        if !is_valid_scale(scale) || !offset.is_finite() {
            return None;
        }

        Some(Self { scale, offset })
    }

    /// The view that fits a plane width of four units centred on the origin.
    #[must_use]
    pub fn home(raster: RasterSize) -> Self {
        Self {
            scale: home_scale(raster),
            offset: raster.center(),
        }
    }

    /// Centres the view on `center` at the given scale.
    #[must_use]
    pub fn centered_on(raster: RasterSize, center: Complex, scale: f64) -> Option<Self> {
        if !is_valid_scale(scale) {
            return None;
        }
        let offset = raster.center() - PixelPoint::new(center.real, center.imag) / scale;

        Self::new(scale, offset)
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> PixelPoint {
        self.offset
    }

    #[must_use]
    pub fn pixel_to_plane(&self, pixel: PixelPoint) -> Complex {
        Complex {
            real: (pixel.x - self.offset.x) * self.scale,
            imag: (pixel.y - self.offset.y) * self.scale,
        }
    }

    #[must_use]
    pub fn plane_to_pixel(&self, point: Complex) -> PixelPoint {
        PixelPoint {
            x: point.real / self.scale + self.offset.x,
            y: point.imag / self.scale + self.offset.y,
        }
    }

    /// Sets a new scale while keeping `pivot` on the same plane point.
    ///
    /// Returns `false` and leaves the view untouched when `new_scale` is not a
    /// positive finite number or equals the current scale.
    pub fn zoom_to(&mut self, pivot: PixelPoint, new_scale: f64) -> bool {
        if !is_valid_scale(new_scale) || new_scale == self.scale {
            return false;
        }

        let offset = pivot - (pivot - self.offset) * (self.scale / new_scale);
        if !offset.is_finite() {
            return false;
        }

        self.offset = offset;
        self.scale = new_scale;
        true
    }

    /// Multiplies the scale by `factor` around `pivot`.
    pub fn zoom(&mut self, pivot: PixelPoint, factor: f64) -> bool {
        self.zoom_to(pivot, self.scale * factor)
    }

    /// Applies a wheel delta at `pivot`. Positive deltas zoom in.
    pub fn scroll_zoom(&mut self, pivot: PixelPoint, delta: f64, sensitivity: f64) -> bool {
        self.zoom_to(pivot, scrolled_scale(self.scale, delta, sensitivity))
    }

    pub fn pan(&mut self, delta: PixelPoint) -> bool {
        let offset = self.offset + delta;
        if !delta.is_finite() || !offset.is_finite() || delta == PixelPoint::ORIGIN {
            return false;
        }

        self.offset = offset;
        true
    }

    /// Re-anchors the view after the raster changes size so the plane point
    /// under the raster centre stays put.
    pub fn resize(&mut self, from: RasterSize, to: RasterSize) {
        self.offset = self.offset + (to.center() - from.center());
    }

    /// Plane units spanned by one pixel relative to the raster width; the
    /// advisory zoom factor shown to users.
    #[must_use]
    pub fn zoom_factor(&self, raster: RasterSize) -> f64 {
        if raster.width == 0 {
            return 0.0;
        }
        1.0 / (self.scale * f64::from(raster.width))
    }
}

/// Scale after a wheel step of `delta` units.
///
/// `delta > 0` shrinks the scale linearly (`old - delta * k * old`), anything
/// else grows it (`old / (1 + delta * k)`). The result may be non-positive or
/// non-finite; callers reject it.
#[must_use]
pub fn scrolled_scale(scale: f64, delta: f64, sensitivity: f64) -> f64 {
    if delta > 0.0 {
        scale - delta * sensitivity * scale
    } else {
        scale / (1.0 + delta * sensitivity)
    }
}

#[must_use]
pub fn home_scale(raster: RasterSize) -> f64 {
    HOME_PLANE_WIDTH / f64::from(raster.width.max(1))
}

fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}
