use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;

pub const MARKER_COLOUR: [u8; 4] = [255, 255, 255, 255];

/// Draws a ring of `radius` pixels around `centre` into an RGBA frame.
///
/// Parts of the ring outside the raster are clipped. Returns the number of
/// pixels written.
pub fn draw_marker(frame: &mut [u8], raster: RasterSize, centre: PixelPoint, radius: f64) -> usize {
    if raster.is_degenerate()
        || frame.len() != raster.pixel_count() * 4
        || !centre.is_finite()
        || !(radius.is_finite() && radius > 0.0)
    {
        return 0;
    }

    let inner = (radius - 1.0).max(0.0);
    let (inner_sq, outer_sq) = (inner * inner, radius * radius);
    let min_x = (centre.x - radius).floor().max(0.0);
    let max_x = (centre.x + radius).ceil().min(f64::from(raster.width - 1));
    let min_y = (centre.y - radius).floor().max(0.0);
    let max_y = (centre.y + radius).ceil().min(f64::from(raster.height - 1));
    if min_x > max_x || min_y > max_y {
        return 0;
    }

    let mut written = 0;
    for y in (min_y as u32)..=(max_y as u32) {
        for x in (min_x as u32)..=(max_x as u32) {
            let distance_sq = PixelPoint::new(f64::from(x), f64::from(y)).distance_squared(centre);
            if distance_sq < inner_sq || distance_sq > outer_sq {
                continue;
            }

            let index = (y as usize * raster.width as usize + x as usize) * 4;
            frame[index..index + 4].copy_from_slice(&MARKER_COLOUR);
            written += 1;
        }
    }

    written
}
