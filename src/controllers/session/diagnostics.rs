use std::fmt;
use std::time::Duration;

/// Advisory numbers a host may show next to the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub max_iter: u32,
    /// Plane units spanned by one pixel.
    pub units_per_pixel: f64,
    /// `1 / (scale * width)`.
    pub zoom: f64,
    pub frame_time: Option<Duration>,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iter {} | {:.3e} units/px | zoom {:.3e}",
            self.max_iter, self.units_per_pixel, self.zoom
        )?;
        if let Some(frame_time) = self.frame_time {
            write!(f, " | {:.1} ms", frame_time.as_secs_f64() * 1000.0)?;
        }

        Ok(())
    }
}
