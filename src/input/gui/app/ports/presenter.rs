use std::sync::Arc;
use std::time::Duration;

use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentedFrame {
    pub generation: u64,
    pub render_duration: Duration,
}

pub trait GuiPresenterPort {
    type Error: std::error::Error + 'static;

    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort>;
    /// Draws the newest frame plus the optional marker ring. Returns the frame
    /// that became visible during this call, if any.
    fn render(
        &mut self,
        marker: Option<PixelPoint>,
        marker_radius: f64,
    ) -> Result<Option<PresentedFrame>, Self::Error>;
    fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;
    fn resize_buffer(&mut self, raster: RasterSize) -> Result<(), Self::Error>;
    fn last_render_duration(&self) -> Option<Duration>;
}
