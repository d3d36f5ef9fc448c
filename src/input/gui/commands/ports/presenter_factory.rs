use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use crate::core::data::raster::RasterSize;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::events::GuiEvent;

pub trait GuiPresenterFactoryPort<T: GuiPresenterPort> {
    type Error: std::error::Error + 'static;

    fn build(
        &self,
        window: &'static Window,
        raster: RasterSize,
        event_loop_proxy: EventLoopProxy<GuiEvent>,
    ) -> Result<T, Self::Error>;
}
