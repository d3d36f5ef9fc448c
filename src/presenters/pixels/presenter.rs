use std::sync::Arc;
use std::time::Duration;

use pixels::{Pixels, SurfaceTexture};
use tracing::warn;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use crate::adapters::overlay::draw_marker;
use crate::adapters::pixel_format::copy_rgb_to_rgba;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::data::colour_buffer::ColourBuffer;
use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;
use crate::input::gui::app::ports::presenter::{GuiPresenterPort, PresentedFrame};
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::adapter::PixelsAdapter;

/// Shows worker frames in a `pixels` framebuffer sized to the raster; `pixels`
/// scales it to the window surface.
pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    adapter: Arc<PixelsAdapter>,
    raster: RasterSize,
    frame: Option<ColourBuffer>,
    last_presented_generation: u64,
    last_render_duration: Option<Duration>,
}

impl PixelsPresenter {
    pub fn new(
        window: &'static Window,
        raster: RasterSize,
        event_loop_proxy: EventLoopProxy<GuiEvent>,
    ) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(raster.width.max(1), raster.height.max(1), surface_texture)?;

        Ok(Self {
            pixels,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            raster,
            frame: None,
            last_presented_generation: 0,
            last_render_duration: None,
        })
    }

    /// Takes the newest worker event; keeps frames that are newer than the
    /// one on screen and match the current raster.
    fn accept_event(&mut self) -> Option<PresentedFrame> {
        match self.adapter.take_render_event()? {
            RenderEvent::Frame(frame) => {
                if frame.generation <= self.last_presented_generation
                    || frame.colour_buffer.raster() != self.raster
                {
                    return None;
                }

                self.last_presented_generation = frame.generation;
                self.last_render_duration = Some(frame.render_duration);
                self.frame = Some(frame.colour_buffer);

                Some(PresentedFrame {
                    generation: frame.generation,
                    render_duration: frame.render_duration,
                })
            }
            RenderEvent::Error(error) => {
                warn!(generation = error.generation, error = %error.message, "frame not shown");
                None
            }
        }
    }

    fn draw(&mut self, marker: Option<PixelPoint>, marker_radius: f64) {
        let raster = self.raster;
        let target = self.pixels.frame_mut();

        let copied = self
            .frame
            .as_ref()
            .map(|frame| copy_rgb_to_rgba(frame.buffer(), target));
        match copied {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                warn!(error = %err, "dropping frame with unexpected size");
                self.frame = None;
                fill_black(target);
            }
            None => fill_black(target),
        }

        if let Some(centre) = marker {
            draw_marker(target, raster, centre, marker_radius);
        }
    }
}

impl GuiPresenterPort for PixelsPresenter {
    type Error = pixels::Error;

    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort> {
        Arc::clone(&self.adapter) as Arc<dyn InteractiveControllerPresenterPort>
    }

    fn render(
        &mut self,
        marker: Option<PixelPoint>,
        marker_radius: f64,
    ) -> Result<Option<PresentedFrame>, pixels::Error> {
        let presented = self.accept_event();
        self.draw(marker, marker_radius);
        self.pixels.render()?;

        Ok(presented)
    }

    fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), pixels::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        Ok(self.pixels.resize_surface(width, height)?)
    }

    fn resize_buffer(&mut self, raster: RasterSize) -> Result<(), pixels::Error> {
        if raster.is_degenerate() || raster == self.raster {
            return Ok(());
        }

        self.pixels.resize_buffer(raster.width, raster.height)?;
        self.raster = raster;
        self.frame = None;

        Ok(())
    }

    fn last_render_duration(&self) -> Option<Duration> {
        self.last_render_duration
    }
}

fn fill_black(frame: &mut [u8]) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&[0, 0, 0, u8::MAX]);
    }
}
