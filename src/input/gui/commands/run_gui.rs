use std::marker::PhantomData;

use thiserror::Error;
use tracing::info;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoopBuilder;
use winit::window::{Window, WindowBuilder};

use crate::config::ExplorerConfig;
use crate::controllers::interactive::InteractiveController;
use crate::controllers::session::router::{InteractionRouter, RouterSettings};
use crate::controllers::session::state::SessionState;
use crate::core::data::raster::RasterSize;
use crate::input::gui::app::gui_app::{GuiApp, WINDOW_TITLE};
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::commands::ports::presenter_factory::GuiPresenterFactoryPort;
use crate::input::gui::events::GuiEvent;

const MIN_WINDOW_SIDE: u32 = 200;

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create presenter: {0}")]
    Presenter(Box<dyn std::error::Error>),
}

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: ExplorerConfig,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F, config: ExplorerConfig) -> Self {
        Self {
            presenter_factory,
            config,
            _phantom: PhantomData,
        }
    }

    /// Opens the window and blocks until it is closed.
    pub fn execute(&self) -> Result<(), GuiError> {
        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();
        let raster = self.config.raster();

        // pixels needs the window to outlive its surface.
        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title(WINDOW_TITLE)
                .with_inner_size(PhysicalSize::new(raster.width, raster.height))
                .with_min_inner_size(PhysicalSize::new(MIN_WINDOW_SIDE, MIN_WINDOW_SIDE))
                .build(&event_loop)?,
        ));

        let presenter: P = self
            .presenter_factory
            .build(window, raster, event_loop_proxy)
            .map_err(|err| GuiError::Presenter(Box::new(err)))?;

        let mut state = SessionState::from_config(&self.config);
        let size = window.inner_size();
        if size.width > 0 && size.height > 0 {
            state.window = RasterSize::new(size.width, size.height);
        }

        let controller = InteractiveController::new(presenter.share_adapter());
        let router = InteractionRouter::new(RouterSettings::from(&self.config));

        info!(
            width = raster.width,
            height = raster.height,
            "opening explorer window"
        );
        GuiApp::new(window, state, router, presenter, controller).run(event_loop)?;

        Ok(())
    }
}
