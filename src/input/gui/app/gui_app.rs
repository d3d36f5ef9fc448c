use std::time::Instant;

use tracing::{debug, error, info, warn};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::error::EventLoopError;
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::PhysicalKey;
use winit::window::Window;

use crate::controllers::interactive::InteractiveController;
use crate::controllers::interactive::scheduler::{RenderScheduler, SchedulerAction};
use crate::controllers::session::commands::{Command, Modifiers, RouterOutcome};
use crate::controllers::session::router::InteractionRouter;
use crate::controllers::session::state::SessionState;
use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;
use crate::input::gui::app::ports::presenter::{GuiPresenterPort, PresentedFrame};
use crate::input::gui::events::GuiEvent;
use crate::input::gui::mapping;

pub const WINDOW_TITLE: &str = "Fractal Explorer";

pub struct GuiApp<T: GuiPresenterPort> {
    window: &'static Window,
    state: SessionState,
    router: InteractionRouter,
    presenter: T,
    controller: InteractiveController,
    scheduler: RenderScheduler,
    modifiers: Modifiers,
    cursor: PixelPoint,
    last_tick: Instant,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(
        window: &'static Window,
        state: SessionState,
        router: InteractionRouter,
        presenter: T,
        controller: InteractiveController,
    ) -> Self {
        Self {
            window,
            cursor: state.window.center(),
            state,
            router,
            presenter,
            controller,
            scheduler: RenderScheduler::new(),
            modifiers: Modifiers::default(),
            last_tick: Instant::now(),
        }
    }

    /// Runs the event loop until the window closes or `Quit` is issued.
    pub fn run(mut self, event_loop: EventLoop<GuiEvent>) -> Result<(), EventLoopError> {
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, window_id } if window_id == self.window.id() => {
                self.handle_window_event(event, elwt);
            }
            Event::UserEvent(GuiEvent::Wake) => {
                self.window.request_redraw();
            }
            Event::AboutToWait => {
                self.advance(elwt);
            }
            Event::LoopExiting => {
                info!("shutting down render worker");
                self.controller.shutdown();
            }
            _ => {}
        })
    }

    fn handle_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<GuiEvent>) {
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Err(err) = self.presenter.resize_surface(size.width, size.height) {
                    warn!(error = %err, "surface resize failed");
                }
                self.router
                    .on_window_resized(&mut self.state, RasterSize::new(size.width, size.height));
                self.window.request_redraw();
            }
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = mapping::modifiers(state.state());
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = mapping::pointer_position(position);
                self.router.on_pointer_move(&mut self.state, self.cursor);
                if self.state.dragging_marker {
                    self.window.request_redraw();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = mapping::pointer_button(button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => {
                        self.router
                            .on_pointer_down(&mut self.state, self.cursor, button);
                    }
                    ElementState::Released => {
                        self.router.on_pointer_up(&mut self.state, self.cursor, button);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = mapping::scroll_delta(delta);
                self.router
                    .on_scroll(&mut self.state, self.cursor, delta_y, self.modifiers);
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event, elwt),
            WindowEvent::RedrawRequested => self.redraw(elwt),
            _ => {}
        }
    }

    fn handle_key(&mut self, event: KeyEvent, elwt: &EventLoopWindowTarget<GuiEvent>) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(command) = mapping::key_command(code) else {
            return;
        };

        let raster = self.state.raster;
        if self.router.on_command(&mut self.state, command, self.modifiers) == RouterOutcome::Quit {
            elwt.exit();
            return;
        }

        if command == Command::ResizeToWindow && self.state.raster != raster {
            if let Err(err) = self.presenter.resize_buffer(self.state.raster) {
                error!(error = %err, "framebuffer resize failed");
                elwt.exit();
            }
        }
    }

    fn redraw(&mut self, elwt: &EventLoopWindowTarget<GuiEvent>) {
        let marker = self.state.marker_pixel();
        let radius = self.router.settings().marker_radius;

        match self.presenter.render(marker, radius) {
            Ok(Some(frame)) => self.frame_presented(frame),
            Ok(None) => {}
            Err(err) => {
                error!(error = %err, "render failed");
                elwt.exit();
            }
        }
    }

    fn frame_presented(&mut self, frame: PresentedFrame) {
        let settled = self.scheduler.frame_presented(frame.generation, &mut self.state);
        debug!(generation = frame.generation, settled, "frame presented");

        let diagnostics = self.state.diagnostics(Some(frame.render_duration));
        self.window
            .set_title(&format!("{WINDOW_TITLE} | {diagnostics}"));
    }

    /// Steps the animation and hands the current view to the scheduler.
    fn advance(&mut self, elwt: &EventLoopWindowTarget<GuiEvent>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        if self.state.animation.is_active() {
            self.router.tick(&mut self.state, elapsed, self.modifiers);
        }

        let animating = self.state.animation.is_active();
        let completed = self.controller.last_completed_generation();
        let controller = &self.controller;
        let action = self
            .scheduler
            .poll(&self.state, completed, |request| controller.submit_request(request));
        if let SchedulerAction::Submitted { generation } = action {
            debug!(generation, animating, "render submitted");
        }

        if self.state.dragging_marker || animating {
            self.window.request_redraw();
        }

        elwt.set_control_flow(if animating {
            ControlFlow::Poll
        } else {
            ControlFlow::Wait
        });
    }
}
