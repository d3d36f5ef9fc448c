use std::time::Duration;

use tracing::debug;

use crate::config::ExplorerConfig;
use crate::controllers::session::commands::{Command, Modifiers, PointerButton, RouterOutcome};
use crate::controllers::session::state::SessionState;
use crate::core::animation::{
    AnimationKind, AnimationSettings, AnimationStepReport, ResetOutcome, step_animation,
};
use crate::core::data::point::PixelPoint;
use crate::core::data::raster::RasterSize;
use crate::core::view::iterations::MAX_MAX_ITER;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterSettings {
    pub animation: AnimationSettings,
    pub iteration_step: i32,
    pub marker_radius: f64,
    pub scroll_speed_multiplier: f64,
}

impl From<&ExplorerConfig> for RouterSettings {
    fn from(config: &ExplorerConfig) -> Self {
        Self {
            animation: config.animation,
            iteration_step: config.iteration_step,
            marker_radius: config.marker_radius,
            scroll_speed_multiplier: config.scroll_speed_multiplier,
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self::from(&ExplorerConfig::default())
    }
}

/// Turns host input into session changes.
///
/// Pointer positions are given in window pixels and mapped onto the raster.
/// Every handler that changes what the image shows sets `state.dirty`.
#[derive(Debug, Clone, Default)]
pub struct InteractionRouter {
    settings: RouterSettings,
}

impl InteractionRouter {
    #[must_use]
    pub fn new(settings: RouterSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Zooms about the pointer. Positive `delta_y` zooms in. The speed
    /// modifier only changes the delta when `scroll_speed_multiplier` is set.
    pub fn on_scroll(
        &self,
        state: &mut SessionState,
        window_pointer: PixelPoint,
        delta_y: f64,
        modifiers: Modifiers,
    ) -> bool {
        let pointer = self.update_pointer(state, window_pointer);
        let delta = if modifiers.speed {
            delta_y * self.settings.scroll_speed_multiplier
        } else {
            delta_y
        };

        state.animation.cancel();
        if !state
            .view
            .scroll_zoom(pointer, delta, self.settings.animation.zoom_sensitivity)
        {
            return false;
        }

        view_changed(state);
        true
    }

    pub fn on_pointer_down(
        &self,
        state: &mut SessionState,
        window_pointer: PixelPoint,
        button: PointerButton,
    ) {
        let pointer = self.update_pointer(state, window_pointer);

        match button {
            PointerButton::Middle => {
                if state.animation.kind() == Some(AnimationKind::HoldToZoom) {
                    state.animation.cancel();
                } else {
                    debug!(x = pointer.x, y = pointer.y, "hold zoom started");
                    state.animation.start_hold_zoom(pointer);
                }
            }
            PointerButton::Primary | PointerButton::Secondary => {
                if self.grabs_marker(state, pointer) {
                    state.dragging_marker = true;
                } else {
                    state.pan_anchor = Some(pointer);
                }
            }
        }
    }

    pub fn on_pointer_move(&self, state: &mut SessionState, window_pointer: PixelPoint) {
        let pointer = self.update_pointer(state, window_pointer);
        state.animation.track_pointer(pointer);

        if state.dragging_marker {
            let c = state.view.pixel_to_plane(pointer);
            if c.is_finite() && c != state.params.c {
                state.params.c = c;
                state.mark_dirty();
            }
            return;
        }

        if let Some(anchor) = state.pan_anchor {
            if state.view.pan(pointer - anchor) {
                state.animation.cancel();
                state.mark_dirty();
            }
            state.pan_anchor = Some(pointer);
        }
    }

    pub fn on_pointer_up(
        &self,
        state: &mut SessionState,
        window_pointer: PixelPoint,
        button: PointerButton,
    ) {
        self.update_pointer(state, window_pointer);

        match button {
            PointerButton::Middle => {
                if state.animation.release_hold() {
                    debug!("hold zoom released");
                }
            }
            PointerButton::Primary | PointerButton::Secondary => {
                state.pan_anchor = None;
                state.dragging_marker = false;
            }
        }
    }

    pub fn on_command(
        &self,
        state: &mut SessionState,
        command: Command,
        modifiers: Modifiers,
    ) -> RouterOutcome {
        debug!(?command, "command");

        match command {
            Command::Quit => return RouterOutcome::Quit,
            Command::ResetView => {
                let outcome =
                    state
                        .animation
                        .start_reset(&mut state.view, state.raster, modifiers.alternate);
                debug!(?outcome, "reset view");
                if outcome == ResetOutcome::Snapped {
                    view_changed(state);
                }
            }
            Command::ToggleHistogram => {
                state.equalizer.enabled = !state.equalizer.enabled;
                state.mark_dirty();
            }
            Command::ResizeToWindow => {
                let window = state.window;
                if window != state.raster && !window.is_degenerate() {
                    state.view.resize(state.raster, window);
                    state.raster = window;
                    state.mark_dirty();
                }
            }
            Command::DecreaseIterations => {
                self.shift_iterations(state, -self.settings.iteration_step);
            }
            Command::IncreaseIterations => {
                self.shift_iterations(state, self.settings.iteration_step);
            }
            Command::ToggleJulia => {
                state.params.mode = state.params.mode.toggled();
                state.mark_dirty();
            }
            Command::TogglePinnedConstant => {
                state.params.pinned = !state.params.pinned;
                if !state.params.marker_visible() {
                    state.dragging_marker = false;
                }
                state.mark_dirty();
            }
        }

        RouterOutcome::Continue
    }

    /// Records a new window size. The raster keeps its size until
    /// [`Command::ResizeToWindow`].
    pub fn on_window_resized(&self, state: &mut SessionState, size: RasterSize) {
        debug!(width = size.width, height = size.height, "window resized");
        state.window = size;
    }

    /// Advances the running animation.
    pub fn tick(
        &self,
        state: &mut SessionState,
        elapsed: Duration,
        modifiers: Modifiers,
    ) -> AnimationStepReport {
        let report = step_animation(
            &mut state.animation,
            &mut state.view,
            elapsed.as_secs_f64(),
            modifiers.speed,
            &self.settings.animation,
        );

        if report.changed {
            view_changed(state);
        }
        if report.finished {
            debug!(scale = state.view.scale(), "animation finished");
        }

        report
    }

    fn update_pointer(&self, state: &mut SessionState, window_pointer: PixelPoint) -> PixelPoint {
        let pointer = state.raster.rescale_from(window_pointer, state.window);
        if pointer.is_finite() {
            state.pointer = pointer;
        }
        state.pointer
    }

    fn grabs_marker(&self, state: &SessionState, pointer: PixelPoint) -> bool {
        let radius = self.settings.marker_radius;
        state
            .marker_pixel()
            .is_some_and(|marker| marker.distance_squared(pointer) <= radius * radius)
    }

    fn shift_iterations(&self, state: &mut SessionState, step: i32) {
        let bound = MAX_MAX_ITER as i32;
        let offset = state
            .params
            .iter_offset
            .saturating_add(step)
            .clamp(-bound, bound);
        if offset == state.params.iter_offset {
            return;
        }

        state.params.iter_offset = offset;
        let previous = state.params.max_iter;
        state.refresh_max_iter();
        if state.params.max_iter != previous {
            state.mark_dirty();
        }
    }
}

fn view_changed(state: &mut SessionState) {
    state.refresh_max_iter();
    state.mark_dirty();
}
