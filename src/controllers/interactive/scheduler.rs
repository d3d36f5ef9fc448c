use std::sync::Arc;

use tracing::trace;

use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::session::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerAction {
    Submitted { generation: u64 },
    /// A newer request is parked until the in-flight render finishes.
    Deferred,
    Idle,
}

/// Decides when the session's current values are handed to the render worker.
///
/// A request is built only while the session is dirty, and only handed over
/// when it differs from the last one. During an animation at most one render
/// is in flight; newer requests replace each other in a single parked slot.
/// Outside animation every change is submitted at once and the worker cancels
/// the older job.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    requested: Option<RenderRequest>,
    parked: bool,
    in_flight: Option<u64>,
    latest_generation: u64,
}

impl RenderScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs once per host tick, after input and animation have updated `state`.
    pub fn poll(
        &mut self,
        state: &SessionState,
        last_completed_gen: u64,
        submit: impl FnOnce(Arc<RenderRequest>) -> u64,
    ) -> SchedulerAction {
        self.retire(last_completed_gen);

        if state.dirty {
            let request = state.render_request();
            if self.requested != Some(request) {
                self.requested = Some(request);
                self.parked = true;
            }
        }

        if !self.parked {
            return SchedulerAction::Idle;
        }
        if self.in_flight.is_some() && state.animation.is_active() {
            trace!(in_flight = ?self.in_flight, "request deferred");
            return SchedulerAction::Deferred;
        }
        let Some(request) = self.requested else {
            return SchedulerAction::Idle;
        };

        self.parked = false;
        let generation = submit(Arc::new(request));
        self.in_flight = Some(generation);
        self.latest_generation = generation;

        SchedulerAction::Submitted { generation }
    }

    /// Records that `generation` reached the screen. Clears `state.dirty` when
    /// that frame shows the session's current values; returns whether it did.
    pub fn frame_presented(&mut self, generation: u64, state: &mut SessionState) -> bool {
        self.retire(generation);

        let settled = generation == self.latest_generation
            && !self.parked
            && self.requested == Some(state.render_request());
        if settled {
            state.dirty = false;
        }

        settled
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.parked
    }

    #[must_use]
    pub fn in_flight_generation(&self) -> Option<u64> {
        self.in_flight
    }

    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    fn retire(&mut self, completed: u64) {
        if self.in_flight.is_some_and(|generation| completed >= generation) {
            self.in_flight = None;
        }
    }
}
