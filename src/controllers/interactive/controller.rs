use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::equalize::{EqualizeError, equalize_cancelable};
use crate::core::actions::evaluate_frame::evaluate_escape_buffer;
use crate::core::data::colour_buffer::ColourBuffer;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, warn};

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, Arc<RenderRequest>)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

/// Renders requests on a background thread.
///
/// Only the newest submitted request is ever presented: submitting bumps the
/// generation, which cancels the job in progress and replaces any queued one.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(presenter_port: Arc<dyn InteractiveControllerPresenterPort>) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    pub fn submit_request(&self, request: Arc<RenderRequest>) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = Some((generation, request));
        }

        self.shared.wake.notify_one();

        generation
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("render worker panicked");
            }
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let (job_generation, request) = {
                let mut guard = shared
                    .latest_request
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(job) = guard.take() {
                        break job;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let cancel_token = || {
                shared.shutdown.load(Ordering::Relaxed)
                    || job_generation != shared.generation.load(Ordering::Relaxed)
            };

            let start = Instant::now();
            let result = Self::render_request(&request, &cancel_token);
            let render_duration = start.elapsed();

            let event = match result {
                Ok(colour_buffer) => {
                    info!(
                        generation = job_generation,
                        width = request.raster.width,
                        height = request.raster.height,
                        max_iter = request.params.max_iter,
                        ?render_duration,
                        "frame rendered"
                    );
                    RenderEvent::Frame(FrameData {
                        generation: job_generation,
                        colour_buffer,
                        max_iter: request.params.max_iter,
                        render_duration,
                    })
                }
                Err(RenderOutcome::Cancelled) => {
                    debug!(generation = job_generation, "render cancelled");
                    continue;
                }
                Err(RenderOutcome::Error(message)) => {
                    warn!(generation = job_generation, error = %message, "render failed");
                    RenderEvent::Error(RenderError {
                        generation: job_generation,
                        message,
                    })
                }
            };

            if job_generation != shared.generation.load(Ordering::Acquire) {
                continue;
            }

            shared
                .last_completed_generation
                .store(job_generation, Ordering::Release);
            shared.presenter_port.present(event);
        }
    }

    fn render_request<C: CancelToken>(
        request: &RenderRequest,
        cancel: &C,
    ) -> Result<ColourBuffer, RenderOutcome> {
        let raw = evaluate_escape_buffer(request.raster, request.view, request.params, cancel)
            .map_err(|e| {
                if e.is_cancelled() {
                    RenderOutcome::Cancelled
                } else {
                    RenderOutcome::Error(e.to_string())
                }
            })?;

        if cancel.is_cancelled() {
            return Err(RenderOutcome::Cancelled);
        }

        equalize_cancelable(&raw, &request.equalizer, cancel).map_err(|e| match e {
            EqualizeError::Cancelled(_) => RenderOutcome::Cancelled,
            EqualizeError::ColourBuffer(err) => RenderOutcome::Error(err.to_string()),
        })
    }
}

enum RenderOutcome {
    Cancelled,
    Error(String),
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::controllers::session::commands::{Command, Modifiers};
    use crate::controllers::session::router::{InteractionRouter, RouterSettings};
    use crate::controllers::session::state::SessionState;
    use crate::core::actions::equalize::EqualizerSettings;
    use crate::core::data::point::PixelPoint;
    use crate::core::data::raster::RasterSize;
    use crate::core::fractals::params::FractalParameters;
    use crate::core::view::transform::ViewTransform;

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl InteractiveControllerPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn wait_for_events(sink: &MockPresenterPort, timeout: Duration) -> Vec<RenderEvent> {
        let start = Instant::now();
        loop {
            let events = sink.take_events();
            if !events.is_empty() || start.elapsed() >= timeout {
                return events;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn test_raster() -> RasterSize {
        RasterSize::new(4, 4)
    }

    fn create_test_request() -> RenderRequest {
        let raster = test_raster();
        RenderRequest {
            raster,
            view: ViewTransform::home(raster),
            params: FractalParameters {
                max_iter: 10,
                ..Default::default()
            },
            equalizer: EqualizerSettings::default(),
        }
    }

    // Pixel (2, 0) sits two units right of the offset, so a huge scale
    // overflows to infinity there.
    fn create_error_request() -> RenderRequest {
        RenderRequest {
            view: ViewTransform::new(f64::MAX, PixelPoint::ORIGIN).unwrap(),
            ..create_test_request()
        }
    }

    fn new_controller() -> (Arc<MockPresenterPort>, InteractiveController) {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let controller = InteractiveController::new(
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>
        );
        (presenter_port, controller)
    }

    #[test]
    fn submit_request_emits_frame() {
        let (presenter_port, mut controller) = new_controller();

        let generation = controller.submit_request(Arc::new(create_test_request()));
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events.is_empty(), "expected a render event");

        let mut saw_frame = false;
        for event in events {
            match event {
                RenderEvent::Frame(frame) => {
                    assert_eq!(frame.generation, generation);
                    assert!(generation > 0, "generation should be non-zero");
                    assert_eq!(frame.colour_buffer.raster(), test_raster());
                    assert_eq!(frame.colour_buffer.buffer().len(), test_raster().rgb_len());
                    assert_eq!(frame.max_iter, 10);
                    saw_frame = true;
                }
                RenderEvent::Error(error) => {
                    panic!("unexpected render error: {}", error.message);
                }
            }
        }

        assert!(saw_frame, "expected a frame event");
        controller.shutdown();
    }

    #[test]
    fn generation_ids_increment() {
        let (presenter_port, mut controller) = new_controller();
        let request = Arc::new(create_test_request());

        controller.submit_request(Arc::clone(&request));
        let events_a = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        let gen_a = extract_generation(&events_a);

        controller.submit_request(Arc::clone(&request));
        let events_b = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        let gen_b = extract_generation(&events_b);

        assert!(gen_b > gen_a, "generation {} should follow {}", gen_b, gen_a);

        controller.shutdown();
    }

    fn extract_generation(events: &[RenderEvent]) -> u64 {
        events
            .iter()
            .map(RenderEvent::generation)
            .next()
            .expect("should have at least one event with a generation")
    }

    #[test]
    fn last_completed_generation_starts_at_zero() {
        let (_presenter_port, mut controller) = new_controller();

        assert_eq!(controller.last_completed_generation(), 0);

        controller.shutdown();
    }

    #[test]
    fn last_completed_generation_updates_after_frame_completion() {
        let (presenter_port, mut controller) = new_controller();

        let submitted_generation = controller.submit_request(Arc::new(create_test_request()));
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        assert_eq!(extract_generation(&events), submitted_generation);
        assert_eq!(controller.last_completed_generation(), submitted_generation);

        controller.shutdown();
    }

    #[test]
    fn non_finite_plane_point_is_reported_as_error() {
        let (presenter_port, mut controller) = new_controller();

        let submitted_generation = controller.submit_request(Arc::new(create_error_request()));
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        let error = events
            .iter()
            .find_map(|event| match event {
                RenderEvent::Error(error) => Some(error),
                RenderEvent::Frame(_) => None,
            })
            .expect("expected an error event");
        assert_eq!(error.generation, submitted_generation);
        assert!(error.message.contains("representable plane"), "{}", error.message);
        assert_eq!(controller.last_completed_generation(), submitted_generation);

        controller.shutdown();
    }

    #[test]
    fn last_completed_generation_is_monotonic_across_mixed_completions() {
        let (presenter_port, mut controller) = new_controller();

        let frame_generation = controller.submit_request(Arc::new(create_test_request()));
        let frame_events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert_eq!(extract_generation(&frame_events), frame_generation);
        let after_frame = controller.last_completed_generation();

        let error_generation = controller.submit_request(Arc::new(create_error_request()));
        let error_events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert_eq!(extract_generation(&error_events), error_generation);
        let after_error = controller.last_completed_generation();

        let frame_generation_2 = controller.submit_request(Arc::new(create_test_request()));
        let frame_events_2 = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert_eq!(extract_generation(&frame_events_2), frame_generation_2);
        let after_frame_2 = controller.last_completed_generation();

        assert!(after_frame >= frame_generation);
        assert!(after_error >= after_frame);
        assert!(after_frame_2 >= after_error);

        controller.shutdown();
    }

    #[test]
    fn rapid_requests_do_not_emit_cancellation_errors() {
        let (presenter_port, mut controller) = new_controller();
        let request = Arc::new(create_test_request());

        let mut last_generation = 0;
        for _ in 0..5 {
            last_generation = controller.submit_request(Arc::clone(&request));
        }

        thread::sleep(Duration::from_millis(500));
        let events = presenter_port.take_events();

        for event in &events {
            if let RenderEvent::Error(err) = event {
                panic!("cancellation must not emit errors: {}", err.message);
            }
        }

        let max_emitted = events.iter().map(RenderEvent::generation).max().unwrap_or(0);
        assert!(max_emitted > 0, "expected at least one frame");
        assert!(max_emitted <= last_generation);

        controller.shutdown();
    }

    #[test]
    fn shutdown_is_idempotent() {
        let (_presenter_port, mut controller) = new_controller();

        controller.shutdown();
        controller.shutdown();
    }

    #[test]
    fn session_change_during_a_render_discards_the_older_view() {
        let router = InteractionRouter::new(RouterSettings {
            iteration_step: 10_000,
            ..RouterSettings::default()
        });
        let mut state = SessionState::new(
            RasterSize::new(160, 100),
            FractalParameters::default(),
            EqualizerSettings::default(),
        );
        router.on_command(&mut state, Command::IncreaseIterations, Modifiers::default());
        assert!(state.params.max_iter > 10_000);

        let (presenter_port, mut controller) = new_controller();
        let stale = controller.submit_request(Arc::new(state.render_request()));

        router.on_command(&mut state, Command::DecreaseIterations, Modifiers::default());
        assert!(state.params.max_iter < 1_000);
        let fresh = controller.submit_request(Arc::new(state.render_request()));

        let start = Instant::now();
        let mut frames = Vec::new();
        while frames.last().is_none_or(|frame: &FrameData| frame.generation != fresh)
            && start.elapsed() < Duration::from_secs(20)
        {
            for event in wait_for_events(presenter_port.as_ref(), Duration::from_millis(100)) {
                match event {
                    RenderEvent::Frame(frame) => frames.push(frame),
                    RenderEvent::Error(error) => {
                        panic!("unexpected render error: {}", error.message)
                    }
                }
            }
        }

        assert_eq!(controller.last_completed_generation(), fresh);
        assert!(frames.iter().all(|frame| frame.generation != stale));
        let frame = frames.last().expect("expected the newest frame");
        assert_eq!(frame.generation, fresh);
        assert_eq!(frame.max_iter, state.params.max_iter);
        assert_eq!(frame.colour_buffer.raster(), state.raster);

        controller.shutdown();
    }
}
