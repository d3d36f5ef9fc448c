use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use fractal_explorer::controllers::interactive::{InteractiveControllerPresenterPort, RenderEvent};
use fractal_explorer::core::actions::equalize::{EqualizerSettings, HistogramTable};
use fractal_explorer::core::data::colour::Colour;
use fractal_explorer::core::data::point::PixelPoint;
use fractal_explorer::core::data::raster::RasterSize;
use fractal_explorer::core::fractals::mode::FractalMode;
use fractal_explorer::core::fractals::params::FractalParameters;
use fractal_explorer::{
    Command, FramePipeline, InteractionRouter, InteractiveController, Modifiers, PipelineOutcome,
    PointerButton, RouterOutcome, SessionState,
};

const EPSILON: f64 = 1e-9;

fn home_session() -> SessionState {
    SessionState::new(
        RasterSize::new(800, 500),
        FractalParameters::default(),
        EqualizerSettings::default(),
    )
}

#[test]
fn home_view_centre_is_interior_and_black() {
    let mut state = home_session();
    let mut pipeline = FramePipeline::new();

    let outcome = pipeline.run(&mut state).unwrap();

    assert!(matches!(outcome, PipelineOutcome::Rendered { .. }));
    assert!(!state.dirty);
    let centre = state.view.pixel_to_plane(PixelPoint::new(400.0, 250.0));
    assert!(centre.real.abs() < EPSILON && centre.imag.abs() < EPSILON);
    let buffer = pipeline.colour_buffer().unwrap();
    assert_eq!(buffer.pixel(400, 250), Some(Colour::BLACK));
}

#[test]
fn scrolling_five_notches_zooms_about_the_pointer() {
    let router = InteractionRouter::default();
    let mut state = home_session();
    state.dirty = false;
    let offset = state.view.offset();

    let changed = router.on_scroll(
        &mut state,
        PixelPoint::new(400.0, 250.0),
        5.0,
        Modifiers::default(),
    );

    assert!(changed);
    assert!(state.dirty);
    assert!((state.view.scale() - 0.00425).abs() < EPSILON);
    assert!((state.view.offset().x - offset.x).abs() < EPSILON);
    assert!((state.view.offset().y - offset.y).abs() < EPSILON);
}

#[test]
fn occupied_buckets_compact_to_dense_indices() {
    let mut counts = vec![0u32; 12];
    for bucket in [2, 5, 5, 9] {
        counts[bucket] += 1;
    }

    let table = HistogramTable::from_counts(&counts);

    assert_eq!(table.index_of(2), Some(1));
    assert_eq!(table.index_of(5), Some(2));
    assert_eq!(table.index_of(9), Some(3));
    assert_eq!(table.total(), 3);
}

#[test]
fn reset_after_exploring_returns_to_home_scale() {
    let router = InteractionRouter::default();
    let mut state = home_session();
    let none = Modifiers::default();

    for _ in 0..10 {
        router.on_scroll(&mut state, PixelPoint::new(120.0, 80.0), 3.0, none);
    }
    router.on_pointer_down(&mut state, PixelPoint::new(300.0, 300.0), PointerButton::Primary);
    router.on_pointer_move(&mut state, PixelPoint::new(350.0, 260.0));
    router.on_pointer_up(&mut state, PixelPoint::new(350.0, 260.0), PointerButton::Primary);
    assert!(state.view.scale() < 0.005);

    assert_eq!(
        router.on_command(&mut state, Command::ResetView, none),
        RouterOutcome::Continue
    );
    let mut ticks = 0;
    while state.animation.is_active() {
        router.tick(&mut state, Duration::from_millis(16), none);
        ticks += 1;
        assert!(ticks < 10_000, "reset never finished");
    }

    assert!(state.view.scale() >= 0.005);
    assert!(state.view.scale() < 0.005 * 1.01);
    assert_eq!(state.params.max_iter, 140);
}

#[test]
fn dragging_the_julia_marker_moves_the_constant() {
    let router = InteractionRouter::default();
    let mut state = home_session();
    let none = Modifiers::default();
    router.on_command(&mut state, Command::ToggleJulia, none);
    assert_eq!(state.params.mode, FractalMode::Julia);

    let marker = state.marker_pixel().unwrap();
    let target = PixelPoint::new(marker.x + 40.0, marker.y - 25.0);
    router.on_pointer_down(&mut state, marker, PointerButton::Primary);
    router.on_pointer_move(&mut state, target);
    router.on_pointer_up(&mut state, target, PointerButton::Primary);

    let expected = state.view.pixel_to_plane(target);
    assert!((state.params.c.real - expected.real).abs() < EPSILON);
    assert!((state.params.c.imag - expected.imag).abs() < EPSILON);
    assert!(state.dirty);
}

#[derive(Default)]
struct Collector {
    events: Mutex<Vec<RenderEvent>>,
}

impl InteractiveControllerPresenterPort for Collector {
    fn present(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[test]
fn worker_renders_the_session_request() {
    let collector = Arc::new(Collector::default());
    let mut controller = InteractiveController::new(collector.clone());
    let mut state = home_session();
    state.raster = RasterSize::new(160, 100);
    state.view = fractal_explorer::core::view::transform::ViewTransform::home(state.raster);
    state.refresh_max_iter();

    let generation = controller.submit_request(Arc::new(state.render_request()));

    let deadline = Instant::now() + Duration::from_secs(10);
    while controller.last_completed_generation() < generation && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    controller.shutdown();

    let events = collector.events.lock().unwrap();
    match events.last() {
        Some(RenderEvent::Frame(frame)) => {
            assert_eq!(frame.generation, generation);
            assert_eq!(frame.colour_buffer.raster(), state.raster);
            assert_eq!(frame.max_iter, state.params.max_iter);
        }
        other => panic!("expected a frame, got {other:?}"),
    }
}
