//! Replay a scripted gesture session against the mock sky and report what was tapped.
use std::time::{Duration, Instant};

use skymap::catalog::mock::MockCatalog;
use skymap::celestial::CelestialObject;
use skymap::config::ViewConfig;
use skymap::gesture::animation::AnimationStep;
use skymap::gesture::GestureEvent;
use skymap::sky_view::{SkyView, ViewUpdate};
use skymap::skymap_errors::SkyMapError;

/// 60 Hz frame interval used to drive animations.
const FRAME: Duration = Duration::from_millis(16);

fn run_animation(view: &mut SkyView, update: &ViewUpdate, start: Instant) -> usize {
    let ViewUpdate::Animating(handle) = update else {
        return 0;
    };
    let mut frames = 0;
    let mut now = start;
    while let Some(step) = view.tick_animation(*handle, now) {
        frames += 1;
        if let AnimationStep::Finished(_) = step {
            break;
        }
        now += FRAME;
    }
    frames
}

fn main() -> Result<(), SkyMapError> {
    tracing_subscriber::fmt::init();

    let mut view = SkyView::new(ViewConfig::default());
    view.set_viewport_size(1080.0, 1920.0);
    view.update_objects(MockCatalog::default().generate()?);
    view.set_tap_listener(|object: &CelestialObject| println!("listener: {object}"));

    let start = Instant::now();
    let session = [
        GestureEvent::Scale { raw_factor: 1.8 },
        GestureEvent::Drag { dx: -120.0, dy: 60.0 },
        GestureEvent::Tap { x: 540.0, y: 960.0 },
        GestureEvent::Tap { x: 10.0, y: 10.0 },
        GestureEvent::DoubleTap,
    ];
    for event in session {
        let update = view.handle_gesture(event, start);
        let frames = run_animation(&mut view, &update, start);
        println!(
            "{event:?} -> {update:?} (zoom {:.2}, pan {:?}, {frames} animation frames)",
            view.transform().zoom(),
            view.transform().pan()
        );
    }

    // bring the brightest visible star to the centre
    let target = view
        .objects()
        .iter()
        .filter(|o| view.positions().get(o.id()).is_some_and(|p| p.is_visible()))
        .min_by(|a, b| a.magnitude().total_cmp(&b.magnitude()))
        .map(|o| o.id().to_string());
    if let Some(id) = target {
        if let Some(handle) = view.center_on_object(&id, start) {
            let frames = run_animation(&mut view, &ViewUpdate::Animating(handle), start);
            println!("centred {id} in {frames} frames, pan {:?}", view.transform().pan());
        }
    }
    Ok(())
}
