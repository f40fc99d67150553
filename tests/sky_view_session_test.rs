mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{equator_view, now, position_of, star_east_of_zenith, zenith_star};
use skymap::catalog::csv_reader::CsvCatalog;
use skymap::catalog::mock::MockCatalog;
use skymap::catalog::{CatalogLoader, LoadState};
use skymap::gesture::animation::AnimationStep;
use skymap::gesture::GestureEvent;
use skymap::settings::Settings;
use skymap::sky_view::ViewUpdate;
use skymap::viewport::ViewportTransform;

#[test]
fn double_tap_restores_the_identity_transform_exactly() {
    let mut view = equator_view(vec![zenith_star("z", 1.0)]);
    let start = now();
    view.handle_gesture(GestureEvent::Scale { raw_factor: 0.37 }, start);
    view.handle_gesture(GestureEvent::Drag { dx: 123.4, dy: -56.7 }, start);
    assert_ne!(*view.transform(), ViewportTransform::identity());

    let ViewUpdate::Animating(handle) = view.handle_gesture(GestureEvent::DoubleTap, start) else {
        panic!("double tap must start an animation");
    };
    let mid = view.tick_animation(handle, start + Duration::from_millis(200));
    assert!(matches!(mid, Some(AnimationStep::Running(_))));

    let last = view.tick_animation(handle, start + Duration::from_millis(500));
    assert_eq!(last, Some(AnimationStep::Finished(ViewportTransform::identity())));
    assert_eq!(*view.transform(), ViewportTransform::identity());
    let (x, y) = position_of(&view, "z");
    assert!((x - 500.0).abs() < 1e-4 && (y - 500.0).abs() < 1e-4, "{x} {y}");

    // finished handles are inert
    assert_eq!(view.tick_animation(handle, start + Duration::from_secs(2)), None);
}

#[test]
fn reset_animation_finishes_despite_later_gestures() {
    let mut view = equator_view(vec![zenith_star("z", 1.0)]);
    let start = now();
    view.handle_gesture(GestureEvent::Scale { raw_factor: 0.5 }, start);
    view.handle_gesture(GestureEvent::Drag { dx: 80.0, dy: 0.0 }, start);
    let ViewUpdate::Animating(handle) = view.handle_gesture(GestureEvent::DoubleTap, start) else {
        panic!("double tap must start an animation");
    };

    let later = start + Duration::from_millis(10);
    assert_eq!(
        view.handle_gesture(GestureEvent::Scale { raw_factor: 0.99 }, later),
        ViewUpdate::Redraw
    );
    view.handle_gesture(GestureEvent::Drag { dx: 10.0, dy: 0.0 }, later);

    let last = view.tick_animation(handle, start + Duration::from_millis(600));
    assert_eq!(last, Some(AnimationStep::Finished(ViewportTransform::identity())));
    assert_eq!(view.transform().zoom(), 1.0);
    assert_eq!(view.transform().pan(), (0.0, 0.0));

    let (x, y) = position_of(&view, "z");
    assert!((x - 500.0).abs() < 1e-4 && (y - 500.0).abs() < 1e-4, "{x} {y}");
}

#[test]
fn faint_stars_follow_the_setting() {
    let mut view = equator_view(vec![
        zenith_star("bright", 1.0),
        star_east_of_zenith("faint", 5.2, 10.0),
    ]);

    let ids: Vec<String> = view.render().body_ids().map(String::from).collect();
    assert_eq!(ids, vec!["bright"]);

    view.apply_settings(Settings {
        show_faint_stars: true,
        ..Settings::default()
    });
    let ids: Vec<String> = view.render().body_ids().map(String::from).collect();
    assert_eq!(ids, vec!["bright", "faint"]);

    view.apply_settings(Settings {
        show_stars: false,
        show_faint_stars: true,
        ..Settings::default()
    });
    assert_eq!(view.render().body_ids().count(), 0);
}

#[test]
fn hit_test_is_deterministic() {
    let view = equator_view(vec![
        zenith_star("first", 1.0),
        zenith_star("second", 1.0),
        star_east_of_zenith("near", 2.0, 1.0),
    ]);
    for _ in 0..10 {
        assert_eq!(view.object_at(500.0, 500.0).map(|o| o.id()), Some("first"));
    }
    // 1° east is 5.6 px right of the centre
    assert_eq!(view.object_at(506.0, 500.0).map(|o| o.id()), Some("near"));
    assert!(view.object_at(560.0, 500.0).is_none());
}

#[test]
fn snapshot_ids_track_the_object_list() {
    let mut view = equator_view(MockCatalog::default().generate().unwrap());
    let mut expected: Vec<String> = view.objects().iter().map(|o| o.id().to_string()).collect();
    expected.sort();

    let snapshot = view.positions();
    let mut ids: Vec<String> = snapshot.ids().map(String::from).collect();
    ids.sort();
    assert_eq!(ids, expected);

    // an old snapshot survives later updates untouched
    view.update_objects(vec![zenith_star("only", 1.0)]);
    assert_eq!(snapshot.len(), expected.len());
    assert_eq!(view.positions().ids().collect::<Vec<_>>(), vec!["only"]);
}

#[tokio::test]
async fn latest_catalogue_load_wins() {
    let mut view = equator_view(vec![zenith_star("z", 1.0)]);
    let mut loader = CatalogLoader::current().unwrap();

    let stale = view.begin_load(&mut loader, Arc::new(CsvCatalog::new("/no/such/catalog.csv")));
    let latest = view.begin_load(&mut loader, Arc::new(MockCatalog::default()));
    assert!(latest > stale);
    assert_eq!(*view.load_state(), LoadState::Loading(latest));

    let outcome = loader.next_outcome().await.unwrap();
    assert_eq!(outcome.request, latest);
    assert!(view.apply_load_outcome(outcome));

    assert_eq!(*view.load_state(), LoadState::Loaded { count: 1099 });
    assert_eq!(view.objects().len(), 1099);
    assert_eq!(view.positions().len(), 1099);
    assert!(view.search_object("sirius").is_some());
}

#[tokio::test]
async fn failed_load_keeps_the_current_sky() {
    let mut view = equator_view(vec![zenith_star("z", 1.0)]);
    let mut loader = CatalogLoader::current().unwrap();

    view.begin_load(&mut loader, Arc::new(CsvCatalog::new("/no/such/catalog.csv")));
    let outcome = loader.next_outcome().await.unwrap();
    view.apply_load_outcome(outcome);

    assert!(matches!(view.load_state(), LoadState::Failed(_)));
    assert_eq!(view.objects().len(), 1);
    assert_eq!(view.object_at(500.0, 500.0).map(|o| o.id()), Some("z"));
}
