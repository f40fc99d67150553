use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use skymap::catalog::mock::MockCatalog;
use skymap::config::ViewConfig;
use skymap::projection::Viewport;
use skymap::scene::renderer::render;
use skymap::scene::{Observer, Scene};
use skymap::settings::Settings;
use skymap::time::SiderealModel;
use skymap::viewport::ViewportTransform;

/// 2024-06-21T06:00:00Z
const TIME_MILLIS: i64 = 1_718_949_600_000;

fn mock_scene() -> Scene {
    let mut scene = Scene::new(Observer::default(), TIME_MILLIS, SiderealModel::Polynomial);
    let identity = ViewportTransform::identity();
    scene.set_viewport(Viewport::new(1080.0, 1920.0), &identity);
    scene.set_objects(
        MockCatalog::default().generate().expect("mock sky"),
        &identity,
    );
    scene
}

/// Full position snapshot of the ~1100 object mock sky.
fn bench_recompute(c: &mut Criterion) {
    let config = ViewConfig::default();
    let transform = ViewportTransform::new(0.6, 20.0, -35.0, &config);
    let base = mock_scene();

    c.bench_function("scene/recompute_mock_sky", |b| {
        b.iter_batched(
            || base.clone(),
            |mut scene| {
                scene.recompute(black_box(&transform));
                black_box(scene.positions().visible_count())
            },
            BatchSize::SmallInput,
        )
    });
}

/// Time steps of one minute, as a clock-driven host would apply them.
fn bench_time_steps(c: &mut Criterion) {
    let mut scene = mock_scene();
    let transform = ViewportTransform::identity();
    let mut minute = 0;

    c.bench_function("scene/set_time_minute_steps", |b| {
        b.iter(|| {
            minute += 1;
            scene.set_time(black_box(TIME_MILLIS + minute * 60_000), &transform)
        })
    });
}

/// Draw list of the mock sky with every layer enabled.
fn bench_render(c: &mut Criterion) {
    let config = ViewConfig::default();
    let scene = mock_scene();
    let transform = ViewportTransform::new(0.5, 0.0, 0.0, &config);
    let settings = Settings {
        show_faint_stars: true,
        ..Settings::default()
    };

    c.bench_function("renderer/render_mock_sky", |b| {
        b.iter(|| black_box(render(&scene, &transform, &settings, &config)).commands.len())
    });
}

criterion_group!(benches, bench_recompute, bench_time_steps, bench_render);
criterion_main!(benches);
