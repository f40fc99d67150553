use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skymap::catalog::mock::MockCatalog;
use skymap::config::ViewConfig;
use skymap::hit_test::hit_test;
use skymap::projection::Viewport;
use skymap::scene::{Observer, Scene};
use skymap::time::SiderealModel;
use skymap::viewport::ViewportTransform;

/// Random taps over a 1080×1920 view of the mock sky, at a wide and a close zoom.
fn bench_hit_test(c: &mut Criterion) {
    let config = ViewConfig::default();
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let taps: Vec<Point2<f64>> = (0..1_000)
        .map(|_| Point2::new(rng.random_range(0.0..1080.0), rng.random_range(0.0..1920.0)))
        .collect();

    for zoom in [0.3, 4.0] {
        let transform = ViewportTransform::new(zoom, 0.0, 0.0, &config);
        let mut scene = Scene::new(Observer::default(), 1_718_949_600_000, SiderealModel::Polynomial);
        scene.set_viewport(Viewport::new(1080.0, 1920.0), &transform);
        scene.set_objects(MockCatalog::default().generate().expect("mock sky"), &transform);
        let positions = scene.positions();

        c.bench_function(&format!("hit_test/1000_taps_zoom_{zoom}"), |b| {
            b.iter(|| {
                taps.iter()
                    .filter(|tap| {
                        hit_test(
                            black_box(**tap),
                            scene.objects(),
                            &positions,
                            transform.zoom(),
                            &config,
                        )
                        .is_some()
                    })
                    .count()
            })
        });
    }
}

criterion_group!(benches, bench_hit_test);
criterion_main!(benches);
