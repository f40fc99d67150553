#![allow(dead_code)]

use std::time::Instant;

use skymap::celestial::CelestialObject;
use skymap::config::ViewConfig;
use skymap::sky_view::SkyView;

/// 2000-01-01T12:00:00Z
pub const J2000_MILLIS: i64 = 946_728_000_000;
/// Greenwich sidereal time of the default polynomial model at [`J2000_MILLIS`].
pub const GMST_AT_J2000: f64 = 100.460618375;

/// A 1000×1000 view at (lat 0, lon 0) and J2000, holding `objects`.
pub fn equator_view(objects: Vec<CelestialObject>) -> SkyView {
    let mut view = SkyView::new(ViewConfig::default());
    view.set_observation_time(J2000_MILLIS);
    view.set_viewport_size(1000.0, 1000.0);
    view.set_observer_location(0.0, 0.0).unwrap();
    view.update_objects(objects);
    view
}

/// Star at the zenith of [`equator_view`].
pub fn zenith_star(id: &str, magnitude: f64) -> CelestialObject {
    CelestialObject::star(id, id, magnitude, GMST_AT_J2000, 0.0).unwrap()
}

/// Star `degrees` east of the zenith of [`equator_view`], on the celestial equator.
pub fn star_east_of_zenith(id: &str, magnitude: f64, degrees: f64) -> CelestialObject {
    CelestialObject::star(id, id, magnitude, GMST_AT_J2000 + degrees, 0.0).unwrap()
}

/// Screen position of `id` in the current snapshot, `(-1, -1)` when off screen.
pub fn position_of(view: &SkyView, id: &str) -> (f64, f64) {
    view.positions()
        .get(id)
        .map(|p| p.as_tuple())
        .unwrap_or((-1.0, -1.0))
}

pub fn now() -> Instant {
    Instant::now()
}
