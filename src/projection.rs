//! # Azimuthal-equidistant sky projection
//!
//! Maps a [`HorizontalCoordinate`] onto a circular sky disc drawn in a 2D viewport.
//! The zenith sits at the centre of the viewport, the horizon on a circle of radius
//! `min(width, height) / 2 / zoom`, and angular distance from the zenith is linear in the
//! distance from the centre.
//!
//! ```text
//!                 N (az = 0)
//!                    ▲
//!            ┌───────┼───────┐
//!            │   ╭───┴───╮   │    r = (90 − alt) / 90 / zoom · min(w, h) / 2
//!   W ◄──────┼───┤   ●   ├───┼──► E     x = cx + r·sin(az)
//!  (az=270)  │   ╰───┬───╯   │          y = cy − r·cos(az)
//!            └───────┼───────┘
//!                    ▼
//!                 S (az = 180)
//! ```
//!
//! Screen y grows downward, so north is up and east is to the right.
//!
//! Objects below the horizon, degenerate viewports and non-finite results are reported
//! as [`ScreenPosition::OffScreen`]. The pan offset is applied **after** projection
//! ([`ScreenPosition::offset`]).
use nalgebra::{Point2, Vector2};

use crate::celestial::CelestialObject;
use crate::constants::{Degree, EpochMillis, Pixel};
use crate::horizontal::{equatorial_to_horizontal, HorizontalCoordinate};
use crate::scene::Observer;
use crate::time::{local_sidereal_time_with_model, SiderealModel};
use crate::viewport::ViewportTransform;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: Pixel,
    pub height: Pixel,
}

impl Viewport {
    pub fn new(width: Pixel, height: Pixel) -> Self {
        Viewport { width, height }
    }

    /// `true` when both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the horizon circle at zoom 1.0.
    pub fn max_radius(&self) -> Pixel {
        self.width.min(self.height) / 2.0
    }

    /// `true` when `point` lies inside the viewport grown by `margin` on every side.
    pub fn contains_with_margin(&self, point: &Point2<f64>, margin: Pixel) -> bool {
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= -margin
            && point.y <= self.height + margin
    }
}

/// Projected position of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenPosition {
    Visible(Point2<f64>),
    /// Below the horizon or not projectable.
    OffScreen,
}

impl ScreenPosition {
    /// Sentinel pair reported for [`ScreenPosition::OffScreen`].
    pub const OFF_SCREEN_SENTINEL: (Pixel, Pixel) = (-1.0, -1.0);

    pub fn is_visible(&self) -> bool {
        matches!(self, ScreenPosition::Visible(_))
    }

    pub fn point(&self) -> Option<Point2<f64>> {
        match self {
            ScreenPosition::Visible(p) => Some(*p),
            ScreenPosition::OffScreen => None,
        }
    }

    /// `(x, y)` of a visible position, `(-1, -1)` otherwise.
    pub fn as_tuple(&self) -> (Pixel, Pixel) {
        match self {
            ScreenPosition::Visible(p) => (p.x, p.y),
            ScreenPosition::OffScreen => Self::OFF_SCREEN_SENTINEL,
        }
    }

    /// Translate a visible position by the pan offset. Off-screen stays off-screen.
    pub fn offset(self, pan: Vector2<f64>) -> Self {
        match self {
            ScreenPosition::Visible(p) => ScreenPosition::Visible(p + pan),
            ScreenPosition::OffScreen => ScreenPosition::OffScreen,
        }
    }
}

/// Project a horizontal coordinate onto the viewport.
///
/// Arguments
/// -----------------
/// * `coord`: altitude/azimuth of the object.
/// * `viewport`: drawing surface size.
/// * `zoom`: current zoom factor (inverted convention, larger magnifies).
///
/// Return
/// ----------
/// * [`ScreenPosition::Visible`] with the pixel position before pan,
/// * [`ScreenPosition::OffScreen`] when the object is below the horizon, the viewport is
///   degenerate, the zoom is not a positive finite number, or the result is not finite.
///
/// See also
/// ------------
/// * [`equatorial_to_horizontal`] – Produces `coord`.
/// * [`SkyProjector`] – Full RA/Dec → screen pipeline including pan.
pub fn map_horizontal_to_screen(
    coord: &HorizontalCoordinate,
    viewport: &Viewport,
    zoom: f64,
) -> ScreenPosition {
    if coord.altitude.is_nan()
        || coord.altitude < 0.0
        || !viewport.is_valid()
        || !(zoom.is_finite() && zoom > 0.0)
    {
        return ScreenPosition::OffScreen;
    }

    let r = (90.0 - coord.altitude) / 90.0 / zoom;
    let screen_r = r * viewport.max_radius();

    let (sin_az, cos_az) = coord.azimuth.to_radians().sin_cos();
    let center = viewport.center();
    let x = center.x + screen_r * sin_az;
    let y = center.y - screen_r * cos_az;

    if x.is_finite() && y.is_finite() {
        ScreenPosition::Visible(Point2::new(x, y))
    } else {
        ScreenPosition::OffScreen
    }
}

/// Observer, sidereal time, viewport and transform frozen for one projection pass.
///
/// The Local Sidereal Time is computed once at construction, so projecting many objects
/// only costs the trigonometry of the coordinate change.
#[derive(Debug, Clone, Copy)]
pub struct SkyProjector {
    latitude: Degree,
    lst: Degree,
    viewport: Viewport,
    transform: ViewportTransform,
}

impl SkyProjector {
    /// Arguments
    /// -----------------
    /// * `observer`: observing site.
    /// * `time_millis`: observation instant, Unix milliseconds UTC.
    /// * `viewport`: drawing surface size.
    /// * `transform`: zoom and pan of the view.
    /// * `model`: sidereal time model.
    pub fn new(
        observer: &Observer,
        time_millis: EpochMillis,
        viewport: Viewport,
        transform: ViewportTransform,
        model: SiderealModel,
    ) -> Self {
        let lst = local_sidereal_time_with_model(observer.longitude, time_millis, model);
        SkyProjector {
            latitude: observer.latitude,
            lst,
            viewport,
            transform,
        }
    }

    pub fn local_sidereal_time(&self) -> Degree {
        self.lst
    }

    pub fn horizontal(&self, ra: Degree, dec: Degree) -> HorizontalCoordinate {
        equatorial_to_horizontal(ra, dec, self.latitude, self.lst)
    }

    /// Project raw equatorial coordinates, pan included.
    pub fn project_equatorial(&self, ra: Degree, dec: Degree) -> ScreenPosition {
        let coord = self.horizontal(ra, dec);
        let (pan_x, pan_y) = self.transform.pan();
        map_horizontal_to_screen(&coord, &self.viewport, self.transform.zoom())
            .offset(Vector2::new(pan_x, pan_y))
    }

    pub fn project(&self, object: &CelestialObject) -> ScreenPosition {
        self.project_equatorial(object.ra(), object.dec())
    }
}
