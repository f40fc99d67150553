//! # View configuration
//!
//! [`ViewConfig`] gathers every tunable value of the interactive sky view: zoom bounds,
//! hit radius, label thresholds, magnitude thresholds, radius bases and the animation
//! duration. [`ViewConfig::default`] reproduces the reference values listed in
//! [`constants`](crate::constants).
//!
//! The config is immutable once a [`SkyView`](crate::sky_view::SkyView) is built; user
//! preferences that change at runtime live in [`Settings`](crate::settings::Settings).
use std::time::Duration;

use crate::constants::*;
use crate::time::SiderealModel;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub object_scale_at_min_zoom: f64,
    pub object_scale_at_max_zoom: f64,
    pub tap_scale_min: f64,
    pub tap_scale_max: f64,
    pub hit_radius_base: Pixel,
    pub animation_duration: Duration,

    pub labels_shown_below_zoom: f64,
    pub labels_hidden_from_zoom: f64,
    pub label_center_region_factor: f64,
    pub label_alpha_floor: u8,
    pub label_offset: (Pixel, Pixel),

    pub faint_star_magnitude: f64,
    pub bright_star_glow_magnitude: f64,
    pub star_glow_blur_radius: Pixel,
    pub planet_glow_blur_radius: Pixel,
    pub star_radius_base_scale: Pixel,
    pub star_radius_min: Pixel,
    pub planet_radius_base: Pixel,
    pub sun_radius_base: Pixel,
    pub moon_radius_base: Pixel,
    pub cull_margin_factor: f64,

    pub sidereal_model: SiderealModel,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            object_scale_at_min_zoom: OBJECT_SCALE_AT_MIN_ZOOM,
            object_scale_at_max_zoom: OBJECT_SCALE_AT_MAX_ZOOM,
            tap_scale_min: TAP_SCALE_MIN,
            tap_scale_max: TAP_SCALE_MAX,
            hit_radius_base: HIT_RADIUS_BASE,
            animation_duration: Duration::from_millis(ANIMATION_DURATION_MS),

            labels_shown_below_zoom: LABELS_SHOWN_BELOW_ZOOM,
            labels_hidden_from_zoom: LABELS_HIDDEN_FROM_ZOOM,
            label_center_region_factor: LABEL_CENTER_REGION_FACTOR,
            label_alpha_floor: LABEL_ALPHA_FLOOR,
            label_offset: (LABEL_X_OFFSET, LABEL_Y_OFFSET),

            faint_star_magnitude: FAINT_STAR_MAGNITUDE_THRESHOLD,
            bright_star_glow_magnitude: BRIGHT_STAR_GLOW_MAGNITUDE_THRESHOLD,
            star_glow_blur_radius: STAR_GLOW_BLUR_RADIUS,
            planet_glow_blur_radius: PLANET_GLOW_BLUR_RADIUS,
            star_radius_base_scale: STAR_RADIUS_BASE_SCALE,
            star_radius_min: STAR_RADIUS_MIN,
            planet_radius_base: PLANET_RADIUS_BASE,
            sun_radius_base: SUN_RADIUS_BASE,
            moon_radius_base: MOON_RADIUS_BASE,
            cull_margin_factor: CULL_MARGIN_FACTOR,

            sidereal_model: SiderealModel::Polynomial,
        }
    }
}

impl ViewConfig {
    /// Clamp a zoom factor into `[min_zoom, max_zoom]`. Swapped bounds are reordered.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        clamp_between(zoom, self.min_zoom, self.max_zoom)
    }
}

/// Clamp `value` between two bounds given in any order. Never panics, unlike
/// [`f64::clamp`]; a NaN bound is ignored.
pub(crate) fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    let lo = a.min(b);
    let hi = a.max(b);
    value.max(lo).min(hi)
}
