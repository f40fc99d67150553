//! # Viewport transform and zoom-derived scales
//!
//! [`ViewportTransform`] holds the continuously adjustable zoom factor and pan offset of the
//! sky view. The zoom convention is **inverted**: values below `1.0` show more sky
//! (zoomed out), values above `1.0` magnify.
//!
//! From the zoom factor a single piecewise-linear scale curve is derived ([`zoom_scale`]):
//!
//! ```text
//! scale
//!  2.0 ┤●                               zoom = MIN_ZOOM  → object_scale_at_min_zoom
//!      │  ╲
//!  1.0 ┤────●────────────────────       zoom = 1.0       → 1.0
//!      │          ╲ ╲ ╲ ╲ ╲ ╲
//!  0.3 ┤                       ●        zoom = MAX_ZOOM  → object_scale_at_max_zoom
//!      └──┬─────┬──────────────┬──> zoom
//!       0.15   1.0            15.0
//! ```
//!
//! The same curve drives the drawn radius of objects ([`visual_scale`]) and, with its own
//! clamp, the tap radius ([`tap_radius`]), so visual size and tap target stay proportionate.
//! Label opacity follows [`label_alpha_factor`].
use crate::config::{clamp_between, ViewConfig};
use crate::constants::{Pixel, MIN_INTERPOLATION_RANGE};

/// Zoom factor and pan offset of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    zoom: f64,
    pub pan_x: Pixel,
    pub pan_y: Pixel,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewportTransform {
    /// Build a transform; the zoom is clamped into the configured range.
    pub fn new(zoom: f64, pan_x: Pixel, pan_y: Pixel, config: &ViewConfig) -> Self {
        let zoom = if zoom.is_finite() {
            config.clamp_zoom(zoom)
        } else {
            1.0
        };
        ViewportTransform { zoom, pan_x, pan_y }
    }

    /// Zoom 1.0, no pan.
    pub fn identity() -> Self {
        ViewportTransform {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (Pixel, Pixel) {
        (self.pan_x, self.pan_y)
    }

    /// Set the zoom factor, clamped. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64, config: &ViewConfig) {
        if zoom.is_finite() {
            self.zoom = config.clamp_zoom(zoom);
        }
    }

    /// Multiply the zoom factor by `factor`, then clamp. Non-finite products are ignored.
    pub fn zoom_by(&mut self, factor: f64, config: &ViewConfig) {
        self.set_zoom(self.zoom * factor, config);
    }

    /// Accumulate a raw pan delta.
    pub fn pan_by(&mut self, dx: Pixel, dy: Pixel) {
        if dx.is_finite() && dy.is_finite() {
            self.pan_x += dx;
            self.pan_y += dy;
        }
    }

    pub fn set_pan(&mut self, pan_x: Pixel, pan_y: Pixel) {
        if pan_x.is_finite() && pan_y.is_finite() {
            self.pan_x = pan_x;
            self.pan_y = pan_y;
        }
    }

    /// Back to zoom 1.0 and no pan.
    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// Linear interpolation between two transforms, `fraction` in `[0, 1]`.
    ///
    /// `fraction == 1.0` returns `to` exactly.
    pub fn lerp(from: &Self, to: &Self, fraction: f64) -> Self {
        if fraction >= 1.0 {
            return *to;
        }
        let f = fraction.max(0.0);
        ViewportTransform {
            zoom: from.zoom + (to.zoom - from.zoom) * f,
            pan_x: from.pan_x + (to.pan_x - from.pan_x) * f,
            pan_y: from.pan_y + (to.pan_y - from.pan_y) * f,
        }
    }
}

/// Raw scale curve, `1.0` at zoom `1.0`, unclamped.
///
/// Below `1.0` the curve rises linearly to `object_scale_at_min_zoom` at `min_zoom`; above
/// `1.0` it falls linearly to `object_scale_at_max_zoom` at `max_zoom`. Zero-width ranges
/// are replaced by a small positive width.
pub fn zoom_scale(zoom: f64, config: &ViewConfig) -> f64 {
    if zoom == 1.0 {
        1.0
    } else if zoom < 1.0 {
        let range = interpolation_range(1.0 - config.min_zoom);
        let normalized = (1.0 - zoom) / range;
        1.0 + normalized * (config.object_scale_at_min_zoom - 1.0)
    } else {
        let range = interpolation_range(config.max_zoom - 1.0);
        let normalized = (zoom - 1.0) / range;
        1.0 + normalized * (config.object_scale_at_max_zoom - 1.0)
    }
}

fn interpolation_range(range: f64) -> f64 {
    if range.abs() < MIN_INTERPOLATION_RANGE {
        MIN_INTERPOLATION_RANGE
    } else {
        range
    }
}

/// Scale applied to drawn object radii.
pub fn visual_scale(zoom: f64, config: &ViewConfig) -> f64 {
    clamp_between(
        zoom_scale(zoom, config),
        config.object_scale_at_max_zoom,
        config.object_scale_at_min_zoom,
    )
}

/// Scale applied to the tap radius, clamped to `[tap_scale_min, tap_scale_max]`.
pub fn tap_scale(zoom: f64, config: &ViewConfig) -> f64 {
    clamp_between(zoom_scale(zoom, config), config.tap_scale_min, config.tap_scale_max)
}

/// Effective tap radius in pixels at the given zoom.
pub fn tap_radius(zoom: f64, config: &ViewConfig) -> Pixel {
    config.hit_radius_base * tap_scale(zoom, config)
}

/// Opacity factor of labels at the given zoom.
///
/// Return
/// ----------
/// * `Some(1.0)` below `labels_shown_below_zoom`,
/// * a linear fade from `1.0` to `0.0` between `labels_shown_below_zoom` and
///   `labels_hidden_from_zoom`,
/// * `None` at or above `labels_hidden_from_zoom` (no label at all).
pub fn label_alpha_factor(zoom: f64, config: &ViewConfig) -> Option<f64> {
    if zoom < config.labels_shown_below_zoom {
        Some(1.0)
    } else if zoom < config.labels_hidden_from_zoom {
        let fade_range = (config.labels_hidden_from_zoom - config.labels_shown_below_zoom)
            .max(MIN_INTERPOLATION_RANGE);
        Some(((config.labels_hidden_from_zoom - zoom) / fade_range).clamp(0.0, 1.0))
    } else {
        None
    }
}

#[cfg(test)]
mod viewport_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zoom_clamp() {
        let config = ViewConfig::default();
        let mut transform = ViewportTransform::identity();

        transform.zoom_by(1e9, &config);
        assert_eq!(transform.zoom(), config.max_zoom);

        transform.zoom_by(1e-12, &config);
        assert_eq!(transform.zoom(), config.min_zoom);

        transform.zoom_by(f64::NAN, &config);
        assert_eq!(transform.zoom(), config.min_zoom);

        transform.zoom_by(-3.0, &config);
        assert_eq!(transform.zoom(), config.min_zoom);
    }

    #[test]
    fn test_zoom_scale_curve() {
        let config = ViewConfig::default();
        assert_eq!(zoom_scale(1.0, &config), 1.0);
        assert_abs_diff_eq!(zoom_scale(config.min_zoom, &config), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(zoom_scale(config.max_zoom, &config), 0.3, epsilon = 1e-12);

        // halfway between 1.0 and MIN_ZOOM
        let mid = (1.0 + config.min_zoom) / 2.0;
        assert_abs_diff_eq!(zoom_scale(mid, &config), 1.5, epsilon = 1e-12);
        // halfway between 1.0 and MAX_ZOOM
        assert_abs_diff_eq!(zoom_scale(8.0, &config), 0.65, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_zoom_range() {
        let config = ViewConfig {
            min_zoom: 1.0,
            max_zoom: 1.0,
            ..ViewConfig::default()
        };
        assert!(zoom_scale(0.999, &config).is_finite());
        assert!(zoom_scale(1.001, &config).is_finite());
        assert!(tap_radius(1.001, &config).is_finite());
    }

    #[test]
    fn test_tap_radius_bounds() {
        let config = ViewConfig::default();
        assert_eq!(tap_radius(1.0, &config), 25.0);
        assert_abs_diff_eq!(tap_radius(config.min_zoom, &config), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tap_radius(config.max_zoom, &config), 7.5, epsilon = 1e-9);

        for zoom in [0.15, 0.3, 0.7, 1.0, 2.0, 5.0, 10.0, 15.0] {
            let r = tap_radius(zoom, &config);
            assert!(r >= 25.0 * 0.25 && r <= 25.0 * 2.5, "zoom {zoom}: {r}");
        }
    }

    #[test]
    fn test_swapped_bounds_do_not_panic() {
        let config = ViewConfig {
            min_zoom: 15.0,
            max_zoom: 0.15,
            tap_scale_min: 2.5,
            tap_scale_max: 0.25,
            ..ViewConfig::default()
        };
        assert_eq!(config.clamp_zoom(100.0), 15.0);
        assert_eq!(config.clamp_zoom(0.01), 0.15);
        assert_eq!(ViewportTransform::new(3.0, 0.0, 0.0, &config).zoom(), 3.0);

        for zoom in [0.15, 1.0, 15.0] {
            let r = tap_radius(zoom, &config);
            assert!((6.25..=62.5).contains(&r), "zoom {zoom}: {r}");
        }
    }

    #[test]
    fn test_label_alpha_factor() {
        let config = ViewConfig::default();
        assert_eq!(label_alpha_factor(0.5, &config), Some(1.0));
        assert_abs_diff_eq!(
            label_alpha_factor(0.85, &config).unwrap(),
            0.5,
            epsilon = 1e-12
        );
        assert_eq!(label_alpha_factor(1.0, &config), None);
        assert_eq!(label_alpha_factor(3.0, &config), None);
    }

    #[test]
    fn test_lerp_reaches_target_exactly() {
        let config = ViewConfig::default();
        let from = ViewportTransform::new(3.7, 123.4, -56.7, &config);
        let to = ViewportTransform::identity();

        assert_eq!(ViewportTransform::lerp(&from, &to, 1.0), to);
        assert_eq!(ViewportTransform::lerp(&from, &to, 0.0), from);

        let half = ViewportTransform::lerp(&from, &to, 0.5);
        assert_abs_diff_eq!(half.zoom(), 2.35, epsilon = 1e-12);
        assert_abs_diff_eq!(half.pan_x, 61.7, epsilon = 1e-12);
    }
}
