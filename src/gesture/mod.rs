//! # Gesture and animation controller
//!
//! [`GestureController`] owns the [`ViewportTransform`] and turns user input into viewport
//! changes:
//!
//! | event       | effect                                                             |
//! |-------------|--------------------------------------------------------------------|
//! | `Scale`     | inverted pinch factor, damped by the zoom sensitivity, then clamp  |
//! | `Drag`      | raw pixel delta added to the pan                                   |
//! | `Tap`       | hit test against the current snapshot                              |
//! | `DoubleTap` | animated reset to zoom 1.0, pan (0, 0)                             |
//!
//! Scale and drag keep working while an animation runs, but every tick overwrites the
//! transform with the interpolated value, so the animation always lands exactly on its
//! target. Animations are identified by an [`AnimationHandle`]; only starting a new one
//! supersedes the previous handle, and ticking a superseded handle is a no-op.
//!
//! Platform scroll callbacks usually report the distance the content moved *away* from the
//! finger; hosts negate those values before passing them as a [`GestureEvent::Drag`].
pub mod animation;

use std::time::Instant;

use nalgebra::Point2;
use tracing::{debug, info};

use crate::celestial::CelestialObject;
use crate::config::ViewConfig;
use crate::constants::Pixel;
use crate::hit_test::hit_test;
use crate::scene::Scene;
use crate::settings::Settings;
use crate::viewport::ViewportTransform;

use self::animation::{Animation, AnimationHandle, AnimationStep};

/// Raw input from the host gesture recognizers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pinch with the recognizer's raw scale factor (`> 1` when fingers spread).
    Scale { raw_factor: f64 },
    /// Pan delta in pixels.
    Drag { dx: Pixel, dy: Pixel },
    Tap { x: Pixel, y: Pixel },
    DoubleTap,
}

/// What the host has to do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome<'a> {
    /// The transform changed: positions must be recomputed.
    Recompute,
    /// An animation started; drive it with [`GestureController::tick`].
    Animating(AnimationHandle),
    Tapped(&'a CelestialObject),
    Missed,
    /// Nothing changed.
    Ignored,
}

/// Effective zoom multiplier of a pinch.
///
/// The raw factor is inverted (spreading the fingers magnifies, i.e. lowers the stored
/// zoom), then pulled toward `1` by the sensitivity: `1 + (1/raw − 1)·sensitivity`.
/// A raw factor of `0`, `1` or a non-finite value gives `1`.
pub fn effective_scale_factor(raw_factor: f64, sensitivity: f64) -> f64 {
    let inverted = if raw_factor == 0.0 || raw_factor == 1.0 || !raw_factor.is_finite() {
        1.0
    } else {
        1.0 / raw_factor
    };
    1.0 + (inverted - 1.0) * sensitivity
}

#[derive(Debug, Clone)]
pub struct GestureController {
    transform: ViewportTransform,
    animation: Option<(AnimationHandle, Animation)>,
    next_handle: u64,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        GestureController {
            transform: ViewportTransform::identity(),
            animation: None,
            next_handle: 0,
        }
    }

    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Handle of the animation in flight, if any.
    pub fn active_animation(&self) -> Option<AnimationHandle> {
        self.animation.map(|(handle, _)| handle)
    }

    /// Dispatch one gesture.
    ///
    /// Arguments
    /// -----------------
    /// * `event`: the gesture.
    /// * `scene`: current objects and position snapshot (used by taps).
    /// * `settings`: provides the zoom sensitivity.
    /// * `config`: zoom bounds, tap radius, animation duration.
    /// * `now`: current time, start of a double-tap animation.
    ///
    /// Return
    /// ----------
    /// * The [`GestureOutcome`] the host must act on.
    pub fn handle<'a>(
        &mut self,
        event: GestureEvent,
        scene: &'a Scene,
        settings: &Settings,
        config: &ViewConfig,
        now: Instant,
    ) -> GestureOutcome<'a> {
        match event {
            GestureEvent::Scale { raw_factor } => {
                let factor = effective_scale_factor(raw_factor, settings.zoom_sensitivity);
                let before = self.transform.zoom();
                self.transform.zoom_by(factor, config);
                debug!(raw_factor, factor, zoom = self.transform.zoom(), "scale");
                if self.transform.zoom() == before {
                    GestureOutcome::Ignored
                } else {
                    GestureOutcome::Recompute
                }
            }
            GestureEvent::Drag { dx, dy } => {
                if !dx.is_finite() || !dy.is_finite() {
                    return GestureOutcome::Ignored;
                }
                self.transform.pan_by(dx, dy);
                GestureOutcome::Recompute
            }
            GestureEvent::Tap { x, y } => {
                let positions = scene.positions();
                match hit_test(
                    Point2::new(x, y),
                    scene.objects(),
                    &positions,
                    self.transform.zoom(),
                    config,
                ) {
                    Some(object) => {
                        info!(id = object.id(), name = object.name(), "object tapped");
                        GestureOutcome::Tapped(object)
                    }
                    None => GestureOutcome::Missed,
                }
            }
            GestureEvent::DoubleTap => {
                let handle = self.start_animation(ViewportTransform::identity(), config, now);
                GestureOutcome::Animating(handle)
            }
        }
    }

    /// Animate the pan so that `id` ends up at the centre of the viewport. The zoom is kept.
    ///
    /// Return
    /// ----------
    /// * The handle of the started animation, or `None` when the object is unknown or
    ///   currently off screen.
    pub fn recenter_on(
        &mut self,
        id: &str,
        scene: &Scene,
        config: &ViewConfig,
        now: Instant,
    ) -> Option<AnimationHandle> {
        let position = scene.positions().get(id)?.point()?;
        let center = scene.viewport().center();
        let target = ViewportTransform::new(
            self.transform.zoom(),
            center.x - position.x + self.transform.pan_x,
            center.y - position.y + self.transform.pan_y,
            config,
        );
        debug!(id, pan_x = target.pan_x, pan_y = target.pan_y, "recentering");
        Some(self.start_animation(target, config, now))
    }

    /// Start an animation from the current transform to `target`, superseding any other.
    pub fn start_animation(
        &mut self,
        target: ViewportTransform,
        config: &ViewConfig,
        now: Instant,
    ) -> AnimationHandle {
        self.next_handle += 1;
        let handle = AnimationHandle(self.next_handle);
        let animation = Animation::new(self.transform, target, now, config.animation_duration);
        self.animation = Some((handle, animation));
        handle
    }

    /// Advance the animation identified by `handle` to `now`.
    ///
    /// Return
    /// ----------
    /// * `None` when `handle` is not the animation in flight (superseded or
    ///   already finished); the transform is left untouched.
    /// * `Some(step)` otherwise; the transform has been updated, and after
    ///   [`AnimationStep::Finished`] the animation is cleared.
    pub fn tick(&mut self, handle: AnimationHandle, now: Instant) -> Option<AnimationStep> {
        let (active, animation) = self.animation?;
        if active != handle {
            return None;
        }
        let step = animation.step(now);
        self.transform = step.transform();
        if let AnimationStep::Finished(_) = step {
            self.animation = None;
        }
        Some(step)
    }
}

#[cfg(test)]
mod gesture_test {
    use super::*;
    use crate::projection::Viewport;
    use crate::scene::Observer;
    use crate::time::SiderealModel;
    use approx::assert_abs_diff_eq;
    use std::time::Duration;

    fn empty_scene() -> Scene {
        let mut scene = Scene::new(Observer::default(), 0, SiderealModel::default());
        scene.set_viewport(Viewport::new(1000.0, 1000.0), &ViewportTransform::identity());
        scene
    }

    #[test]
    fn test_effective_scale_factor() {
        assert_eq!(effective_scale_factor(1.0, 0.5), 1.0);
        assert_eq!(effective_scale_factor(0.0, 0.5), 1.0);
        assert_eq!(effective_scale_factor(f64::NAN, 0.5), 1.0);
        // spread ×2: inverted 0.5, half sensitivity → 0.75
        assert_eq!(effective_scale_factor(2.0, 0.5), 0.75);
        assert_eq!(effective_scale_factor(0.5, 1.0), 2.0);
    }

    #[test]
    fn test_scale_clamps() {
        let scene = empty_scene();
        let config = ViewConfig::default();
        let settings = Settings {
            zoom_sensitivity: 1.0,
            ..Settings::default()
        };
        let mut ctrl = GestureController::new();
        let now = Instant::now();

        for _ in 0..50 {
            ctrl.handle(GestureEvent::Scale { raw_factor: 0.5 }, &scene, &settings, &config, now);
        }
        assert_eq!(ctrl.transform().zoom(), config.max_zoom);
        assert_eq!(
            ctrl.handle(GestureEvent::Scale { raw_factor: 0.5 }, &scene, &settings, &config, now),
            GestureOutcome::Ignored
        );

        for _ in 0..50 {
            ctrl.handle(GestureEvent::Scale { raw_factor: 3.0 }, &scene, &settings, &config, now);
        }
        assert_eq!(ctrl.transform().zoom(), config.min_zoom);
    }

    #[test]
    fn test_drag_accumulates() {
        let scene = empty_scene();
        let config = ViewConfig::default();
        let mut ctrl = GestureController::new();
        let now = Instant::now();

        ctrl.handle(GestureEvent::Drag { dx: 10.0, dy: -4.0 }, &scene, &Settings::default(), &config, now);
        ctrl.handle(GestureEvent::Drag { dx: 2.5, dy: 1.0 }, &scene, &Settings::default(), &config, now);
        assert_eq!(ctrl.transform().pan(), (12.5, -3.0));
    }

    #[test]
    fn test_double_tap_resets_exactly() {
        let scene = empty_scene();
        let config = ViewConfig::default();
        let settings = Settings::default();
        let mut ctrl = GestureController::new();
        let start = Instant::now();

        ctrl.handle(GestureEvent::Scale { raw_factor: 0.37 }, &scene, &settings, &config, start);
        ctrl.handle(GestureEvent::Drag { dx: 123.4, dy: -98.7 }, &scene, &settings, &config, start);

        let GestureOutcome::Animating(handle) =
            ctrl.handle(GestureEvent::DoubleTap, &scene, &settings, &config, start)
        else {
            panic!("double tap must animate");
        };

        let mid = ctrl.tick(handle, start + Duration::from_millis(100)).unwrap();
        assert!(matches!(mid, AnimationStep::Running(_)));

        let end = ctrl.tick(handle, start + Duration::from_millis(500)).unwrap();
        assert_eq!(end, AnimationStep::Finished(ViewportTransform::identity()));
        assert_eq!(ctrl.transform().zoom(), 1.0);
        assert_eq!(ctrl.transform().pan(), (0.0, 0.0));
        assert!(!ctrl.is_animating());
    }

    #[test]
    fn test_superseded_handle_is_noop() {
        let config = ViewConfig::default();
        let mut ctrl = GestureController::new();
        let start = Instant::now();

        let first = ctrl.start_animation(
            ViewportTransform::new(2.0, 0.0, 0.0, &config),
            &config,
            start,
        );
        let second = ctrl.start_animation(
            ViewportTransform::new(1.0, 50.0, 0.0, &config),
            &config,
            start,
        );
        assert_ne!(first, second);

        let before = *ctrl.transform();
        assert_eq!(ctrl.tick(first, start + Duration::from_millis(300)), None);
        assert_eq!(*ctrl.transform(), before);

        ctrl.tick(second, start + Duration::from_secs(1)).unwrap();
        assert_eq!(ctrl.transform().pan(), (50.0, 0.0));
        // finished: handle no longer active
        assert_eq!(ctrl.tick(second, start + Duration::from_secs(2)), None);
    }

    #[test]
    fn test_reset_survives_gestures_mid_animation() {
        let scene = empty_scene();
        let config = ViewConfig::default();
        let settings = Settings::default();
        let mut ctrl = GestureController::new();
        let start = Instant::now();

        ctrl.handle(GestureEvent::Scale { raw_factor: 0.5 }, &scene, &settings, &config, start);
        let GestureOutcome::Animating(handle) =
            ctrl.handle(GestureEvent::DoubleTap, &scene, &settings, &config, start)
        else {
            panic!("double tap must animate");
        };

        let later = start + Duration::from_millis(10);
        ctrl.handle(GestureEvent::Scale { raw_factor: 0.99 }, &scene, &settings, &config, later);
        ctrl.handle(GestureEvent::Drag { dx: 30.0, dy: -4.0 }, &scene, &settings, &config, later);
        assert_eq!(ctrl.active_animation(), Some(handle));

        let end = ctrl.tick(handle, start + Duration::from_millis(600));
        assert_eq!(end, Some(AnimationStep::Finished(ViewportTransform::identity())));
        assert_eq!(ctrl.transform().zoom(), 1.0);
        assert_eq!(ctrl.transform().pan(), (0.0, 0.0));
        assert!(!ctrl.is_animating());
    }

    #[test]
    fn test_tick_overwrites_gesture_changes() {
        let scene = empty_scene();
        let config = ViewConfig::default();
        let mut ctrl = GestureController::new();
        let start = Instant::now();

        let target = ViewportTransform::new(5.0, 0.0, 0.0, &config);
        let handle = ctrl.start_animation(target, &config, start);
        ctrl.handle(GestureEvent::Drag { dx: 1.0, dy: 1.0 }, &scene, &Settings::default(), &config, start);
        assert_eq!(ctrl.transform().pan(), (1.0, 1.0));

        // interpolation restarts from the transform captured at the start
        let step = ctrl.tick(handle, start + Duration::from_millis(250)).unwrap();
        assert_eq!(step.transform().pan(), (0.0, 0.0));
        assert_abs_diff_eq!(ctrl.transform().zoom(), 1.0 + 4.0 * 0.75, epsilon = 1e-12);
    }
}
