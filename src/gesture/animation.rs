//! # Viewport animations
//!
//! Time-driven interpolation of a [`ViewportTransform`] from a start value to a target over
//! a fixed duration. Time is passed in explicitly ([`Instant`]), so the animation is fully
//! deterministic under test.
//!
//! The easing is applied once to the time fraction and the eased fraction drives a linear
//! interpolation of zoom and pan. The last tick assigns the target exactly.
use std::time::{Duration, Instant};

use crate::viewport::ViewportTransform;

/// Easing curve applied to the time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// `1 − (1 − t)²`
    #[default]
    Decelerate,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Identifies one started animation. A newer animation supersedes every older handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationHandle(pub(crate) u64);

/// Outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    /// Intermediate value, more ticks to come.
    Running(ViewportTransform),
    /// Final value, exactly the target.
    Finished(ViewportTransform),
}

impl AnimationStep {
    pub fn transform(&self) -> ViewportTransform {
        match self {
            AnimationStep::Running(t) | AnimationStep::Finished(t) => *t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub from: ViewportTransform,
    pub to: ViewportTransform,
    pub started: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl Animation {
    pub fn new(
        from: ViewportTransform,
        to: ViewportTransform,
        started: Instant,
        duration: Duration,
    ) -> Self {
        Animation {
            from,
            to,
            started,
            duration,
            easing: Easing::Decelerate,
        }
    }

    /// Elapsed fraction of the duration at `now`, in `[0, 1]`.
    pub fn fraction(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn step(&self, now: Instant) -> AnimationStep {
        let fraction = self.fraction(now);
        if fraction >= 1.0 {
            AnimationStep::Finished(self.to)
        } else {
            let eased = self.easing.apply(fraction);
            AnimationStep::Running(ViewportTransform::lerp(&self.from, &self.to, eased))
        }
    }
}
