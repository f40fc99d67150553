//! # Constants and type definitions for skymap
//!
//! This module centralizes the **astronomical constants**, **conversion factors**, and
//! **common type aliases** used throughout the crate, together with the reference values
//! of the interactive view (zoom bounds, hit radius, label thresholds…).
//!
//! ## Overview
//!
//! - Time and angle constants (J2000, sidereal polynomial, degrees ↔ radians)
//! - Core type aliases used across the crate
//! - Reference values for the viewport, renderer, hit tester and animations
//!
//! The view values are the defaults of [`ViewConfig`](crate::config::ViewConfig); code that
//! needs a tunable value should read it from the config instead of these constants.

// -------------------------------------------------------------------------------------------------
// Time and angle constants
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Full turn in degrees
pub const FULL_TURN: f64 = 360.0;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Sidereal seconds per degree of rotation (86400 / 360)
pub const SECONDS_PER_DEGREE: f64 = 240.0;

/// Numerical epsilon used for degenerate geometry guards
pub const EPS: f64 = 1e-9;

/// Floor substituted for zero-width interpolation ranges
pub const MIN_INTERPOLATION_RANGE: f64 = 0.01;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Length in screen pixels
pub type Pixel = f64;
/// Milliseconds since the Unix epoch, UTC
pub type EpochMillis = i64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Identifier of a celestial object, unique within a scene
pub type ObjectId = String;

// -------------------------------------------------------------------------------------------------
// Viewport and zoom
// -------------------------------------------------------------------------------------------------

/// Smallest zoom factor (most sky visible)
pub const MIN_ZOOM: f64 = 0.15;

/// Largest zoom factor (highest magnification)
pub const MAX_ZOOM: f64 = 15.0;

/// Object scale reached at [`MIN_ZOOM`]
pub const OBJECT_SCALE_AT_MIN_ZOOM: f64 = 2.0;

/// Object scale reached at [`MAX_ZOOM`]
pub const OBJECT_SCALE_AT_MAX_ZOOM: f64 = 0.3;

/// Tap-radius scale clamp
pub const TAP_SCALE_MIN: f64 = 0.25;
pub const TAP_SCALE_MAX: f64 = 2.5;

/// Base tap radius in pixels at zoom 1.0
pub const HIT_RADIUS_BASE: Pixel = 25.0;

/// Duration of the recenter / reset animations in milliseconds
pub const ANIMATION_DURATION_MS: u64 = 500;

// -------------------------------------------------------------------------------------------------
// Draw policy
// -------------------------------------------------------------------------------------------------

/// Labels are fully opaque below this zoom factor
pub const LABELS_SHOWN_BELOW_ZOOM: f64 = 0.7;

/// Labels are hidden at or above this zoom factor
pub const LABELS_HIDDEN_FROM_ZOOM: f64 = 1.0;

/// Fraction of the viewport width/height forming the centred label region
pub const LABEL_CENTER_REGION_FACTOR: f64 = 0.4;

/// Labels whose alpha does not exceed this value are skipped (≈8 % opacity)
pub const LABEL_ALPHA_FLOOR: u8 = 20;

/// Label anchor offset from the object centre
pub const LABEL_X_OFFSET: Pixel = 15.0;
pub const LABEL_Y_OFFSET: Pixel = -5.0;

/// Stars fainter than this are hidden unless "show faint stars" is on
pub const FAINT_STAR_MAGNITUDE_THRESHOLD: f64 = 4.0;

/// Stars brighter than this get a glow halo
pub const BRIGHT_STAR_GLOW_MAGNITUDE_THRESHOLD: f64 = 2.0;

/// Blur radii of the glow halos
pub const STAR_GLOW_BLUR_RADIUS: Pixel = 15.0;
pub const PLANET_GLOW_BLUR_RADIUS: Pixel = 20.0;

/// Star radius is `STAR_RADIUS_BASE_SCALE - magnitude`, floored at `STAR_RADIUS_MIN`
pub const STAR_RADIUS_BASE_SCALE: Pixel = 6.0;
pub const STAR_RADIUS_MIN: Pixel = 1.0;

/// Base radii of solar system bodies
pub const PLANET_RADIUS_BASE: Pixel = 8.0;
pub const SUN_RADIUS_BASE: Pixel = 12.0;
pub const MOON_RADIUS_BASE: Pixel = 10.0;

/// Culling margin, in units of the object's visual radius
pub const CULL_MARGIN_FACTOR: f64 = 1.5;

// -------------------------------------------------------------------------------------------------
// Observer defaults
// -------------------------------------------------------------------------------------------------

/// Name, latitude and longitude of the default observing site (Islamabad)
pub const DEFAULT_LOCATION_NAME: &str = "Islamabad";
pub const DEFAULT_LATITUDE: Degree = 33.6844;
pub const DEFAULT_LONGITUDE: Degree = 73.0479;
