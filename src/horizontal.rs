//! # Equatorial → horizontal conversion
//!
//! Turns an object's equatorial coordinates (right ascension, declination) into the
//! observer-relative direction (altitude, azimuth) for a given latitude and Local Sidereal
//! Time.
//!
//! ## Conventions
//!
//! - All angles in **degrees**.
//! - Altitude in `[-90, 90]`, negative below the horizon.
//! - Azimuth in `[0, 360)`, measured from **north through east** (0 = N, 90 = E).
//!
//! ## Formulae
//!
//! ```text
//! H        = LST − RA                                   (local hour angle)
//! sin(alt) = sin(δ)·sin(φ) + cos(δ)·cos(φ)·cos(H)
//! north    = sin(δ)·cos(φ) − cos(δ)·sin(φ)·cos(H)
//! east     = −cos(δ)·sin(H)
//! az       = atan2(east, north)
//! ```
//!
//! `north` and `east` are the classical `(sin δ − sin alt·sin φ) / (cos alt·cos φ)` and
//! `−sin H·cos δ / cos alt` with the common positive factors removed, so the pole
//! latitudes (`cos φ = 0`) stay well defined.
//!
//! At the zenith and nadir (`cos alt = hypot(north, east) ≈ 0`) the azimuth is undefined;
//! it is reported as `0°`.
use std::fmt;

use crate::constants::{Degree, EPS, RADEG};
use crate::time::normalize_angle;

/// Observer-relative direction of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoordinate {
    /// Altitude above the horizon in degrees, `[-90, 90]`.
    pub altitude: Degree,
    /// Azimuth in degrees, `[0, 360)`, 0 = north, 90 = east.
    pub azimuth: Degree,
}

impl HorizontalCoordinate {
    pub fn new(altitude: Degree, azimuth: Degree) -> Self {
        HorizontalCoordinate { altitude, azimuth }
    }

    /// `true` when the object is at or above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude >= 0.0
    }
}

impl fmt::Display for HorizontalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alt {:.4}° az {:.4}°", self.altitude, self.azimuth)
    }
}

/// Convert equatorial coordinates into horizontal coordinates.
///
/// Arguments
/// -----------------
/// * `ra`: right ascension in degrees.
/// * `dec`: declination in degrees.
/// * `latitude`: observer latitude in degrees.
/// * `lst`: Local Sidereal Time in degrees.
///
/// Return
/// ----------
/// * The [`HorizontalCoordinate`] of the object. The azimuth is `0°` when the object sits
///   exactly at the zenith or nadir.
///
/// See also
/// ------------
/// * [`local_sidereal_time`](crate::time::local_sidereal_time) – Source of `lst`.
/// * [`map_horizontal_to_screen`](crate::projection::map_horizontal_to_screen) – Next stage of the pipeline.
pub fn equatorial_to_horizontal(
    ra: Degree,
    dec: Degree,
    latitude: Degree,
    lst: Degree,
) -> HorizontalCoordinate {
    let dec_rad = dec * RADEG;
    let lat_rad = latitude * RADEG;
    let lha_rad = (lst - ra) * RADEG;

    let (sin_dec, cos_dec) = dec_rad.sin_cos();
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lha, cos_lha) = lha_rad.sin_cos();

    let sin_alt = (sin_dec * sin_lat + cos_dec * cos_lat * cos_lha).clamp(-1.0, 1.0);
    let alt_rad = sin_alt.asin();

    // north = cos(alt)·cos(az), east = cos(alt)·sin(az)
    let north = sin_dec * cos_lat - cos_dec * sin_lat * cos_lha;
    let east = -sin_lha * cos_dec;

    let azimuth = if north.hypot(east) < EPS {
        0.0
    } else {
        normalize_angle(east.atan2(north).to_degrees())
    };

    HorizontalCoordinate {
        altitude: alt_rad.to_degrees(),
        azimuth,
    }
}

#[cfg(test)]
mod horizontal_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_object_on_meridian() {
        // H = 0: culminates due south for a northern observer
        let coord = equatorial_to_horizontal(180.0, 0.0, 33.68, 180.0);
        assert_abs_diff_eq!(coord.altitude, 90.0 - 33.68, epsilon = 1e-9);
        assert_abs_diff_eq!(coord.azimuth, 180.0, epsilon = 1e-9);

        // dec above the latitude culminates to the north
        let coord = equatorial_to_horizontal(10.0, 60.0, 33.68, 10.0);
        assert_abs_diff_eq!(coord.altitude, 90.0 - (60.0 - 33.68), epsilon = 1e-9);
        assert_abs_diff_eq!(coord.azimuth, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rising_and_setting() {
        // On the celestial equator seen from the terrestrial equator:
        // six hours before transit the object rises due east, six hours after it sets west
        let rising = equatorial_to_horizontal(90.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(rising.altitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rising.azimuth, 90.0, epsilon = 1e-9);

        let setting = equatorial_to_horizontal(0.0, 0.0, 0.0, 90.0);
        assert_abs_diff_eq!(setting.altitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(setting.azimuth, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zenith_azimuth_is_zero() {
        let coord = equatorial_to_horizontal(42.0, 33.68, 33.68, 42.0);
        assert_abs_diff_eq!(coord.altitude, 90.0, epsilon = 1e-5);
        assert_eq!(coord.azimuth, 0.0);
        assert!(coord.azimuth.is_finite());

        let nadir = equatorial_to_horizontal(222.0, -33.68, 33.68, 42.0);
        assert_abs_diff_eq!(nadir.altitude, -90.0, epsilon = 1e-5);
        assert_eq!(nadir.azimuth, 0.0);
    }

    #[test]
    fn test_observer_at_pole() {
        // At the north pole the altitude equals the declination for every hour angle
        for lst in [0.0, 45.0, 123.0, 300.0] {
            let coord = equatorial_to_horizontal(10.0, 25.0, 90.0, lst);
            assert_abs_diff_eq!(coord.altitude, 25.0, epsilon = 1e-9);
            assert!(coord.azimuth.is_finite());
            assert!((0.0..360.0).contains(&coord.azimuth));
        }
    }

    #[test]
    fn test_below_horizon() {
        let coord = equatorial_to_horizontal(0.0, -80.0, 45.0, 0.0);
        assert!(!coord.is_above_horizon());
        assert_abs_diff_eq!(coord.altitude, -35.0, epsilon = 1e-9);
    }
}
