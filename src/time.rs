//! # Time and angle math
//!
//! Pure functions turning a UTC instant and an observer longitude into a
//! Local Sidereal Time, plus the angle normalization used everywhere in the crate.
//!
//! ## Overview
//!
//! ```text
//! epoch millis ──(hifitime)──> Gregorian UTC ──> Julian Date ──> GMST ──(+ longitude)──> LST
//! ```
//!
//! Two sidereal models are available through [`SiderealModel`]:
//!
//! * [`SiderealModel::Polynomial`] evaluates the IAU 1982 cubic directly at the Julian Date
//!   of the instant. This is the model used by [`local_sidereal_time`].
//! * [`SiderealModel::Rotating`] evaluates the cubic at 0h UT of the date and adds the
//!   Earth-rotation term for the elapsed fraction of the day (sidereal/solar ratio
//!   `1.00273790934`).
//!
//! All angles are in **degrees**, longitudes are **east-positive**.
use hifitime::Epoch;
use tracing::warn;

use crate::constants::{
    Degree, EpochMillis, JulianDate, DAYS_PER_JULIAN_CENTURY, FULL_TURN, J2000_JD,
    SECONDS_PER_DEGREE,
};

/// Ratio of the sidereal day to the solar day
const SIDEREAL_RATE: f64 = 1.00273790934;

/// Seconds in a solar day
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Sidereal time model used to turn a Julian Date into GMST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiderealModel {
    /// IAU 1982 cubic evaluated at the instant itself.
    #[default]
    Polynomial,
    /// Cubic at 0h UT plus the rotation accumulated since midnight.
    Rotating,
}

/// Normalize an angle into `[0, 360)` degrees.
///
/// The function is total: non-finite input maps to `0.0`, and the result is idempotent
/// (`normalize_angle(normalize_angle(x)) == normalize_angle(x)`).
pub fn normalize_angle(angle: Degree) -> Degree {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut normalized = angle % FULL_TURN;
    if normalized < 0.0 {
        normalized += FULL_TURN;
    }
    // -1e-17 + 360.0 rounds back up to 360.0
    if normalized >= FULL_TURN {
        normalized = 0.0;
    }
    normalized
}

/// Gregorian calendar date and time of day (UTC) to Julian Date.
///
/// Arguments
/// -----------------
/// * `year`, `month` (1–12), `day`: Gregorian calendar date.
/// * `hour`, `minute`: time of day.
/// * `second`: seconds, possibly fractional.
///
/// Return
/// ----------
/// * The Julian Date of the instant. January and February are treated as months 13
///   and 14 of the previous year.
///
/// See also
/// ------------
/// * [`julian_date_from_millis`] – Same conversion starting from Unix milliseconds.
pub fn julian_date(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
) -> JulianDate {
    let (mut y, mut m) = (year, i32::from(month));
    if m <= 2 {
        y -= 1;
        m += 12;
    }

    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);

    let jd = (365.25 * f64::from(y + 4716)).floor()
        + (30.6001 * f64::from(m + 1)).floor()
        + f64::from(day)
        + f64::from(b)
        - 1524.5;

    let time_fraction =
        (f64::from(hour) + f64::from(minute) / 60.0 + second / 3600.0) / 24.0;

    jd + time_fraction
}

/// Unix milliseconds (UTC) to Julian Date.
///
/// The instant is broken down into its Gregorian UTC fields with [`hifitime`], then passed
/// to [`julian_date`]. The sub-second part is kept as a fraction of `second`.
pub fn julian_date_from_millis(utc_millis: EpochMillis) -> JulianDate {
    let epoch = Epoch::from_unix_milliseconds(utc_millis as f64);
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    let seconds = f64::from(second) + f64::from(nanos) * 1e-9;
    julian_date(year, month, day, hour, minute, seconds)
}

/// Current instant as Unix milliseconds (UTC).
///
/// Falls back to `0` when the system clock cannot be read.
pub fn now_millis() -> EpochMillis {
    match Epoch::now() {
        Ok(epoch) => epoch.to_unix_milliseconds().round() as EpochMillis,
        Err(e) => {
            warn!(error = %e, "system clock unavailable, using the Unix epoch");
            0
        }
    }
}

/// Cubic GMST polynomial in seconds, `t` in Julian centuries since J2000.
fn gmst_seconds(t: f64) -> f64 {
    // Polynomial coefficients (seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    ((C3 * t + C2) * t + C1) * t + C0
}

/// Greenwich Mean Sidereal Time in degrees, normalized to `[0, 360)`.
///
/// `t = (jd − 2451545.0) / 36525`, then
/// `24110.54841 + 8640184.812866·t + 0.093104·t² − 0.0000062·t³` seconds, divided by 240.
pub fn gmst(jd: JulianDate) -> Degree {
    let t = (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
    normalize_angle(gmst_seconds(t) / SECONDS_PER_DEGREE)
}

/// Greenwich Mean Sidereal Time in degrees under the given model.
///
/// See also
/// ------------
/// * [`gmst`] – The [`SiderealModel::Polynomial`] case.
pub fn gmst_with_model(jd: JulianDate, model: SiderealModel) -> Degree {
    match model {
        SiderealModel::Polynomial => gmst(jd),
        SiderealModel::Rotating => {
            // Julian Dates start at noon, 0h UT sits on the .5 boundary
            let jd0 = (jd - 0.5).floor() + 0.5;
            let t0 = (jd0 - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
            let since_midnight = (jd - jd0) * SECONDS_PER_DAY * SIDEREAL_RATE;
            normalize_angle((gmst_seconds(t0) + since_midnight) / SECONDS_PER_DEGREE)
        }
    }
}

/// Local Sidereal Time in degrees for an east-positive longitude and a UTC instant.
///
/// Arguments
/// -----------------
/// * `longitude`: observer longitude in degrees, east-positive.
/// * `utc_millis`: instant as milliseconds since the Unix epoch.
///
/// Return
/// ----------
/// * `normalize_angle(gmst(jd) + longitude)`.
pub fn local_sidereal_time(longitude: Degree, utc_millis: EpochMillis) -> Degree {
    local_sidereal_time_with_model(longitude, utc_millis, SiderealModel::Polynomial)
}

/// [`local_sidereal_time`] with an explicit [`SiderealModel`].
pub fn local_sidereal_time_with_model(
    longitude: Degree,
    utc_millis: EpochMillis,
    model: SiderealModel,
) -> Degree {
    let jd = julian_date_from_millis(utc_millis);
    normalize_angle(gmst_with_model(jd, model) + longitude)
}
