//! # User display settings
//!
//! [`Settings`] is a read-only snapshot of the user's display preferences. The view never
//! reads preferences from a global store: the host builds a snapshot (from defaults, from
//! JSON, or from the key/value pairs of its preference storage) and hands it to
//! [`SkyView::apply_settings`](crate::sky_view::SkyView::apply_settings).
//!
//! ## Keys
//!
//! | key                        | type | default |
//! |----------------------------|------|---------|
//! | `show_stars`               | bool | `true`  |
//! | `show_planets`             | bool | `true`  |
//! | `show_labels`              | bool | `true`  |
//! | `show_faint_stars`         | bool | `false` |
//! | `show_glow_effects`        | bool | `true`  |
//! | `show_constellation_lines` | bool | `true`  |
//! | `brightness`               | f64  | `1.0`   |
//! | `zoom_sensitivity`         | f64  | `0.5`   |
//!
//! Float values are clamped into `[0.10, 1.00]`.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::skymap_errors::SkyMapError;

/// Lower bound of `brightness` and `zoom_sensitivity`
pub const SETTING_FLOAT_MIN: f64 = 0.1;
/// Upper bound of `brightness` and `zoom_sensitivity`
pub const SETTING_FLOAT_MAX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub show_stars: bool,
    pub show_planets: bool,
    pub show_labels: bool,
    pub show_faint_stars: bool,
    pub show_glow_effects: bool,
    pub show_constellation_lines: bool,
    pub brightness: f64,
    pub zoom_sensitivity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            show_stars: true,
            show_planets: true,
            show_labels: true,
            show_faint_stars: false,
            show_glow_effects: true,
            show_constellation_lines: true,
            brightness: 1.0,
            zoom_sensitivity: 0.5,
        }
    }
}

fn clamp_setting(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(SETTING_FLOAT_MIN, SETTING_FLOAT_MAX)
    } else {
        SETTING_FLOAT_MAX
    }
}

impl Settings {
    /// Return a copy with the float settings clamped into `[0.10, 1.00]`.
    pub fn clamped(mut self) -> Self {
        self.brightness = clamp_setting(self.brightness);
        self.zoom_sensitivity = clamp_setting(self.zoom_sensitivity);
        self
    }

    /// Parse a JSON object; missing keys take their default value.
    pub fn from_json(json: &str) -> Result<Self, SkyMapError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    /// Build a snapshot from raw key/value pairs, starting from the defaults.
    ///
    /// Arguments
    /// -----------------
    /// * `pairs`: `(key, value)` strings as stored by the host. Booleans accept
    ///   `true`/`false`/`1`/`0`, floats any decimal notation.
    ///
    /// Return
    /// ----------
    /// * The clamped snapshot, or [`SkyMapError::InvalidSetting`] for the first value that
    ///   does not parse. Unknown keys are skipped with a warning.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, SkyMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Settings::default();
        for (key, value) in pairs {
            settings.set(key.as_ref(), value.as_ref())?;
        }
        Ok(settings.clamped())
    }

    /// Set one key from its textual value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SkyMapError> {
        let invalid = || SkyMapError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };
        let flag = |v: &str| match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        };
        let float = |v: &str| v.trim().parse::<f64>().ok().filter(|f| f.is_finite());

        match key {
            "show_stars" => self.show_stars = flag(value).ok_or_else(invalid)?,
            "show_planets" => self.show_planets = flag(value).ok_or_else(invalid)?,
            "show_labels" => self.show_labels = flag(value).ok_or_else(invalid)?,
            "show_faint_stars" => self.show_faint_stars = flag(value).ok_or_else(invalid)?,
            "show_glow_effects" => self.show_glow_effects = flag(value).ok_or_else(invalid)?,
            "show_constellation_lines" => {
                self.show_constellation_lines = flag(value).ok_or_else(invalid)?
            }
            "brightness" => self.brightness = clamp_setting(float(value).ok_or_else(invalid)?),
            "zoom_sensitivity" => {
                self.zoom_sensitivity = clamp_setting(float(value).ok_or_else(invalid)?)
            }
            _ => warn!(key, "ignoring unknown setting"),
        }
        Ok(())
    }
}

/// Anything able to hand out the current settings snapshot.
pub trait SettingsSource {
    fn snapshot(&self) -> Settings;
}

impl SettingsSource for Settings {
    fn snapshot(&self) -> Settings {
        self.clamped()
    }
}

#[cfg(test)]
mod settings_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.show_stars && s.show_planets && s.show_labels);
        assert!(!s.show_faint_stars);
        assert_eq!(s.brightness, 1.0);
        assert_eq!(s.zoom_sensitivity, 0.5);
    }

    #[test]
    fn test_from_pairs() {
        let s = Settings::from_pairs([
            ("show_faint_stars", "true"),
            ("show_labels", "0"),
            ("brightness", "0.05"),
            ("zoom_sensitivity", "3.5"),
            ("night_mode", "true"),
        ])
        .unwrap();

        assert!(s.show_faint_stars);
        assert!(!s.show_labels);
        assert_eq!(s.brightness, 0.1);
        assert_eq!(s.zoom_sensitivity, 1.0);
    }

    #[test]
    fn test_invalid_value() {
        let err = Settings::from_pairs([("brightness", "bright")]).unwrap_err();
        assert_eq!(
            err,
            SkyMapError::InvalidSetting {
                key: "brightness".into(),
                value: "bright".into()
            }
        );

        assert!(Settings::from_pairs([("show_stars", "yes please")]).is_err());
        assert!(Settings::from_pairs([("brightness", "NaN")]).is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let s = Settings::from_json(r#"{"show_glow_effects": false, "brightness": 0.4}"#).unwrap();
        assert!(!s.show_glow_effects);
        assert_eq!(s.brightness, 0.4);
        assert!(s.show_stars);
        assert_eq!(s.zoom_sensitivity, 0.5);

        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SkyMapError::JsonError(_))
        ));
    }
}
