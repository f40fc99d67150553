//! # Object colours
//!
//! Colour resolution for drawn bodies:
//!
//! * **Stars** use the spectral class letter carried in their tag
//!   (`O`, `B`, `A`, `F`, `G`, `K`, `M`), white otherwise.
//! * **Planets, Sun and Moon** use their tag when it is a valid `#RRGGBB` / `#AARRGGBB`
//!   hex colour, then a per-name table, then a teal fallback.
//!
//! Invalid tags are never an error: they fall back and are logged.
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::skymap_errors::SkyMapError;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").expect("valid hex colour regex")
});

/// 8-bit ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Fallback colour for unknown solar system bodies
    pub const TEAL: Color = Color::rgb(0x57, 0xC5, 0xB6);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { a: 0xFF, r, g, b }
    }

    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    /// `#AARRGGBB` representation.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

/// Parse a `#RRGGBB` or `#AARRGGBB` colour.
pub fn parse_hex_color(tag: &str) -> Result<Color, SkyMapError> {
    let tag = tag.trim();
    if !HEX_COLOR.is_match(tag) {
        return Err(SkyMapError::InvalidColorTag(tag.to_string()));
    }
    let value = u32::from_str_radix(&tag[1..], 16)
        .map_err(|_| SkyMapError::InvalidColorTag(tag.to_string()))?;
    let color = if tag.len() == 7 {
        Color::from_rgb_u32(value)
    } else {
        Color::from_rgb_u32(value & 0x00FF_FFFF).with_alpha((value >> 24) as u8)
    };
    Ok(color)
}

/// Colour of a star from its spectral class letter.
///
/// Only the first character of the tag is read, case-insensitively.
pub fn star_color(spectral: Option<&str>) -> Color {
    let class = spectral
        .and_then(|s| s.trim().chars().next())
        .map(|c| c.to_ascii_uppercase());
    match class {
        Some('O') => Color::from_rgb_u32(0x9BB0FF),
        Some('B') => Color::from_rgb_u32(0xAABFFF),
        Some('A') => Color::from_rgb_u32(0xCAD7FF),
        Some('F') => Color::from_rgb_u32(0xF8F7FF),
        Some('G') => Color::from_rgb_u32(0xFFF4EA),
        Some('K') => Color::from_rgb_u32(0xFFD2A1),
        Some('M') => Color::from_rgb_u32(0xFFAD51),
        _ => Color::WHITE,
    }
}

/// Table colour of a solar system body, by case-insensitive name.
pub fn body_color_by_name(name: &str) -> Option<Color> {
    let rgb = match name.trim().to_lowercase().as_str() {
        "sun" => 0xFFFFA0,
        "moon" => 0xB0B0B0,
        "mercury" => 0x9E8966,
        "venus" => 0xFFF8DC,
        "mars" => 0xE07B58,
        "jupiter" => 0xD8C0A0,
        "saturn" => 0xF0E68C,
        "uranus" => 0xAFECF0,
        "neptune" => 0x87CEFA,
        _ => return None,
    };
    Some(Color::from_rgb_u32(rgb))
}

/// Colour of a planet, the Sun or the Moon: tag, then name table, then teal.
pub fn body_color(name: &str, tag: Option<&str>) -> Color {
    if let Some(tag) = tag.filter(|t| t.trim_start().starts_with('#')) {
        match parse_hex_color(tag) {
            Ok(color) => return color,
            Err(e) => warn!(name, tag, error = %e, "invalid colour tag, using fallback"),
        }
    }
    body_color_by_name(name).unwrap_or(Color::TEAL)
}
