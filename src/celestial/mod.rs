//! # Celestial objects
//!
//! The object model shared by every stage of the pipeline. A [`CelestialObject`] is an
//! immutable record carrying the fields common to all bodies (identifier, name, apparent
//! magnitude, equatorial position, optional tag) plus an [`ObjectKind`] with the
//! variant-specific data.
//!
//! ## Variants
//!
//! | kind            | payload                                           | tag meaning          |
//! |-----------------|---------------------------------------------------|----------------------|
//! | `Star`          | distance in light years                           | spectral class       |
//! | `Planet`        | diameter (km), orbital distance (AU)              | `#RRGGBB` colour     |
//! | `Sun`, `Moon`   | –                                                 | `#RRGGBB` colour     |
//! | `Constellation` | member stars, line index pairs, mythology         | –                    |
//!
//! Construction validates the position: RA and Dec must be finite, Dec within
//! `[-90, 90]`. RA is normalized into `[0, 360)`.
//!
//! ## See also
//!
//! - [`color`] – Colour resolution from tags and names.
pub mod color;

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, ObjectId};
use crate::skymap_errors::SkyMapError;
use crate::time::normalize_angle;

/// Plain type tag of a [`CelestialObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Star,
    Planet,
    Sun,
    Moon,
    Constellation,
}

impl std::str::FromStr for ObjectType {
    type Err = SkyMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "star" => Ok(ObjectType::Star),
            "planet" => Ok(ObjectType::Planet),
            "sun" => Ok(ObjectType::Sun),
            "moon" => Ok(ObjectType::Moon),
            "constellation" => Ok(ObjectType::Constellation),
            _ => Err(SkyMapError::UnknownObjectType(s.to_string())),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Star => "star",
            ObjectType::Planet => "planet",
            ObjectType::Sun => "sun",
            ObjectType::Moon => "moon",
            ObjectType::Constellation => "constellation",
        };
        f.write_str(name)
    }
}

/// Variant-specific data of a [`CelestialObject`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Star {
        distance_ly: Option<f64>,
    },
    Planet {
        diameter_km: Option<f64>,
        orbital_distance_au: Option<f64>,
    },
    Sun,
    Moon,
    Constellation {
        stars: Vec<CelestialObject>,
        /// Pairs of indices into `stars`
        lines: Vec<(usize, usize)>,
        mythology: Option<String>,
    },
}

impl ObjectKind {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectKind::Star { .. } => ObjectType::Star,
            ObjectKind::Planet { .. } => ObjectType::Planet,
            ObjectKind::Sun => ObjectType::Sun,
            ObjectKind::Moon => ObjectType::Moon,
            ObjectKind::Constellation { .. } => ObjectType::Constellation,
        }
    }

    /// Empty payload for a given type tag.
    pub fn default_for(object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Star => ObjectKind::Star { distance_ly: None },
            ObjectType::Planet => ObjectKind::Planet {
                diameter_km: None,
                orbital_distance_au: None,
            },
            ObjectType::Sun => ObjectKind::Sun,
            ObjectType::Moon => ObjectKind::Moon,
            ObjectType::Constellation => ObjectKind::Constellation {
                stars: Vec::new(),
                lines: Vec::new(),
                mythology: None,
            },
        }
    }
}

/// An object of the sky, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialObject {
    id: ObjectId,
    name: String,
    magnitude: f64,
    ra: Degree,
    dec: Degree,
    tag: Option<String>,
    kind: ObjectKind,
}

impl CelestialObject {
    /// Build and validate an object.
    ///
    /// Arguments
    /// -----------------
    /// * `id`: identifier, unique within a scene.
    /// * `name`: display name.
    /// * `magnitude`: apparent magnitude (lower is brighter).
    /// * `ra`: right ascension in degrees, normalized into `[0, 360)`.
    /// * `dec`: declination in degrees, `[-90, 90]`.
    /// * `kind`: variant payload.
    ///
    /// Return
    /// ----------
    /// * The object, or [`SkyMapError::InvalidCoordinate`] / [`SkyMapError::InvalidMagnitude`]
    ///   / [`SkyMapError::InvalidConstellationLine`] when validation fails.
    pub fn new(
        id: impl Into<ObjectId>,
        name: impl Into<String>,
        magnitude: f64,
        ra: Degree,
        dec: Degree,
        kind: ObjectKind,
    ) -> Result<Self, SkyMapError> {
        let id = id.into();
        if !ra.is_finite() {
            return Err(SkyMapError::InvalidCoordinate {
                id,
                reason: format!("right ascension {ra} is not finite"),
            });
        }
        if !dec.is_finite() || !(-90.0..=90.0).contains(&dec) {
            return Err(SkyMapError::InvalidCoordinate {
                id,
                reason: format!("declination {dec} outside [-90, 90]"),
            });
        }
        if !magnitude.is_finite() {
            return Err(SkyMapError::InvalidMagnitude(id));
        }
        if let ObjectKind::Constellation { stars, lines, .. } = &kind {
            if let Some(&(a, b)) = lines
                .iter()
                .find(|(a, b)| *a >= stars.len() || *b >= stars.len())
            {
                return Err(SkyMapError::InvalidConstellationLine(a, b, id));
            }
        }

        Ok(CelestialObject {
            id,
            name: name.into(),
            magnitude,
            ra: normalize_angle(ra),
            dec,
            tag: None,
            kind,
        })
    }

    pub fn star(
        id: impl Into<ObjectId>,
        name: impl Into<String>,
        magnitude: f64,
        ra: Degree,
        dec: Degree,
    ) -> Result<Self, SkyMapError> {
        Self::new(id, name, magnitude, ra, dec, ObjectKind::Star { distance_ly: None })
    }

    pub fn planet(
        id: impl Into<ObjectId>,
        name: impl Into<String>,
        magnitude: f64,
        ra: Degree,
        dec: Degree,
    ) -> Result<Self, SkyMapError> {
        Self::new(
            id,
            name,
            magnitude,
            ra,
            dec,
            ObjectKind::default_for(ObjectType::Planet),
        )
    }

    /// Attach a tag (spectral class for stars, hex colour for solar system bodies).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = if tag.trim().is_empty() { None } else { Some(tag) };
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn ra(&self) -> Degree {
        self.ra
    }

    pub fn dec(&self) -> Degree {
        self.dec
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    /// `true` for planets, the Sun and the Moon.
    pub fn is_solar_system_body(&self) -> bool {
        matches!(
            self.kind,
            ObjectKind::Planet { .. } | ObjectKind::Sun | ObjectKind::Moon
        )
    }
}

impl fmt::Display for CelestialObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}) mag {:.2} RA {:.4}° Dec {:.4}°",
            self.name,
            self.id,
            self.object_type(),
            self.magnitude,
            self.ra,
            self.dec
        )?;
        if let ObjectKind::Constellation { stars, .. } = &self.kind {
            write!(f, " stars: {}", stars.iter().map(|s| s.name()).join(", "))?;
        }
        Ok(())
    }
}
