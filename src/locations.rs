//! # Observing sites and search
//!
//! A small book of named observing sites loaded from JSON, the location filter used by the
//! site picker, and the object name search.
//!
//! ```json
//! [ {"name": "Islamabad", "latitude": 33.6844, "longitude": 73.0479},
//!   {"name": "Karachi",   "latitude": 24.8607, "longitude": 67.0011} ]
//! ```
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::celestial::CelestialObject;
use crate::constants::{Degree, DEFAULT_LATITUDE, DEFAULT_LOCATION_NAME, DEFAULT_LONGITUDE};
use crate::scene::Observer;
use crate::skymap_errors::SkyMapError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: Degree,
    pub longitude: Degree,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: Degree, longitude: Degree) -> Self {
        Location {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// The built-in default site.
    pub fn default_site() -> Self {
        Location::new(DEFAULT_LOCATION_NAME, DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }

    pub fn observer(&self) -> Result<Observer, SkyMapError> {
        Observer::new(self.latitude, self.longitude)
    }
}

/// Named observing sites.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationBook {
    locations: Vec<Location>,
}

impl Default for LocationBook {
    fn default() -> Self {
        LocationBook {
            locations: vec![Location::default_site()],
        }
    }
}

impl LocationBook {
    /// Build a book; an empty list falls back to the default site alone.
    pub fn new(locations: Vec<Location>) -> Self {
        if locations.is_empty() {
            return Self::default();
        }
        LocationBook { locations }
    }

    pub fn from_json(json: &str) -> Result<Self, SkyMapError> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Ok(Self::new(locations))
    }

    /// Load a JSON file, falling back to the default book when it cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let parsed = std::fs::read_to_string(path)
            .map_err(SkyMapError::from)
            .and_then(|json| Self::from_json(&json));
        match parsed {
            Ok(book) => book,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default location book");
                Self::default()
            }
        }
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    /// Site by case-insensitive name, the default site otherwise.
    pub fn by_name(&self, name: &str) -> Location {
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .unwrap_or_else(|| self.default_location())
    }

    /// The default site from the book when present, the built-in one otherwise.
    pub fn default_location(&self) -> Location {
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(DEFAULT_LOCATION_NAME))
            .cloned()
            .unwrap_or_else(Location::default_site)
    }

    /// Site names, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        self.locations
            .iter()
            .map(|l| l.name.as_str())
            .sorted_by_key(|n| n.to_lowercase())
            .collect()
    }
}

/// Sites whose name contains `query`, case-insensitively. An empty query keeps everything.
pub fn filter_locations<'a>(query: &str, locations: &'a [Location]) -> Vec<&'a Location> {
    let query = query.trim().to_lowercase();
    locations
        .iter()
        .filter(|l| query.is_empty() || l.name.to_lowercase().contains(&query))
        .collect()
}

/// First object whose name contains `query`, case-insensitively. An empty query finds nothing.
pub fn search_object<'a>(query: &str, objects: &'a [CelestialObject]) -> Option<&'a CelestialObject> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    objects
        .iter()
        .find(|o| o.name().to_lowercase().contains(&query))
}
