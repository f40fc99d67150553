//! # CSV catalogue
//!
//! Reads objects from a CSV file whose header is
//!
//! ```text
//! id,name,type,magnitude,ra,dec,tag
//! ```
//!
//! with optional trailing `distance_ly`, `diameter_km`, `orbital_distance_au` columns.
//! Fields are trimmed; an empty `tag` means no tag. The first invalid row aborts the load
//! with the corresponding [`SkyMapError`].
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{records_into_objects, CatalogProvider, ObjectRecord};
use crate::celestial::CelestialObject;
use crate::skymap_errors::SkyMapError;

/// Parse catalogue rows from any reader.
pub fn read_objects<R: Read>(reader: R) -> Result<Vec<CelestialObject>, SkyMapError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let records = csv_reader
        .deserialize::<ObjectRecord>()
        .collect::<Result<Vec<_>, csv::Error>>()?;
    records_into_objects(records)
}

/// Write objects in the catalogue CSV layout.
pub fn write_objects<W: std::io::Write>(
    writer: W,
    objects: &[CelestialObject],
) -> Result<(), SkyMapError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for object in objects {
        csv_writer.serialize(ObjectRecord::from(object))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Catalogue stored in a local CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvCatalog {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for CsvCatalog {
    async fn load_objects(&self) -> Result<Vec<CelestialObject>, SkyMapError> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "reading CSV catalogue");
        read_objects(bytes.as_slice())
    }
}
