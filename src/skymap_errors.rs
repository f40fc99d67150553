use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyMapError {
    #[error("Invalid coordinate for object {id}: {reason}")]
    InvalidCoordinate { id: String, reason: String },

    #[error("Invalid magnitude for object {0}")]
    InvalidMagnitude(String),

    #[error("Unknown celestial object type: {0}")]
    UnknownObjectType(String),

    #[error("Invalid color tag: {0}")]
    InvalidColorTag(String),

    #[error("Invalid value {value:?} for setting {key}")]
    InvalidSetting { key: String, value: String },

    #[error("Invalid constellation line ({0}, {1}) in {2}")]
    InvalidConstellationLine(usize, usize, String),

    #[error("Catalog load failed: {0}")]
    CatalogLoadFailed(String),

    #[error("No catalog load is pending")]
    NoPendingLoad,

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV catalog error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },
}

impl PartialEq for SkyMapError {
    fn eq(&self, other: &Self) -> bool {
        use SkyMapError::*;
        match (self, other) {
            (
                InvalidCoordinate { id: a, reason: ra },
                InvalidCoordinate { id: b, reason: rb },
            ) => a == b && ra == rb,
            (InvalidMagnitude(a), InvalidMagnitude(b)) => a == b,
            (UnknownObjectType(a), UnknownObjectType(b)) => a == b,
            (InvalidColorTag(a), InvalidColorTag(b)) => a == b,
            (
                InvalidSetting { key: ka, value: va },
                InvalidSetting { key: kb, value: vb },
            ) => ka == kb && va == vb,
            (InvalidConstellationLine(a1, a2, a3), InvalidConstellationLine(b1, b2, b3)) => {
                a1 == b1 && a2 == b2 && a3 == b3
            }
            (CatalogLoadFailed(a), CatalogLoadFailed(b)) => a == b,
            (
                HttpStatus { status: sa, url: ua },
                HttpStatus { status: sb, url: ub },
            ) => sa == sb && ua == ub,

            // foreign payloads are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (ReqwestError(_), ReqwestError(_)) => true,

            (NoPendingLoad, NoPendingLoad) => true,

            _ => false,
        }
    }
}
