//! # skymap
//!
//! Engine of an interactive sky map: converts catalogue coordinates to horizontal
//! coordinates for an observer and an instant, projects them onto a zoomable, pannable
//! disc, decides what to draw, and resolves taps back to objects.
//!
//! The entry point for hosts is [`sky_view::SkyView`].
pub mod catalog;
pub mod celestial;
pub mod config;
pub mod constants;
pub mod gesture;
pub mod horizontal;
pub mod locations;
pub mod projection;
pub mod scene;
pub mod settings;
pub mod sky_view;
pub mod skymap_errors;
pub mod time;
pub mod viewport;

pub use celestial::{CelestialObject, ObjectKind, ObjectType};
pub use config::ViewConfig;
pub use settings::Settings;
pub use sky_view::{SkyView, ViewUpdate};
pub use skymap_errors::SkyMapError;
