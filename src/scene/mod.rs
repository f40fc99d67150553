//! # Scene state
//!
//! A [`Scene`] is everything needed to place objects on screen: the object list, the
//! observing site and instant, and the viewport size. From these, plus the current
//! [`ViewportTransform`], it computes a [`ScreenPositions`] snapshot: one
//! [`ScreenPosition`] per object identifier.
//!
//! ## Snapshot model
//!
//! The snapshot is immutable. Each recomputation builds a fresh one and swaps it in behind
//! an [`Arc`], so readers (renderer, hit tester) always see a complete, consistent set of
//! positions, and the identifier set of the snapshot always equals the identifier set of
//! the object list.
//!
//! ```text
//! objects ─┐
//! observer ├─> SkyProjector (LST once) ──> ScreenPositions ──Arc swap──> renderer / hit test
//! time     │
//! viewport ┘
//! ```
//!
//! ## See also
//!
//! - [`renderer`] – Draw policy reading the snapshot.
//! - [`crate::hit_test`] – Tap resolution reading the snapshot.
pub mod renderer;

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::celestial::{CelestialObject, ObjectKind};
use crate::constants::{Degree, EpochMillis, ObjectId, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::projection::{ScreenPosition, SkyProjector, Viewport};
use crate::skymap_errors::SkyMapError;
use crate::time::SiderealModel;
use crate::viewport::ViewportTransform;

/// Geographic position of the observer, degrees, longitude east-positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude: Degree,
    pub longitude: Degree,
}

impl Default for Observer {
    fn default() -> Self {
        Observer {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl Observer {
    /// Validate and build an observer. Latitude must lie in `[-90, 90]`.
    pub fn new(latitude: Degree, longitude: Degree) -> Result<Self, SkyMapError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) || !longitude.is_finite()
        {
            return Err(SkyMapError::InvalidCoordinate {
                id: "observer".into(),
                reason: format!("latitude {latitude}, longitude {longitude}"),
            });
        }
        Ok(Observer {
            latitude,
            longitude,
        })
    }
}

/// Immutable set of projected positions, keyed by object identifier.
///
/// Constellations additionally carry the positions of their member stars, in member
/// order, so their line segments can be drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenPositions {
    positions: HashMap<ObjectId, ScreenPosition>,
    vertices: HashMap<ObjectId, Vec<ScreenPosition>>,
}

impl ScreenPositions {
    /// Project every object of the list.
    ///
    /// With `projector == None` (no usable viewport) every object is marked off-screen.
    pub fn compute(objects: &[CelestialObject], projector: Option<&SkyProjector>) -> Self {
        let mut positions = HashMap::with_capacity(objects.len());
        let mut vertices = HashMap::new();

        for object in objects {
            let position = projector
                .map(|p| p.project(object))
                .unwrap_or(ScreenPosition::OffScreen);
            positions.insert(object.id().to_string(), position);

            if let ObjectKind::Constellation { stars, .. } = object.kind() {
                let members = stars
                    .iter()
                    .map(|s| {
                        projector
                            .map(|p| p.project(s))
                            .unwrap_or(ScreenPosition::OffScreen)
                    })
                    .collect();
                vertices.insert(object.id().to_string(), members);
            }
        }

        ScreenPositions {
            positions,
            vertices,
        }
    }

    pub fn get(&self, id: &str) -> Option<ScreenPosition> {
        self.positions.get(id).copied()
    }

    /// Member star positions of a constellation.
    pub fn vertices(&self, id: &str) -> Option<&[ScreenPosition]> {
        self.vertices.get(id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    pub fn visible_count(&self) -> usize {
        self.positions.values().filter(|p| p.is_visible()).count()
    }
}

/// Objects, observer, instant and viewport, plus the derived position snapshot.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Arc<[CelestialObject]>,
    positions: Arc<ScreenPositions>,
    observer: Observer,
    time_millis: EpochMillis,
    viewport: Viewport,
    sidereal_model: SiderealModel,
}

impl Scene {
    pub fn new(observer: Observer, time_millis: EpochMillis, sidereal_model: SiderealModel) -> Self {
        Scene {
            objects: Arc::from(Vec::new()),
            positions: Arc::new(ScreenPositions::default()),
            observer,
            time_millis,
            viewport: Viewport::default(),
            sidereal_model,
        }
    }

    pub fn objects(&self) -> &[CelestialObject] {
        &self.objects
    }

    /// Shared handle on the current snapshot.
    pub fn positions(&self) -> Arc<ScreenPositions> {
        Arc::clone(&self.positions)
    }

    pub fn observer(&self) -> Observer {
        self.observer
    }

    pub fn time_millis(&self) -> EpochMillis {
        self.time_millis
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn find(&self, id: &str) -> Option<&CelestialObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Replace the object list wholesale and recompute.
    pub fn set_objects(&mut self, objects: Vec<CelestialObject>, transform: &ViewportTransform) {
        let duplicates = objects.iter().map(|o| o.id()).duplicates().join(", ");
        if !duplicates.is_empty() {
            warn!(%duplicates, "duplicate object ids, the last one wins in the position snapshot");
        }
        self.objects = Arc::from(objects);
        self.recompute(transform);
    }

    /// Change the observing site. Returns `false` (and skips recomputation) when unchanged.
    pub fn set_observer(&mut self, observer: Observer, transform: &ViewportTransform) -> bool {
        if observer == self.observer {
            return false;
        }
        self.observer = observer;
        self.recompute(transform);
        true
    }

    /// Change the observation instant. Returns `false` when unchanged.
    pub fn set_time(&mut self, time_millis: EpochMillis, transform: &ViewportTransform) -> bool {
        if time_millis == self.time_millis {
            return false;
        }
        self.time_millis = time_millis;
        self.recompute(transform);
        true
    }

    /// Change the viewport size. Returns `false` when unchanged.
    pub fn set_viewport(&mut self, viewport: Viewport, transform: &ViewportTransform) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.recompute(transform);
        true
    }

    /// Rebuild the position snapshot for `transform` and swap it in.
    pub fn recompute(&mut self, transform: &ViewportTransform) {
        let projector = self.viewport.is_valid().then(|| {
            SkyProjector::new(
                &self.observer,
                self.time_millis,
                self.viewport,
                *transform,
                self.sidereal_model,
            )
        });

        let positions = ScreenPositions::compute(&self.objects, projector.as_ref());
        debug!(
            objects = self.objects.len(),
            visible = positions.visible_count(),
            lst = projector.map(|p| p.local_sidereal_time()),
            "recomputed screen positions"
        );
        self.positions = Arc::new(positions);
    }
}
