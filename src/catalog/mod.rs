//! # Object catalogues
//!
//! Sources of [`CelestialObject`] lists and the background loader feeding them to the view.
//!
//! ## Providers
//!
//! Every source implements [`CatalogProvider`], an async contract returning the whole list:
//!
//! - [`mock::MockCatalog`] – seeded generated sky: Sun, Moon, planets, named bright stars
//!   and about a thousand filler stars.
//! - [`csv_reader::CsvCatalog`] – CSV file with header `id,name,type,magnitude,ra,dec,tag`.
//! - [`http::HttpCatalog`] – JSON array of the same records fetched with `reqwest`.
//!
//! CSV and JSON rows share the [`ObjectRecord`] shape.
//!
//! ## Background loading
//!
//! ```text
//! UI thread                         tokio runtime
//! ─────────                         ─────────────
//! loader.spawn(provider) ──────────> provider.load_objects().await
//!        │                                   │
//!        │ <──── mpsc: LoadOutcome { request, result }
//! loader.poll()  (one channel per request)
//! ```
//!
//! The UI thread never blocks: it polls the channel (typically once per frame) and applies
//! the outcome of the **latest** request only. Outcomes of superseded requests are dropped,
//! and a provider that panics still yields a failed outcome.
pub mod csv_reader;
pub mod http;
pub mod mock;

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::celestial::{CelestialObject, ObjectKind, ObjectType};
use crate::skymap_errors::SkyMapError;

/// Source of a complete object list.
pub trait CatalogProvider {
    fn load_objects(
        &self,
    ) -> impl Future<Output = Result<Vec<CelestialObject>, SkyMapError>> + Send;
}

/// One catalogue row, as found in CSV files and JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub magnitude: f64,
    pub ra: f64,
    pub dec: f64,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub distance_ly: Option<f64>,
    #[serde(default)]
    pub diameter_km: Option<f64>,
    #[serde(default)]
    pub orbital_distance_au: Option<f64>,
}

impl ObjectRecord {
    /// Validate the row and build the object.
    pub fn into_object(self) -> Result<CelestialObject, SkyMapError> {
        let object_type: ObjectType = self.object_type.parse()?;
        let kind = match object_type {
            ObjectType::Star => ObjectKind::Star {
                distance_ly: self.distance_ly,
            },
            ObjectType::Planet => ObjectKind::Planet {
                diameter_km: self.diameter_km,
                orbital_distance_au: self.orbital_distance_au,
            },
            other => ObjectKind::default_for(other),
        };
        let object =
            CelestialObject::new(self.id, self.name, self.magnitude, self.ra, self.dec, kind)?;
        Ok(match self.tag {
            Some(tag) => object.with_tag(tag),
            None => object,
        })
    }
}

impl From<&CelestialObject> for ObjectRecord {
    fn from(object: &CelestialObject) -> Self {
        let (distance_ly, diameter_km, orbital_distance_au) = match object.kind() {
            ObjectKind::Star { distance_ly } => (*distance_ly, None, None),
            ObjectKind::Planet {
                diameter_km,
                orbital_distance_au,
            } => (None, *diameter_km, *orbital_distance_au),
            _ => (None, None, None),
        };
        ObjectRecord {
            id: object.id().to_string(),
            name: object.name().to_string(),
            object_type: object.object_type().to_string(),
            magnitude: object.magnitude(),
            ra: object.ra(),
            dec: object.dec(),
            tag: object.tag().map(str::to_string),
            distance_ly,
            diameter_km,
            orbital_distance_au,
        }
    }
}

/// Convert records into objects; the first invalid row aborts the whole load.
pub fn records_into_objects(
    records: impl IntoIterator<Item = ObjectRecord>,
) -> Result<Vec<CelestialObject>, SkyMapError> {
    records.into_iter().map(ObjectRecord::into_object).collect()
}

/// Identifier of one load request, increasing with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Completion message of a load request.
#[derive(Debug)]
pub struct LoadOutcome {
    pub request: RequestId,
    pub result: Result<Vec<CelestialObject>, SkyMapError>,
}

/// Load status shown by the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading(RequestId),
    Loaded { count: usize },
    Failed(String),
}

/// Runs providers on a tokio runtime and hands their results back to the UI thread.
///
/// Each request gets its own channel. Starting a request drops the receiver of the
/// previous one, so a superseded provider finishing late sends into a closed channel.
#[derive(Debug)]
pub struct CatalogLoader {
    runtime: Handle,
    receiver: Option<UnboundedReceiver<LoadOutcome>>,
    next_request: u64,
    latest: Option<RequestId>,
}

impl CatalogLoader {
    pub fn new(runtime: Handle) -> Self {
        CatalogLoader {
            runtime,
            receiver: None,
            next_request: 0,
            latest: None,
        }
    }

    /// Loader bound to the runtime of the calling context.
    pub fn current() -> Result<Self, SkyMapError> {
        let runtime = Handle::try_current()
            .map_err(|e| SkyMapError::CatalogLoadFailed(format!("no tokio runtime: {e}")))?;
        Ok(Self::new(runtime))
    }

    /// Most recent request, the only one whose outcome is delivered.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    /// `true` while the outcome of the latest request has not been handed out.
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Start loading `provider` in the background. Supersedes any earlier request.
    ///
    /// Exactly one outcome is sent per request: the provider result, or
    /// [`SkyMapError::CatalogLoadFailed`] when the provider task panics or is cancelled.
    pub fn spawn<P>(&mut self, provider: Arc<P>) -> RequestId
    where
        P: CatalogProvider + Send + Sync + 'static,
    {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.latest = Some(request);

        let (sender, receiver) = mpsc::unbounded_channel();
        self.receiver = Some(receiver);

        let load = self
            .runtime
            .spawn(async move { provider.load_objects().await });
        self.runtime.spawn(async move {
            let result = match load.await {
                Ok(result) => result,
                Err(e) => Err(SkyMapError::CatalogLoadFailed(format!(
                    "catalogue provider task aborted: {e}"
                ))),
            };
            match &result {
                Ok(objects) => info!(?request, count = objects.len(), "catalogue loaded"),
                Err(e) => warn!(?request, error = %e, "catalogue load failed"),
            }
            if sender.send(LoadOutcome { request, result }).is_err() {
                debug!(?request, "dropping stale load outcome");
            }
        });
        debug!(?request, "catalogue load started");
        request
    }

    /// Return the outcome of the latest request if it has arrived. Never blocks.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(outcome) => {
                self.receiver = None;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                None
            }
        }
    }

    /// Wait for the outcome of the latest request.
    ///
    /// Return
    /// ----------
    /// * [`SkyMapError::NoPendingLoad`] when no request is waiting for its outcome.
    pub async fn next_outcome(&mut self) -> Result<LoadOutcome, SkyMapError> {
        let receiver = self.receiver.as_mut().ok_or(SkyMapError::NoPendingLoad)?;
        let outcome = receiver.recv().await;
        self.receiver = None;
        outcome.ok_or(SkyMapError::NoPendingLoad)
    }
}
