//! # SkyView: the interactive sky map façade
//!
//! [`SkyView`] wires together the pieces of the engine behind the operations a host UI
//! needs:
//!
//! 1. **Scene** ([`Scene`]) – objects, observer, instant, viewport and the position snapshot.
//! 2. **Gestures** ([`GestureController`]) – viewport transform and animations.
//! 3. **Configuration** ([`ViewConfig`]) and the current **settings** snapshot ([`Settings`]).
//! 4. **Catalogue loading state** ([`LoadState`]) fed by a [`CatalogLoader`].
//! 5. An optional [`ObjectTapListener`] notified once per resolved tap.
//!
//! Every input that moves objects on screen (observer, time, viewport size, object list,
//! settings, zoom/pan) rebuilds the position snapshot before returning, so
//! [`render`](SkyView::render) and [`object_at`](SkyView::object_at) always read positions
//! consistent with the current state.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use std::time::Instant;
//! use skymap::catalog::mock::MockCatalog;
//! use skymap::config::ViewConfig;
//! use skymap::gesture::GestureEvent;
//! use skymap::sky_view::SkyView;
//!
//! let mut view = SkyView::new(ViewConfig::default());
//! view.set_viewport_size(1080.0, 1920.0);
//! view.update_objects(MockCatalog::default().generate().unwrap());
//!
//! view.handle_gesture(GestureEvent::Scale { raw_factor: 0.8 }, Instant::now());
//! let frame = view.render();
//! println!("{} draw commands", frame.commands.len());
//! ```
//!
//! ## See also
//! ------------
//! * [`render`](crate::scene::renderer::render) – Draw policy.
//! * [`hit_test`](crate::hit_test::hit_test) – Tap resolution.
//! * [`CatalogLoader`] – Background catalogue loading.
use std::sync::Arc;
use std::time::Instant;

use nalgebra::Point2;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogLoader, CatalogProvider, LoadOutcome, LoadState, RequestId};
use crate::celestial::CelestialObject;
use crate::config::ViewConfig;
use crate::constants::{Degree, EpochMillis, Pixel};
use crate::gesture::animation::{AnimationHandle, AnimationStep};
use crate::gesture::{GestureController, GestureEvent, GestureOutcome};
use crate::hit_test::hit_test;
use crate::locations::search_object;
use crate::projection::Viewport;
use crate::scene::renderer::{render, Frame};
use crate::scene::{Observer, Scene, ScreenPositions};
use crate::settings::{Settings, SettingsSource};
use crate::skymap_errors::SkyMapError;
use crate::time::now_millis;
use crate::viewport::ViewportTransform;

/// Receives the object resolved by a tap.
pub trait ObjectTapListener {
    fn on_object_tapped(&mut self, object: &CelestialObject);
}

impl<F: FnMut(&CelestialObject)> ObjectTapListener for F {
    fn on_object_tapped(&mut self, object: &CelestialObject) {
        self(object)
    }
}

/// What the host should do after an input.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Positions changed: schedule a redraw.
    Redraw,
    /// An animation started; tick it every frame.
    Animating(AnimationHandle),
    Tapped(CelestialObject),
    Missed,
    Unchanged,
}

pub struct SkyView {
    scene: Scene,
    gestures: GestureController,
    config: ViewConfig,
    settings: Settings,
    load_state: LoadState,
    tap_listener: Option<Box<dyn ObjectTapListener + Send>>,
}

impl std::fmt::Debug for SkyView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkyView")
            .field("scene", &self.scene)
            .field("gestures", &self.gestures)
            .field("settings", &self.settings)
            .field("load_state", &self.load_state)
            .field("has_tap_listener", &self.tap_listener.is_some())
            .finish()
    }
}

impl SkyView {
    /// A view at the default site, the current instant, default settings and no objects.
    pub fn new(config: ViewConfig) -> Self {
        Self::with_settings(config, &Settings::default())
    }

    /// Like [`SkyView::new`] with the settings read from `source`.
    pub fn with_settings(config: ViewConfig, source: &impl SettingsSource) -> Self {
        let scene = Scene::new(Observer::default(), now_millis(), config.sidereal_model);
        SkyView {
            scene,
            gestures: GestureController::new(),
            config,
            settings: source.snapshot(),
            load_state: LoadState::Idle,
            tap_listener: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn objects(&self) -> &[CelestialObject] {
        self.scene.objects()
    }

    pub fn positions(&self) -> Arc<ScreenPositions> {
        self.scene.positions()
    }

    pub fn transform(&self) -> &ViewportTransform {
        self.gestures.transform()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn set_tap_listener(&mut self, listener: impl ObjectTapListener + Send + 'static) {
        debug!("tap listener set");
        self.tap_listener = Some(Box::new(listener));
    }

    pub fn clear_tap_listener(&mut self) {
        debug!("tap listener cleared");
        self.tap_listener = None;
    }

    /// Move the observer. Returns `Ok(false)` when the site is unchanged.
    pub fn set_observer_location(
        &mut self,
        latitude: Degree,
        longitude: Degree,
    ) -> Result<bool, SkyMapError> {
        let observer = Observer::new(latitude, longitude)?;
        let changed = self.scene.set_observer(observer, self.gestures.transform());
        if changed {
            info!(latitude, longitude, "observer location changed");
        }
        Ok(changed)
    }

    /// Set the observation instant, Unix milliseconds UTC. Returns `false` when unchanged.
    pub fn set_observation_time(&mut self, time_millis: EpochMillis) -> bool {
        self.scene.set_time(time_millis, self.gestures.transform())
    }

    /// Resize the drawing surface. Returns `false` when unchanged.
    pub fn set_viewport_size(&mut self, width: Pixel, height: Pixel) -> bool {
        self.scene
            .set_viewport(Viewport::new(width, height), self.gestures.transform())
    }

    /// Replace the object list.
    pub fn update_objects(&mut self, objects: Vec<CelestialObject>) {
        info!(count = objects.len(), "objects updated");
        self.scene.set_objects(objects, self.gestures.transform());
    }

    /// Take a new settings snapshot. Positions are recomputed, the viewport is untouched.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
        self.scene.recompute(self.gestures.transform());
    }

    /// Dispatch a gesture, recompute positions when the transform changed, and notify the
    /// tap listener on a resolved tap.
    pub fn handle_gesture(&mut self, event: GestureEvent, now: Instant) -> ViewUpdate {
        let update = match self.gestures.handle(
            event,
            &self.scene,
            &self.settings,
            &self.config,
            now,
        ) {
            GestureOutcome::Recompute => ViewUpdate::Redraw,
            GestureOutcome::Animating(handle) => ViewUpdate::Animating(handle),
            GestureOutcome::Tapped(object) => ViewUpdate::Tapped(object.clone()),
            GestureOutcome::Missed => ViewUpdate::Missed,
            GestureOutcome::Ignored => ViewUpdate::Unchanged,
        };

        match &update {
            ViewUpdate::Redraw => self.scene.recompute(self.gestures.transform()),
            ViewUpdate::Tapped(object) => {
                if let Some(listener) = self.tap_listener.as_mut() {
                    listener.on_object_tapped(object);
                }
            }
            _ => {}
        }
        update
    }

    /// Advance an animation and recompute positions.
    ///
    /// Return
    /// ----------
    /// * `None` when `handle` is superseded or finished; nothing changes then.
    pub fn tick_animation(&mut self, handle: AnimationHandle, now: Instant) -> Option<AnimationStep> {
        let step = self.gestures.tick(handle, now)?;
        self.scene.recompute(self.gestures.transform());
        Some(step)
    }

    /// Start an animation bringing `id` to the centre of the viewport.
    ///
    /// Return
    /// ----------
    /// * `None` when the object is unknown or off screen.
    pub fn center_on_object(&mut self, id: &str, now: Instant) -> Option<AnimationHandle> {
        let handle = self.gestures.recenter_on(id, &self.scene, &self.config, now);
        if handle.is_none() {
            debug!(id, "cannot recenter on an unknown or off-screen object");
        }
        handle
    }

    pub fn render(&self) -> Frame {
        render(
            &self.scene,
            self.gestures.transform(),
            &self.settings,
            &self.config,
        )
    }

    /// Object under a screen point, without notifying the listener.
    pub fn object_at(&self, x: Pixel, y: Pixel) -> Option<&CelestialObject> {
        let positions = self.scene.positions();
        hit_test(
            Point2::new(x, y),
            self.scene.objects(),
            &positions,
            self.gestures.transform().zoom(),
            &self.config,
        )
    }

    pub fn search_object(&self, query: &str) -> Option<&CelestialObject> {
        search_object(query, self.scene.objects())
    }

    /// Start loading a catalogue in the background.
    pub fn begin_load<P>(&mut self, loader: &mut CatalogLoader, provider: Arc<P>) -> RequestId
    where
        P: CatalogProvider + Send + Sync + 'static,
    {
        let request = loader.spawn(provider);
        self.load_state = LoadState::Loading(request);
        request
    }

    /// Apply a load outcome if it answers the pending request.
    ///
    /// A failure keeps the current objects and records [`LoadState::Failed`]. Outcomes of
    /// other requests are ignored.
    pub fn apply_load_outcome(&mut self, outcome: LoadOutcome) -> bool {
        if self.load_state != LoadState::Loading(outcome.request) {
            debug!(request = ?outcome.request, "ignoring stale load outcome");
            return false;
        }
        match outcome.result {
            Ok(objects) => {
                self.load_state = LoadState::Loaded {
                    count: objects.len(),
                };
                self.update_objects(objects);
            }
            Err(e) => {
                warn!(error = %e, "catalogue load failed, keeping current objects");
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    /// Drain the loader and apply the latest outcome, if any. Never blocks.
    pub fn poll_loader(&mut self, loader: &mut CatalogLoader) -> bool {
        match loader.poll() {
            Some(outcome) => self.apply_load_outcome(outcome),
            None => false,
        }
    }
}
