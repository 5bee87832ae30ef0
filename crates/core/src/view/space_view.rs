//! The space view: lifecycle, frame loop and event handling
//!
//! Everything the view draws lives in a [`ViewContext`] that exists only
//! while the view is active. Activation builds it and requests the first
//! tick; deactivation cancels the outstanding tick and drops it. Nothing is
//! rendered here. A rendering layer reads the context after each frame.

use crate::config::SceneConfig;
use crate::scene::{Globe, SceneData, Starfield, TriangleScene, TriangleSceneBuilder};
use crate::view::camera::{Camera, Viewport};
use crate::view::events::AppEvent;
use crate::view::labels::{ToggleLabel, DEFAULT_LANGUAGE};
use crate::view::scheduler::{TickHandle, TickScheduler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

/// Which visualisation the page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Map,
    Space,
}

/// Scene content owned by an active view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewContext {
    pub globe: Globe,
    pub starfield: Starfield,
    pub scene: TriangleScene,
    pub camera: Camera,
}

/// 3D globe view toggled against the 2D map
#[derive(Debug)]
pub struct SpaceView {
    config: SceneConfig,
    rng: StdRng,
    context: Option<ViewContext>,
    /// Tick requested for the next frame, if the loop is running
    pending_tick: Option<TickHandle>,
    frames: u64,
    language: String,
    viewport: Viewport,
}

impl SpaceView {
    /// Create an inactive view seeded from the OS.
    ///
    /// The configuration is not required to pass
    /// [`SceneConfig::validate`]; unusable particle speeds and star spreads
    /// are clamped when the scene is built, so activation never fails.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create an inactive view with reproducible particle speeds and stars.
    #[must_use]
    pub fn with_seed(config: SceneConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SceneConfig, rng: StdRng) -> Self {
        if config.validate().is_err() {
            warn!("Space view will clamp out-of-range configuration values while building");
        }
        Self {
            config,
            rng,
            context: None,
            pending_tick: None,
            frames: 0,
            language: DEFAULT_LANGUAGE.to_string(),
            viewport: Viewport::default(),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        if self.is_active() {
            ViewMode::Space
        } else {
            ViewMode::Map
        }
    }

    /// Enter the space view. Does nothing if already active.
    pub fn activate<S: TickScheduler + ?Sized>(&mut self, data: &SceneData, scheduler: &mut S) {
        if self.is_active() {
            return;
        }

        let globe = Globe::from_config(&self.config.globe);
        let starfield = Starfield::generate(&self.config.stars, &mut self.rng);
        let scene = TriangleSceneBuilder::new(&self.config).build(data, &mut self.rng);
        let camera = Camera::new(&self.config.camera, self.viewport);

        info!(
            "Space view activated: {} markers, {} connectors, {} stars",
            scene.markers.len(),
            scene.connectors.len(),
            starfield.len()
        );

        self.context = Some(ViewContext {
            globe,
            starfield,
            scene,
            camera,
        });
        self.frames = 0;
        self.pending_tick = Some(scheduler.request_tick());
    }

    /// Leave the space view, stopping the frame loop and dropping the scene.
    pub fn deactivate<S: TickScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending_tick.take() {
            scheduler.cancel_tick(handle);
        }
        if self.context.take().is_some() {
            info!("Space view deactivated after {} frames", self.frames);
        }
    }

    /// Flip between map and space; returns the mode now showing.
    pub fn toggle<S: TickScheduler + ?Sized>(
        &mut self,
        data: &SceneData,
        scheduler: &mut S,
    ) -> ViewMode {
        if self.is_active() {
            self.deactivate(scheduler);
        } else {
            self.activate(data, scheduler);
        }
        self.mode()
    }

    /// Run one animation step at the nominal frame rate.
    pub fn on_frame<S: TickScheduler + ?Sized>(&mut self, handle: TickHandle, scheduler: &mut S) {
        self.on_frame_scaled(handle, scheduler, 1.0);
    }

    /// Run one animation step, `dt_scale` nominal frames long.
    ///
    /// Handles other than the outstanding one are ignored, as is any frame
    /// delivered while inactive.
    pub fn on_frame_scaled<S: TickScheduler + ?Sized>(
        &mut self,
        handle: TickHandle,
        scheduler: &mut S,
        dt_scale: f64,
    ) {
        if self.pending_tick != Some(handle) {
            trace!("Ignoring stale tick {}", handle.id());
            return;
        }
        let Some(context) = self.context.as_mut() else {
            self.pending_tick = None;
            return;
        };

        context.globe.spin(dt_scale);
        context.scene.advance_particles(dt_scale);
        self.frames += 1;

        self.pending_tick = Some(scheduler.request_tick());
    }

    /// React to an application event.
    pub fn handle_event(&mut self, event: &AppEvent, data: &SceneData) {
        match event {
            AppEvent::TrianglesUpdated => self.rebuild(data),
            AppEvent::LanguageChanged(language) => {
                debug!("Toggle label language set to {}", language);
                self.language.clone_from(language);
            }
        }
    }

    /// Replace the triangle scene with one built from `data`.
    ///
    /// Inactive views ignore this; activation builds from fresh data anyway.
    pub fn rebuild(&mut self, data: &SceneData) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        context.scene = TriangleSceneBuilder::new(&self.config).build(data, &mut self.rng);
        info!(
            "Space view rebuilt: {} markers, {} connectors",
            context.scene.markers.len(),
            context.scene.connectors.len()
        );
    }

    /// Container resized. Only an active view updates its camera.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        self.viewport = Viewport::new(width, height);
        context.camera.set_viewport(self.viewport);
    }

    /// Label the toggle control should show
    #[must_use]
    pub fn toggle_label(&self) -> ToggleLabel {
        if self.is_active() {
            ToggleLabel::ViewMap
        } else {
            ToggleLabel::ViewFromSpace
        }
    }

    /// Toggle label text in the current language
    #[must_use]
    pub fn toggle_text(&self) -> &'static str {
        self.toggle_label().text(&self.language)
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn context(&self) -> Option<&ViewContext> {
        self.context.as_ref()
    }

    #[must_use]
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending_tick
    }

    /// Frames animated since the last activation
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
