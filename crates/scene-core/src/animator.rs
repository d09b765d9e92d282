//! Owns one mounted scene: its scroll progress, its render backend and the
//! start/stop lifecycle.
//!
//! Events write progress; the frame loop reads it. Nothing here touches
//! platform APIs, so the same animator runs under `cargo test` with a mock
//! backend and in the browser with the wgpu renderer.

use crate::camera::{Camera, Viewport};
use crate::error::SceneError;
use crate::graph::SceneGraph;
use crate::scenes::{AnimatedScene, FrameClock};
use crate::scroll::{ElementRect, Progress, ScrollTracker};
use glam::Vec2;
use std::fmt;

/// Draws a scene graph. The backend may clear strand dirty flags once it has
/// uploaded their points.
pub trait RenderBackend {
    type Error: fmt::Display;

    fn draw(&mut self, graph: &mut SceneGraph, camera: &Camera) -> Result<(), Self::Error>;

    /// Free every GPU resource. Called exactly once per backend.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

pub struct SceneAnimator<S, B: RenderBackend> {
    scene: S,
    tracker: Option<ScrollTracker>,
    backend: Option<B>,
    lifecycle: Lifecycle,
    frames: u64,
}

impl<S: AnimatedScene, B: RenderBackend> SceneAnimator<S, B> {
    pub fn new(scene: S) -> Self {
        let tracker = scene.progress_strategy().map(ScrollTracker::new);
        Self {
            scene,
            tracker,
            backend: None,
            lifecycle: Lifecycle::Idle,
            frames: 0,
        }
    }

    /// Idle → Running. Returns false if the animator was already started or
    /// has been stopped; a stopped animator never restarts.
    pub fn start(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Idle {
            return false;
        }
        self.lifecycle = Lifecycle::Running;
        log::info!("[animator] {} started", self.scene.kind());
        true
    }

    /// Stop and release the backend. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
        log::info!(
            "[animator] {} stopped after {} frames",
            self.scene.kind(),
            self.frames
        );
    }

    /// Hand over a backend once it is ready. If the animator was stopped
    /// while the backend was being created, it is released right away.
    pub fn attach_backend(&mut self, mut backend: B) {
        if self.lifecycle == Lifecycle::Stopped {
            log::info!("[animator] backend arrived after stop; releasing");
            backend.release();
            return;
        }
        if let Some(mut old) = self.backend.replace(backend) {
            old.release();
        }
    }

    #[inline]
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn on_scroll(&mut self, host: Option<ElementRect>, viewport_height: f32) -> Progress {
        match &mut self.tracker {
            Some(tracker) => tracker.on_layout(host, viewport_height),
            None => Progress::ZERO,
        }
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        self.scene.resize(viewport)
    }

    pub fn on_pointer(&mut self, ndc: Vec2) {
        self.scene.pointer_moved(ndc);
    }

    /// Run one display frame. Returns false once the animator is no longer
    /// running so the caller can stop scheduling frames.
    pub fn frame(&mut self, clock: FrameClock) -> bool {
        if self.lifecycle != Lifecycle::Running {
            return false;
        }
        let progress = self.progress();
        if let Err(e) = self.scene.update(progress, clock) {
            log::error!("[animator] update failed: {e}");
            return true;
        }
        self.frames += 1;

        if let Some(backend) = &mut self.backend {
            let camera = self.scene.camera().clone();
            if let Err(e) = backend.draw(self.scene.graph_mut(), &camera) {
                log::error!("[animator] draw failed: {e}");
            }
        }
        true
    }

    pub fn progress(&self) -> Progress {
        self.tracker
            .as_ref()
            .map(ScrollTracker::progress)
            .unwrap_or(Progress::ZERO)
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

impl<S, B: RenderBackend> Drop for SceneAnimator<S, B> {
    fn drop(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
    }
}
