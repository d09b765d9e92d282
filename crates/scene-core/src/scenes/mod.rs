//! The animated scenes and the interface the animator drives them through.

mod catapult;
mod lines;
mod spiral;

pub use catapult::CatapultScene;
pub use lines::LinesScene;
pub use spiral::SpiralScene;

use crate::camera::{Camera, Viewport};
use crate::error::SceneError;
use crate::graph::SceneGraph;
use crate::scroll::{Progress, ProgressStrategy};
use glam::Vec2;
use std::fmt;
use std::str::FromStr;

/// Wall-clock reading for the current frame.
///
/// Scroll-driven motion never reads this; only the time-based pulses do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    pub wall_ms: f64,
}

impl FrameClock {
    pub fn from_millis(wall_ms: f64) -> Self {
        Self { wall_ms }
    }

    #[inline]
    pub fn seconds(&self) -> f64 {
        self.wall_ms * 0.001
    }
}

pub trait AnimatedScene {
    fn kind(&self) -> SceneKind;

    /// How scroll position maps to progress, or `None` for scenes that
    /// ignore scrolling.
    fn progress_strategy(&self) -> Option<ProgressStrategy>;

    /// Advance one frame.
    fn update(&mut self, progress: Progress, clock: FrameClock) -> Result<(), SceneError>;

    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError>;

    /// Pointer position in normalized device coordinates (`[-1, 1]`, +Y up).
    fn pointer_moved(&mut self, _ndc: Vec2) {}

    fn camera(&self) -> &Camera;

    fn graph(&self) -> &SceneGraph;

    fn graph_mut(&mut self) -> &mut SceneGraph;
}

impl<T: AnimatedScene + ?Sized> AnimatedScene for Box<T> {
    fn kind(&self) -> SceneKind {
        (**self).kind()
    }

    fn progress_strategy(&self) -> Option<ProgressStrategy> {
        (**self).progress_strategy()
    }

    fn update(&mut self, progress: Progress, clock: FrameClock) -> Result<(), SceneError> {
        (**self).update(progress, clock)
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        (**self).resize(viewport)
    }

    fn pointer_moved(&mut self, ndc: Vec2) {
        (**self).pointer_moved(ndc)
    }

    fn camera(&self) -> &Camera {
        (**self).camera()
    }

    fn graph(&self) -> &SceneGraph {
        (**self).graph()
    }

    fn graph_mut(&mut self) -> &mut SceneGraph {
        (**self).graph_mut()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Catapult,
    Spiral,
    Lines,
}

impl SceneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::Catapult => "catapult",
            SceneKind::Spiral => "spiral",
            SceneKind::Lines => "lines",
        }
    }

    /// Build the scene with default parameters, sized for `viewport`.
    pub fn build(self, viewport: Viewport) -> Result<Box<dyn AnimatedScene>, SceneError> {
        let mut scene: Box<dyn AnimatedScene> = match self {
            SceneKind::Catapult => Box::new(CatapultScene::new(&Default::default())?),
            SceneKind::Spiral => Box::new(SpiralScene::new(&Default::default(), viewport)?),
            SceneKind::Lines => Box::new(LinesScene::new(&Default::default(), viewport)?),
        };
        scene.resize(viewport)?;
        Ok(scene)
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catapult" => Ok(SceneKind::Catapult),
            "spiral" | "spiral-morph" => Ok(SceneKind::Spiral),
            "lines" | "horizontal-lines" => Ok(SceneKind::Lines),
            other => Err(SceneError::UnknownSceneKind(other.to_string())),
        }
    }
}
