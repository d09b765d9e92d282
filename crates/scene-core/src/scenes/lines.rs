use super::{AnimatedScene, FrameClock, SceneKind};
use crate::camera::{Camera, Viewport};
use crate::constants::*;
use crate::error::SceneError;
use crate::geometry::{build_lines, GradientLine, LinesParams};
use crate::graph::{NodeId, SceneGraph, Transform};
use crate::scroll::{Progress, ProgressStrategy};

/// Gradient lines along the bottom of the viewport, bobbing together on
/// wall-clock time.
#[derive(Clone, Debug)]
pub struct LinesScene {
    graph: SceneGraph,
    group: NodeId,
    params: LinesParams,
    lines: Vec<GradientLine>,
    camera: Camera,
    viewport: Viewport,
}

impl LinesScene {
    pub fn new(params: &LinesParams, viewport: Viewport) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        let group = graph.add_node(graph.root(), Transform::IDENTITY)?;
        let lines = build_lines(&mut graph, group, params, viewport)?;
        Ok(Self {
            graph,
            group,
            params: params.clone(),
            lines,
            camera: Camera::orthographic(
                params.half_height * viewport.aspect(),
                params.half_height,
                LINES_CAMERA_Z,
            ),
            viewport,
        })
    }

    #[inline]
    pub fn lines(&self) -> &[GradientLine] {
        &self.lines
    }

    #[inline]
    pub fn group(&self) -> NodeId {
        self.group
    }
}

impl AnimatedScene for LinesScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Lines
    }

    fn progress_strategy(&self) -> Option<ProgressStrategy> {
        None
    }

    fn update(&mut self, _progress: Progress, clock: FrameClock) -> Result<(), SceneError> {
        let wave = (clock.seconds() as f32 * LINES_WAVE_RATE).sin();
        self.graph.node_mut(self.group)?.local.translation.y = wave * LINES_BOB_AMOUNT;
        for line in &self.lines {
            let strand = self.graph.strand_mut(line.id)?;
            strand.material.opacity =
                (line.base_opacity + wave * LINES_PULSE_AMOUNT).clamp(0.0, 1.0);
        }
        Ok(())
    }

    /// Endpoints span the full view width, so a new size regenerates every
    /// line instead of rescaling the old ones.
    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        if viewport == self.viewport {
            return Ok(());
        }
        self.viewport = viewport;
        self.camera
            .fit_orthographic_height(self.params.half_height, viewport.aspect());
        let removed = self.graph.remove_strands_of(self.group);
        self.lines = build_lines(&mut self.graph, self.group, &self.params, viewport)?;
        log::debug!(
            "[lines] regenerated {} lines (dropped {}) for {}x{}",
            self.lines.len(),
            removed,
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }
}
