use super::{AnimatedScene, FrameClock, SceneKind};
use crate::camera::{Camera, Viewport};
use crate::constants::*;
use crate::error::SceneError;
use crate::geometry::{build_spiral, SpiralParams, SpiralRig};
use crate::graph::SceneGraph;
use crate::phase::{lerp, SpiralPhase};
use crate::scroll::{Progress, ProgressStrategy};
use glam::{Vec2, Vec3};
use std::mem::discriminant;

/// Rotating spirals that unwind into full-width strands and then settle into
/// fixed lines along the left edge.
#[derive(Clone, Debug)]
pub struct SpiralScene {
    graph: SceneGraph,
    rig: SpiralRig,
    camera: Camera,
    aspect: f32,
    time: f32,
    pointer: Vec2,
    phase: SpiralPhase,
    at_rest: bool,
}

impl SpiralScene {
    pub fn new(params: &SpiralParams, viewport: Viewport) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        let rig = build_spiral(&mut graph, params)?;
        let aspect = viewport.aspect();
        let eye = Vec3::from_array(SPIRAL_CAMERA_EYE);
        Ok(Self {
            graph,
            rig,
            camera: Camera::perspective(
                SPIRAL_CAMERA_FOV_DEG,
                aspect,
                eye,
                Vec3::new(eye.x, eye.y, 0.0),
            ),
            aspect,
            time: 0.0,
            pointer: Vec2::ZERO,
            phase: SpiralPhase::Spiral,
            at_rest: true,
        })
    }

    #[inline]
    pub fn rig(&self) -> &SpiralRig {
        &self.rig
    }

    #[inline]
    pub fn phase(&self) -> SpiralPhase {
        self.phase
    }

    /// Animation time; advances a fixed step per frame.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    fn update_group(&mut self, phase: SpiralPhase) -> Result<(), SceneError> {
        let time = self.time;
        let pointer = self.pointer;
        let group = &mut self.graph.node_mut(self.rig.group)?.local;
        match phase {
            SpiralPhase::Spiral => {
                group.rotation_z = time * SPIRAL_SPIN_RATE;
                let s = 1.0 + (time * SPIRAL_BREATHE_RATE).sin() * SPIRAL_BREATHE_AMOUNT;
                group.scale = Vec3::new(s, s, 1.0);
                let target = Vec2::new(
                    SPIRAL_GROUP_X + pointer.x * POINTER_FOLLOW_RANGE,
                    pointer.y * POINTER_FOLLOW_RANGE,
                );
                let cur = group.translation.truncate();
                let next = cur + (target - cur) * POINTER_FOLLOW_ALPHA;
                group.translation = next.extend(group.translation.z);
            }
            SpiralPhase::Unwind { local, .. } => {
                let speed = SPIRAL_SPIN_RATE * (1.0 - local * local);
                group.rotation_z = time * speed;
            }
            SpiralPhase::Settle { .. } => {
                group.rotation_z = 0.0;
            }
        }
        Ok(())
    }

    fn update_strands(&mut self, phase: SpiralPhase) -> Result<(), SceneError> {
        if phase == SpiralPhase::Spiral && self.at_rest {
            return Ok(());
        }
        let total = self.rig.total_lines();
        let max_radius = self.rig.max_radius;
        for morph in &self.rig.strands {
            let strand = self.graph.strand_mut(morph.id)?;
            let len = strand.buffer.len();
            for j in 0..len {
                let t = j as f32 / len as f32;
                let p = match phase {
                    SpiralPhase::Spiral => morph.rest_point(t, max_radius),
                    SpiralPhase::Unwind { ease, .. } => morph
                        .rest_point(t, max_radius)
                        .lerp(morph.spread_point(t, total), ease),
                    SpiralPhase::Settle { ease, .. } => morph
                        .spread_point(t, total)
                        .lerp(morph.settle_point(t, total, self.aspect), ease),
                };
                strand.buffer.set_point(j, p)?;
            }

            let unwound_opacity = morph.base_opacity + UNWIND_OPACITY_GAIN;
            let material = &mut strand.material;
            match phase {
                SpiralPhase::Spiral => {
                    material.opacity = morph.base_opacity;
                    material.width = BASE_STROKE;
                }
                SpiralPhase::Unwind { ease, .. } => {
                    material.opacity = morph.base_opacity + ease * UNWIND_OPACITY_GAIN;
                    material.width = BASE_STROKE + ease * UNWIND_STROKE_GAIN;
                }
                SpiralPhase::Settle { ease, .. } => {
                    let glow = (self.time * GLOW_RATE + morph.line_index as f32 * GLOW_PHASE_PER_LINE)
                        .sin()
                        * GLOW_AMOUNT;
                    let settled = lerp(unwound_opacity, morph.settle_opacity(total), ease);
                    material.opacity = (settled + glow * ease).min(1.0);
                    material.width = SETTLE_STROKE + ease;
                }
            }
        }
        self.at_rest = phase == SpiralPhase::Spiral;
        Ok(())
    }
}

impl AnimatedScene for SpiralScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Spiral
    }

    fn progress_strategy(&self) -> Option<ProgressStrategy> {
        Some(ProgressStrategy::PinnedScrub)
    }

    fn update(&mut self, progress: Progress, _clock: FrameClock) -> Result<(), SceneError> {
        self.time += SPIRAL_TIME_STEP;
        let phase = SpiralPhase::from_progress(progress.get());
        if discriminant(&phase) != discriminant(&self.phase) {
            log::debug!(
                "[spiral] {} -> {} at {:.3}",
                self.phase.name(),
                phase.name(),
                progress.get()
            );
        }
        self.phase = phase;
        self.update_group(phase)?;
        self.update_strands(phase)
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        self.aspect = viewport.aspect();
        self.camera.set_aspect(self.aspect);
        Ok(())
    }

    fn pointer_moved(&mut self, ndc: Vec2) {
        self.pointer = ndc;
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
