use super::{AnimatedScene, FrameClock, SceneKind};
use crate::camera::{Camera, Viewport};
use crate::constants::*;
use crate::error::SceneError;
use crate::geometry::{build_catapult, CatapultParams, CatapultRig};
use crate::graph::{SceneGraph, Transform};
use crate::kinematics::{Attachment, ProjectileState};
use crate::phase::CatapultPhase;
use crate::scroll::{Progress, ProgressStrategy};
use glam::Vec3;
use std::mem::discriminant;

/// Catapult arm that winds, swings and throws its projectile as the strip
/// scrolls past. Scrolling back into the wound range puts the projectile
/// back in the basket.
#[derive(Clone, Debug)]
pub struct CatapultScene {
    graph: SceneGraph,
    rig: CatapultRig,
    camera: Camera,
    projectile: ProjectileState,
    phase: CatapultPhase,
}

impl CatapultScene {
    pub fn new(params: &CatapultParams) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        let rig = build_catapult(&mut graph, params)?;
        Ok(Self {
            graph,
            rig,
            camera: Camera::orthographic(25.0, CATAPULT_VIEW_HALF_HEIGHT, CATAPULT_CAMERA_Z),
            projectile: ProjectileState::default(),
            phase: CatapultPhase::Wound,
        })
    }

    #[inline]
    pub fn rig(&self) -> CatapultRig {
        self.rig
    }

    #[inline]
    pub fn projectile(&self) -> &ProjectileState {
        &self.projectile
    }

    #[inline]
    pub fn phase(&self) -> CatapultPhase {
        self.phase
    }

    fn rest_transform() -> Transform {
        Transform::from_translation(Vec3::new(
            PROJECTILE_REST_OFFSET[0],
            PROJECTILE_REST_OFFSET[1],
            0.0,
        ))
    }

    fn reattach_projectile(&mut self) -> Result<(), SceneError> {
        if self.projectile.attachment != Attachment::Arm {
            self.graph.attach(self.rig.projectile, self.rig.arm)?;
            let node = self.graph.node_mut(self.rig.projectile)?;
            node.local = Self::rest_transform();
            node.visible = true;
            log::debug!("[catapult] projectile back in the basket");
        }
        self.projectile.reset();
        Ok(())
    }

    fn launch_projectile(&mut self) -> Result<(), SceneError> {
        let root = self.graph.root();
        self.graph
            .reparent_preserving_world(self.rig.projectile, root)?;
        let world = self.graph.node(self.rig.projectile)?.local.translation;
        self.projectile.launch(world.truncate());
        log::debug!(
            "[catapult] launch from ({:.2},{:.2}) v=({:.2},{:.2})",
            world.x,
            world.y,
            self.projectile.velocity.x,
            self.projectile.velocity.y
        );
        Ok(())
    }

    fn fly(&mut self, clock: FrameClock) -> Result<(), SceneError> {
        let still_visible = self.projectile.step();
        let pulse = 1.0
            + (clock.wall_ms * PROJECTILE_PULSE_RATE).sin() as f32 * PROJECTILE_PULSE_AMOUNT;
        let node = self.graph.node_mut(self.rig.projectile)?;
        node.local.translation = self.projectile.position.extend(node.local.translation.z);
        node.local.rotation_z += PROJECTILE_SPIN_PER_FRAME;
        node.local.scale = Vec3::new(pulse, pulse, 1.0);
        if !still_visible {
            node.visible = false;
            log::debug!(
                "[catapult] projectile parked at ({:.1},{:.1})",
                self.projectile.position.x,
                self.projectile.position.y
            );
        }
        Ok(())
    }
}

impl AnimatedScene for CatapultScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Catapult
    }

    fn progress_strategy(&self) -> Option<ProgressStrategy> {
        Some(ProgressStrategy::EnterToExit)
    }

    fn update(&mut self, progress: Progress, clock: FrameClock) -> Result<(), SceneError> {
        let p = progress.get();
        let phase = CatapultPhase::from_progress(p);
        if discriminant(&phase) != discriminant(&self.phase) {
            log::debug!("[catapult] {} -> {} at {:.3}", self.phase.name(), phase.name(), p);
        }
        self.phase = phase;

        self.graph.node_mut(self.rig.arm)?.local.rotation_z = phase.arm_rotation();

        match phase {
            CatapultPhase::Wound => self.reattach_projectile()?,
            CatapultPhase::Launching { .. } => {
                if phase.launch_window_open(p) && !self.projectile.launched {
                    self.launch_projectile()?;
                }
            }
            CatapultPhase::FollowThrough { .. } => {}
        }

        if self.projectile.in_free_flight() {
            self.fly(clock)?;
        }
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        let viewport = Viewport::new(
            viewport.width,
            if viewport.height > 0.0 {
                viewport.height
            } else {
                CATAPULT_FALLBACK_HEIGHT
            },
        );
        self.camera
            .fit_orthographic_height(CATAPULT_VIEW_HALF_HEIGHT, viewport.aspect());
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
