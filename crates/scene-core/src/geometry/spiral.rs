use crate::constants::*;
use crate::error::SceneError;
use crate::graph::{NodeId, SceneGraph, StrandId, Transform};
use crate::strand::Material;
use glam::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct SpiralParams {
    pub spirals: usize,
    pub spiral_segments: usize,
    pub bands: usize,
    pub band_segments: usize,
    pub max_radius: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            spirals: SPIRAL_COUNT,
            spiral_segments: SPIRAL_SEGMENTS,
            bands: BAND_COUNT,
            band_segments: BAND_SEGMENTS,
            max_radius: SPIRAL_MAX_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Spiral,
    Band,
}

/// Per-strand parameters of the morphing scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphStrand {
    pub id: StrandId,
    pub shape: Shape,
    /// Index within its shape family divided by the family size.
    pub fraction: f32,
    pub angle_offset: f32,
    /// Slot across all strands, spirals first.
    pub line_index: usize,
    pub base_opacity: f32,
}

impl MorphStrand {
    /// Parametric spiral/band position at `t ∈ [0, 1)`.
    pub fn rest_point(&self, t: f32, max_radius: f32) -> Vec3 {
        rest_point(self.shape, self.fraction, self.angle_offset, t, max_radius)
    }

    /// Fanned-out position spanning the whole viewport, one column per line.
    pub fn spread_point(&self, t: f32, total_lines: usize) -> Vec3 {
        let slot = self.line_index as f32 / total_lines as f32;
        Vec3::new(
            -SPREAD_HALF_WIDTH + slot * 2.0 * SPREAD_HALF_WIDTH,
            (t * 2.0 - 1.0) * SPREAD_HALF_HEIGHT,
            0.0,
        )
    }

    /// Final resting position anchored to the left edge of a view of the
    /// given aspect.
    pub fn settle_point(&self, t: f32, total_lines: usize, aspect: f32) -> Vec3 {
        let slot = self.line_index as f32 / total_lines as f32;
        let view_width = SETTLE_HALF_HEIGHT * aspect;
        Vec3::new(
            -view_width + slot * view_width * SETTLE_WIDTH_FRACTION,
            (t * 2.0 - 1.0) * SETTLE_HALF_HEIGHT,
            0.0,
        )
    }

    /// Opacity the settled line fades toward.
    pub fn settle_opacity(&self, total_lines: usize) -> f32 {
        1.0 - (self.line_index as f32 / total_lines as f32) * SETTLE_OPACITY_FALLOFF
    }
}

fn rest_point(shape: Shape, fraction: f32, angle_offset: f32, t: f32, max_radius: f32) -> Vec3 {
    match shape {
        Shape::Spiral => {
            let angle = t * SPIRAL_TURNS_ANGLE + angle_offset;
            let radius = t * max_radius * (0.3 + fraction * 0.7);
            Vec3::new(
                angle.cos() * radius,
                angle.sin() * radius,
                (t * BAND_TURNS_ANGLE).sin() * 0.5,
            )
        }
        Shape::Band => {
            let angle = t * BAND_TURNS_ANGLE + angle_offset;
            let radius = (0.4 + fraction * 0.6) * max_radius * 1.3 * (1.0 + t * 0.2);
            Vec3::new(angle.cos() * radius, angle.sin() * radius, BAND_Z)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpiralRig {
    pub group: NodeId,
    pub strands: Vec<MorphStrand>,
    pub max_radius: f32,
}

impl SpiralRig {
    #[inline]
    pub fn total_lines(&self) -> usize {
        self.strands.len()
    }
}

pub fn build_spiral(graph: &mut SceneGraph, params: &SpiralParams) -> Result<SpiralRig, SceneError> {
    let group = graph.add_node(
        graph.root(),
        Transform::from_translation(Vec3::new(SPIRAL_GROUP_X, 0.0, 0.0)),
    )?;
    let mut strands = Vec::with_capacity(params.spirals + params.bands);

    let families = [
        (Shape::Spiral, params.spirals, params.spiral_segments),
        (Shape::Band, params.bands, params.band_segments),
    ];
    for (shape, count, segments) in families {
        for i in 0..count {
            let fraction = i as f32 / count as f32;
            let angle_offset = fraction * TAU;
            let (brightness, base_opacity) = match shape {
                Shape::Spiral => (0.5 + fraction * 0.3, 0.35 - fraction * 0.12),
                Shape::Band => (0.4 + fraction * 0.4, 0.22),
            };
            let points = (0..segments)
                .map(|j| {
                    let t = j as f32 / segments as f32;
                    rest_point(shape, fraction, angle_offset, t, params.max_radius)
                })
                .collect();
            let id = graph.add_strand(
                group,
                points,
                Material::new(GREEN, base_opacity, BASE_STROKE).brightened(brightness),
            )?;
            strands.push(MorphStrand {
                id,
                shape,
                fraction,
                angle_offset,
                line_index: strands.len(),
                base_opacity,
            });
        }
    }
    log::debug!(
        "[spiral] built {} spiral and {} band strands",
        params.spirals,
        params.bands
    );

    Ok(SpiralRig {
        group,
        strands,
        max_radius: params.max_radius,
    })
}
