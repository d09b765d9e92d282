use crate::camera::Viewport;
use crate::constants::*;
use crate::error::SceneError;
use crate::graph::{NodeId, SceneGraph, StrandId};
use crate::strand::Material;
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct LinesParams {
    pub count: usize,
    pub spacing: f32,
    pub half_height: f32,
}

impl Default for LinesParams {
    fn default() -> Self {
        Self {
            count: LINE_COUNT,
            spacing: LINE_SPACING,
            half_height: LINES_VIEW_HALF_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientLine {
    pub id: StrandId,
    pub base_opacity: f32,
}

/// Add one full-width line per slot under `group`, stacked up from the
/// bottom edge and fading toward the top.
///
/// Endpoints span the whole view width for `viewport`, so a size change
/// needs a fresh set rather than a rescale.
pub fn build_lines(
    graph: &mut SceneGraph,
    group: NodeId,
    params: &LinesParams,
    viewport: Viewport,
) -> Result<Vec<GradientLine>, SceneError> {
    let half_width = params.half_height * viewport.aspect();
    (0..params.count)
        .map(|i| {
            let y = -params.half_height + i as f32 * params.spacing;
            let base_opacity = 1.0 - (i as f32 / params.count as f32) * LINE_FADE;
            let id = graph.add_strand(
                group,
                vec![Vec3::new(-half_width, y, 0.0), Vec3::new(half_width, y, 0.0)],
                Material::new(GREEN, base_opacity, LINE_STROKE),
            )?;
            Ok(GradientLine { id, base_opacity })
        })
        .collect()
}
