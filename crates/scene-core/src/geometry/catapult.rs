use super::curve::{arc, catmull_rom, polygon, segment, spiral};
use crate::constants::*;
use crate::error::SceneError;
use crate::graph::{NodeId, SceneGraph, Transform};
use crate::strand::Material;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Counts and segment resolutions for the catapult drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct CatapultParams {
    pub arm_layers: usize,
    pub arm_curve_segments: usize,
    pub connectors: usize,
    pub brace_stations: usize,
    pub lattice_bays: usize,
    pub decorations: usize,
    pub scoop_layers: usize,
    // ribs and basket spirals are divisions of the rim; each draws divisions + 1
    pub ribs: usize,
    pub basket_spirals: usize,
    pub edge_arcs: usize,
    pub projectile_spirals: usize,
    pub projectile_rings: usize,
    pub burst_spokes: usize,
    pub inner_spirals: usize,
    pub hub_layers: usize,
    pub hub_spokes: usize,
    pub hub_spirals: usize,
}

impl Default for CatapultParams {
    fn default() -> Self {
        Self {
            arm_layers: 6,
            arm_curve_segments: 60,
            connectors: 10,
            brace_stations: 15,
            lattice_bays: 14,
            decorations: 20,
            scoop_layers: 5,
            ribs: 15,
            basket_spirals: 8,
            edge_arcs: 10,
            projectile_spirals: 8,
            projectile_rings: 10,
            burst_spokes: 16,
            inner_spirals: 5,
            hub_layers: 6,
            hub_spokes: 12,
            hub_spirals: 8,
        }
    }
}

const THICK_GREEN: Material = Material::new(GREEN, 1.0, 3.0);
const MEDIUM_GREEN: Material = Material::new(GREEN, 0.9, 2.5);
const THIN_GREEN: Material = Material::new(GREEN, 0.75, 2.0);
const MEDIUM_BLUE: Material = Material::new(BLUE_MID, 0.7, 2.0);
const THIN_BLUE: Material = Material::new(BLUE_LIGHT, 0.6, 1.5);

// Spine of the arm, sampled by each layer with a vertical offset.
const ARM_SPINE: [[f32; 2]; 10] = [
    [-15.0, 4.0],
    [-12.0, 3.5],
    [-8.0, 2.8],
    [-4.0, 1.8],
    [0.0, 0.5],
    [4.0, -0.8],
    [8.0, -2.2],
    [12.0, -3.8],
    [16.0, -5.5],
    [18.0, -6.5],
];

const BASKET_OFFSET: Vec3 = Vec3::new(18.0, -6.5, 0.0);
const COUNTERWEIGHT_OFFSET: Vec3 = Vec3::new(-15.0, 4.0, 0.0);
const SCOOP_RADIUS: f32 = 2.5;
const SCOOP_SQUASH: f32 = 0.8;
const SCOOP_DROP: f32 = 1.0;

/// Node handles of a built catapult.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatapultRig {
    pub arm: NodeId,
    pub basket: NodeId,
    pub projectile: NodeId,
    pub counterweight: NodeId,
}

fn v(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, 0.0)
}

pub fn build_catapult(
    graph: &mut SceneGraph,
    params: &CatapultParams,
) -> Result<CatapultRig, SceneError> {
    let arm = graph.add_node(
        graph.root(),
        Transform {
            rotation_z: ARM_BASE_ROTATION,
            ..Transform::IDENTITY
        },
    )?;
    build_arm(graph, arm, params)?;

    let basket = graph.add_node(arm, Transform::from_translation(BASKET_OFFSET))?;
    build_basket(graph, basket, params)?;

    let projectile = graph.add_node(
        arm,
        Transform::from_translation(Vec3::new(
            PROJECTILE_REST_OFFSET[0],
            PROJECTILE_REST_OFFSET[1],
            0.0,
        )),
    )?;
    build_projectile(graph, projectile, params)?;

    let counterweight = graph.add_node(arm, Transform::from_translation(COUNTERWEIGHT_OFFSET))?;
    build_counterweight(graph, counterweight, params)?;

    log::debug!("[catapult] built {} strands", graph.strand_count());
    Ok(CatapultRig {
        arm,
        basket,
        projectile,
        counterweight,
    })
}

fn build_arm(graph: &mut SceneGraph, arm: NodeId, p: &CatapultParams) -> Result<(), SceneError> {
    let centre = (p.arm_layers as f32 - 1.0) * 0.5;
    for layer in 0..p.arm_layers {
        let offset = (layer as f32 - centre) * 0.3;
        let control: Vec<Vec3> = ARM_SPINE.iter().map(|[x, y]| v(*x, y + offset)).collect();
        let inner = (layer as f32 - centre).abs();
        let material = if inner < 1.0 {
            THICK_GREEN
        } else if inner < 2.0 {
            MEDIUM_GREEN
        } else {
            THIN_GREEN
        };
        graph.add_strand(arm, catmull_rom(&control, p.arm_curve_segments), material)?;
    }

    for i in 0..p.connectors {
        let x = -15.0 + i as f32 * 3.3;
        let y = 4.0 - i as f32;
        graph.add_strand(arm, segment(v(x, y - 1.5), v(x, y + 1.5)), MEDIUM_BLUE)?;
    }

    for i in 0..p.brace_stations {
        let x = -14.0 + i as f32 * 2.2;
        let y = 3.5 - i as f32 * 0.65;
        graph.add_strand(arm, segment(v(x - 0.8, y + 1.2), v(x + 0.8, y - 1.2)), THIN_BLUE)?;
        graph.add_strand(arm, segment(v(x - 0.8, y - 1.2), v(x + 0.8, y + 1.2)), THIN_BLUE)?;
        graph.add_strand(arm, spiral(x, y, 0.08, 0.35, 1.8, 25), THIN_GREEN)?;
        graph.add_strand(arm, arc(x, y + 1.2, 0.4, PI, TAU, 20), THIN_BLUE)?;
        graph.add_strand(arm, arc(x, y - 1.2, 0.4, 0.0, PI, 20), THIN_BLUE)?;
    }

    for i in 0..p.lattice_bays {
        let x1 = -14.0 + i as f32 * 2.2;
        let x2 = x1 + 2.2;
        let y1 = 3.5 - i as f32 * 0.65;
        let y2 = y1 - 0.65;
        graph.add_strand(arm, segment(v(x1, y1 + 1.2), v(x2, y2 - 1.2)), THIN_BLUE)?;
        graph.add_strand(arm, segment(v(x1, y1 - 1.2), v(x2, y2 + 1.2)), THIN_BLUE)?;
        graph.add_strand(arm, segment(v(x1, y1), v(x2, y2)), MEDIUM_BLUE)?;
    }

    for i in 0..p.decorations {
        let x = -14.0 + i as f32 * 1.6;
        let y = 3.5 - i as f32 * 0.52;
        let offset = if i % 2 == 0 { 1.3 } else { -1.3 };
        graph.add_strand(arm, segment(v(x, y), v(x, y + offset)), THIN_BLUE)?;
        graph.add_strand(arm, spiral(x, y + offset, 0.05, 0.25, 2.0, 20), THIN_GREEN)?;
    }
    Ok(())
}

/// Point on the scoop rim at fraction `t` of the half-turn.
fn scoop_rim(t: f32, radius: f32) -> Vec3 {
    let angle = PI * t + PI;
    v(
        angle.cos() * radius * SCOOP_SQUASH,
        angle.sin() * radius - SCOOP_DROP,
    )
}

fn build_basket(
    graph: &mut SceneGraph,
    basket: NodeId,
    p: &CatapultParams,
) -> Result<(), SceneError> {
    for layer in 0..p.scoop_layers {
        let size = SCOOP_RADIUS * (1.0 - layer as f32 * 0.12);
        let points = (0..=30).map(|i| scoop_rim(i as f32 / 30.0, size)).collect();
        let material = match layer {
            0 => THICK_GREEN,
            1 => MEDIUM_GREEN,
            _ => THIN_GREEN,
        };
        graph.add_strand(basket, points, material)?;
    }

    for i in 0..=p.ribs {
        let t = i as f32 / p.ribs as f32;
        let outer = scoop_rim(t, SCOOP_RADIUS);
        let inner = scoop_rim(t, 0.8);
        graph.add_strand(basket, segment(outer, inner), THIN_BLUE)?;
    }

    for i in 0..=p.basket_spirals {
        let rim = scoop_rim(i as f32 / p.basket_spirals as f32, SCOOP_RADIUS);
        graph.add_strand(basket, spiral(rim.x, rim.y, 0.08, 0.35, 2.0, 22), THIN_GREEN)?;
    }

    let arcs = p.edge_arcs.max(2);
    for i in 0..arcs {
        let t = i as f32 / (arcs - 1) as f32;
        let angle = PI * t + PI;
        let rim = scoop_rim(t, SCOOP_RADIUS);
        graph.add_strand(
            basket,
            arc(rim.x, rim.y, 0.3, angle - PI / 4.0, angle + PI / 4.0, 12),
            MEDIUM_BLUE,
        )?;
    }
    Ok(())
}

fn build_projectile(
    graph: &mut SceneGraph,
    projectile: NodeId,
    p: &CatapultParams,
) -> Result<(), SceneError> {
    for layer in 0..p.projectile_spirals {
        let turns = 4.0 + layer as f32 * 0.3;
        graph.add_strand(projectile, spiral(0.0, 0.0, 0.08, 1.0, turns, 60), THICK_GREEN)?;
    }

    for i in 0..p.projectile_rings {
        let radius = 0.6 + i as f32 * 0.15;
        let ring = Material::new(GREEN, 0.7 - i as f32 * 0.06, 2.0);
        graph.add_strand(projectile, polygon(radius, 40), ring)?;
    }

    for i in 0..p.burst_spokes {
        let angle = i as f32 / p.burst_spokes as f32 * TAU;
        graph.add_strand(
            projectile,
            segment(Vec3::ZERO, v(angle.cos() * 1.2, angle.sin() * 1.2)),
            MEDIUM_GREEN,
        )?;
    }

    for i in 0..p.inner_spirals {
        let angle = i as f32 / p.inner_spirals as f32 * TAU;
        graph.add_strand(
            projectile,
            spiral(angle.cos() * 0.4, angle.sin() * 0.4, 0.02, 0.15, 1.5, 15),
            THIN_GREEN,
        )?;
    }
    Ok(())
}

fn build_counterweight(
    graph: &mut SceneGraph,
    hub: NodeId,
    p: &CatapultParams,
) -> Result<(), SceneError> {
    for layer in 0..p.hub_layers {
        let material = match layer {
            0 => THICK_GREEN,
            1 | 2 => MEDIUM_GREEN,
            _ => THIN_BLUE,
        };
        graph.add_strand(hub, polygon(1.5 - layer as f32 * 0.2, 8), material)?;
    }

    for i in 0..p.hub_spokes {
        let angle = i as f32 / p.hub_spokes as f32 * TAU;
        graph.add_strand(
            hub,
            segment(Vec3::ZERO, v(angle.cos() * 1.5, angle.sin() * 1.5)),
            THIN_BLUE,
        )?;
    }

    graph.add_strand(hub, spiral(0.0, 0.0, 0.08, 0.6, 3.0, 40), MEDIUM_GREEN)?;

    for i in 0..p.hub_spirals {
        let angle = i as f32 / p.hub_spirals as f32 * TAU;
        graph.add_strand(
            hub,
            spiral(angle.cos() * 0.9, angle.sin() * 0.9, 0.04, 0.2, 1.5, 18),
            THIN_GREEN,
        )?;
    }
    Ok(())
}
