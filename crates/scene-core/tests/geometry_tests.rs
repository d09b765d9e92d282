// Host-side tests for the deterministic strand builders.

use glam::Vec3;
use scene_core::camera::Viewport;
use scene_core::geometry::curve::{catmull_rom, polygon, spiral};
use scene_core::geometry::{
    build_catapult, build_lines, build_spiral, CatapultParams, LinesParams, Shape, SpiralParams,
};
use scene_core::{SceneGraph, Transform};

#[test]
fn catapult_construction_is_idempotent() {
    let params = CatapultParams::default();
    let mut a = SceneGraph::new();
    let mut b = SceneGraph::new();
    let rig_a = build_catapult(&mut a, &params).unwrap();
    let rig_b = build_catapult(&mut b, &params).unwrap();
    assert_eq!(rig_a, rig_b);
    assert_eq!(a, b);
}

#[test]
fn catapult_strand_counts() {
    let mut g = SceneGraph::new();
    let rig = build_catapult(&mut g, &CatapultParams::default()).unwrap();
    // 6 layers + 10 connectors + 15 stations * 5 + 14 bays * 3 + 20 decorations * 2
    assert_eq!(g.strands_of(rig.arm).count(), 173);
    // 5 scoops + 16 ribs + 9 spirals + 10 arcs
    assert_eq!(g.strands_of(rig.basket).count(), 40);
    // 8 spirals + 10 rings + 16 spokes + 5 inner spirals
    assert_eq!(g.strands_of(rig.projectile).count(), 39);
    // 6 octagons + 12 spokes + 1 centre + 8 minis
    assert_eq!(g.strands_of(rig.counterweight).count(), 27);
    assert_eq!(g.strand_count(), 279);
}

#[test]
fn catapult_hierarchy() {
    let mut g = SceneGraph::new();
    let rig = build_catapult(&mut g, &CatapultParams::default()).unwrap();
    assert_eq!(g.node(rig.arm).unwrap().parent(), Some(g.root()));
    for child in [rig.basket, rig.projectile, rig.counterweight] {
        assert_eq!(g.node(child).unwrap().parent(), Some(rig.arm));
    }
    let arm = g.node(rig.arm).unwrap().local;
    assert!((arm.rotation_z - 0.05).abs() < 1e-6);
    let projectile = g.node(rig.projectile).unwrap().local;
    assert_eq!(projectile.translation, Vec3::new(18.0, -7.2, 0.0));
}

#[test]
fn projectile_ring_opacity_fades_outward() {
    let mut g = SceneGraph::new();
    let rig = build_catapult(&mut g, &CatapultParams::default()).unwrap();
    let rings: Vec<f32> = g
        .strands_of(rig.projectile)
        .filter(|(_, s)| s.buffer.len() == 41)
        .map(|(_, s)| s.material.opacity)
        .collect();
    assert_eq!(rings.len(), 10);
    assert!((rings[0] - 0.7).abs() < 1e-6);
    assert!((rings[9] - (0.7 - 9.0 * 0.06)).abs() < 1e-5);
}

#[test]
fn spiral_construction_matches_params() {
    let mut g = SceneGraph::new();
    let rig = build_spiral(&mut g, &SpiralParams::default()).unwrap();
    assert_eq!(rig.total_lines(), 20);
    let spirals: Vec<_> = rig.strands.iter().filter(|s| s.shape == Shape::Spiral).collect();
    assert_eq!(spirals.len(), 12);
    for (i, m) in rig.strands.iter().enumerate() {
        assert_eq!(m.line_index, i);
        let len = g.strand(m.id).unwrap().buffer.len();
        let expected = match m.shape {
            Shape::Spiral => 200,
            Shape::Band => 150,
        };
        assert_eq!(len, expected);
    }
    let group = g.node(rig.group).unwrap().local;
    assert_eq!(group.translation, Vec3::new(40.0, 0.0, 0.0));
    assert!((rig.strands[0].base_opacity - 0.35).abs() < 1e-6);
    assert!((rig.strands[12].base_opacity - 0.22).abs() < 1e-6);
}

#[test]
fn spiral_points_start_at_rest() {
    let mut g = SceneGraph::new();
    let rig = build_spiral(&mut g, &SpiralParams::default()).unwrap();
    for m in &rig.strands {
        let buffer = &g.strand(m.id).unwrap().buffer;
        let n = buffer.len();
        for (j, p) in buffer.points().iter().enumerate() {
            let expected = m.rest_point(j as f32 / n as f32, rig.max_radius);
            assert!((*p - expected).length() < 1e-5);
        }
    }
    let again = {
        let mut g2 = SceneGraph::new();
        build_spiral(&mut g2, &SpiralParams::default()).unwrap();
        g2
    };
    assert_eq!(g, again);
}

#[test]
fn lines_span_the_view_width() {
    let mut g = SceneGraph::new();
    let group = g.add_node(g.root(), Transform::IDENTITY).unwrap();
    let lines = build_lines(&mut g, group, &LinesParams::default(), Viewport::new(1600.0, 800.0))
        .unwrap();
    assert_eq!(lines.len(), 24);
    let first = g.strand(lines[0].id).unwrap();
    assert_eq!(first.buffer.points(), &[Vec3::new(-20.0, -10.0, 0.0), Vec3::new(20.0, -10.0, 0.0)]);
    assert_eq!(first.material.width, 5.0);
    assert_eq!(lines[0].base_opacity, 1.0);
    let last = g.strand(lines[23].id).unwrap();
    assert!((last.buffer.points()[0].y - (-10.0 + 23.0 * 0.33)).abs() < 1e-5);
    assert!((lines[23].base_opacity - (1.0 - 23.0 / 24.0 * 0.95)).abs() < 1e-6);
}

#[test]
fn catmull_rom_passes_through_endpoints() {
    let control = [
        Vec3::new(-15.0, 4.0, 0.0),
        Vec3::new(-4.0, 1.8, 0.0),
        Vec3::new(8.0, -2.2, 0.0),
        Vec3::new(18.0, -6.5, 0.0),
    ];
    let curve = catmull_rom(&control, 60);
    assert_eq!(curve.len(), 61);
    assert!((curve[0] - control[0]).length() < 1e-4);
    assert!((curve[60] - control[3]).length() < 1e-4);
    assert!(catmull_rom(&[], 10).is_empty());
}

#[test]
fn curve_primitives_have_expected_sizes() {
    let s = spiral(1.0, 2.0, 0.1, 0.5, 2.0, 25);
    assert_eq!(s.len(), 26);
    assert!((s[0] - Vec3::new(1.1, 2.0, 0.0)).length() < 1e-5);

    let octagon = polygon(1.5, 8);
    assert_eq!(octagon.len(), 9);
    assert!((octagon[0] - octagon[8]).length() < 1e-5);
}
