// Host-side tests for the transform hierarchy and strand buffers.

use glam::Vec3;
use scene_core::constants::GREEN;
use scene_core::{Material, SceneError, SceneGraph, Transform};

fn material() -> Material {
    Material::new(GREEN, 1.0, 2.0)
}

#[test]
fn world_matrix_composes_parent_first() {
    let mut g = SceneGraph::new();
    let parent = g
        .add_node(
            g.root(),
            Transform {
                translation: Vec3::new(10.0, 0.0, 0.0),
                rotation_z: std::f32::consts::FRAC_PI_2,
                scale: Vec3::ONE,
            },
        )
        .unwrap();
    let child = g
        .add_node(parent, Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)))
        .unwrap();
    let p = g.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
    assert!((p - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-5, "{p:?}");
}

#[test]
fn attach_rejects_cycles() {
    let mut g = SceneGraph::new();
    let a = g.add_node(g.root(), Transform::IDENTITY).unwrap();
    let b = g.add_node(a, Transform::IDENTITY).unwrap();
    assert_eq!(
        g.attach(a, b),
        Err(SceneError::ReparentCycle { node: a, parent: b })
    );
    assert!(g.attach(a, a).is_err());
    assert!(g.attach(g.root(), a).is_err());
    // the failed attempts left the hierarchy untouched
    assert_eq!(g.node(b).unwrap().parent(), Some(a));
    assert_eq!(g.node(a).unwrap().parent(), Some(g.root()));
}

#[test]
fn reparent_preserves_world_transform() {
    let mut g = SceneGraph::new();
    let arm = g
        .add_node(
            g.root(),
            Transform {
                translation: Vec3::new(-2.0, 1.0, 0.0),
                rotation_z: 0.8,
                scale: Vec3::ONE,
            },
        )
        .unwrap();
    let tip = g
        .add_node(
            arm,
            Transform {
                translation: Vec3::new(18.0, -7.2, 0.0),
                rotation_z: 0.3,
                scale: Vec3::ONE,
            },
        )
        .unwrap();
    let id = g.add_strand(tip, vec![Vec3::ZERO, Vec3::X], material()).unwrap();
    let before = g.world_points(id).unwrap();

    g.reparent_preserving_world(tip, g.root()).unwrap();

    assert_eq!(g.node(tip).unwrap().parent(), Some(g.root()));
    assert!(!g.node(arm).unwrap().children().contains(&tip));
    let after = g.world_points(id).unwrap();
    for (a, b) in before.iter().zip(&after) {
        assert!((*a - *b).length() < 1e-4, "{a:?} vs {b:?}");
    }
    let local = g.node(tip).unwrap().local;
    assert!((local.rotation_z - 1.1).abs() < 1e-4);
}

#[test]
fn hidden_ancestor_hides_subtree() {
    let mut g = SceneGraph::new();
    let a = g.add_node(g.root(), Transform::IDENTITY).unwrap();
    let b = g.add_node(a, Transform::IDENTITY).unwrap();
    assert!(g.is_rendered(b));
    g.node_mut(a).unwrap().visible = false;
    assert!(!g.is_rendered(b));
    g.detach(a).unwrap();
    g.node_mut(a).unwrap().visible = true;
    assert!(!g.is_rendered(b), "detached subtree must not render");
}

#[test]
fn set_point_bounds_and_dirty_flag() {
    let mut g = SceneGraph::new();
    let id = g
        .add_strand(g.root(), vec![Vec3::ZERO; 4], material())
        .unwrap();
    let strand = g.strand_mut(id).unwrap();
    strand.buffer.mark_clean();
    assert!(!strand.buffer.is_dirty());

    strand.buffer.set_point(3, Vec3::ONE).unwrap();
    assert!(strand.buffer.is_dirty());
    assert_eq!(strand.buffer.point(3), Some(Vec3::ONE));

    assert_eq!(
        strand.buffer.set_point(4, Vec3::ONE),
        Err(SceneError::PointOutOfRange { index: 4, len: 4 })
    );
    assert_eq!(strand.buffer.len(), 4);
}

#[test]
fn removing_strands_bumps_generation() {
    let mut g = SceneGraph::new();
    let a = g.add_node(g.root(), Transform::IDENTITY).unwrap();
    let b = g.add_node(g.root(), Transform::IDENTITY).unwrap();
    g.add_strand(a, vec![Vec3::ZERO, Vec3::X], material()).unwrap();
    g.add_strand(b, vec![Vec3::ZERO, Vec3::Y], material()).unwrap();
    assert_eq!(g.generation(), 0);

    assert_eq!(g.remove_strands_of(a), 1);
    assert_eq!(g.generation(), 1);
    assert_eq!(g.strand_count(), 1);
    assert_eq!(g.strands_of(b).count(), 1);

    assert_eq!(g.remove_strands_of(a), 0);
    assert_eq!(g.generation(), 1);
}

#[test]
fn unknown_ids_are_errors() {
    let mut g = SceneGraph::new();
    let other = {
        let mut big = SceneGraph::new();
        big.add_node(big.root(), Transform::IDENTITY).unwrap();
        big.add_node(big.root(), Transform::IDENTITY).unwrap()
    };
    assert_eq!(g.node(other).err(), Some(SceneError::UnknownNode(other)));
    assert!(g.add_node(other, Transform::IDENTITY).is_err());
    assert!(g.add_strand(other, vec![], material()).is_err());
}

#[test]
fn brightened_scales_rgb_only() {
    let m = Material::new([0.5, 0.25, 1.0], 0.4, 3.0).brightened(0.5);
    assert_eq!(m.color, [0.25, 0.125, 0.5]);
    assert_eq!(m.opacity, 0.4);
    assert_eq!(m.width, 3.0);
    assert_eq!(Material::new(GREEN, 1.7, 1.0).rgba()[3], 1.0);
}
