// Host-side tests for the spiral morph scene.

use glam::{Vec2, Vec3};
use scene_core::constants::*;
use scene_core::geometry::{Shape, SpiralParams};
use scene_core::phase::SpiralPhase;
use scene_core::{AnimatedScene, FrameClock, Progress, Projection, SpiralScene, Viewport};

const VIEW: Viewport = Viewport::new(1600.0, 900.0);

fn scene() -> SpiralScene {
    SpiralScene::new(&SpiralParams::default(), VIEW).unwrap()
}

fn points_of(s: &SpiralScene) -> Vec<Vec<Vec3>> {
    s.rig()
        .strands
        .iter()
        .map(|m| s.graph().strand(m.id).unwrap().buffer.points().to_vec())
        .collect()
}

fn max_gap(a: &[Vec<Vec3>], b: &[Vec<Vec3>]) -> f32 {
    a.iter()
        .zip(b)
        .flat_map(|(x, y)| x.iter().zip(y).map(|(p, q)| (*p - *q).length()))
        .fold(0.0, f32::max)
}

fn at(progress: f32) -> SpiralScene {
    let mut s = scene();
    s.update(Progress::new(progress), FrameClock::default()).unwrap();
    s
}

#[test]
fn strands_are_continuous_into_unwind() {
    let before = at(SPIRAL_UNWIND_START - 1e-4);
    let after = at(SPIRAL_UNWIND_START + 1e-4);
    assert_eq!(before.phase(), SpiralPhase::Spiral);
    assert!(matches!(after.phase(), SpiralPhase::Unwind { .. }));
    assert!(max_gap(&points_of(&before), &points_of(&after)) < 1e-3);
}

#[test]
fn strands_are_continuous_into_settle() {
    let before = at(SPIRAL_SETTLE_START - 1e-4);
    let after = at(SPIRAL_SETTLE_START + 1e-4);
    assert!(matches!(before.phase(), SpiralPhase::Unwind { .. }));
    assert!(matches!(after.phase(), SpiralPhase::Settle { .. }));
    assert!(max_gap(&points_of(&before), &points_of(&after)) < 1e-2);
}

#[test]
fn full_progress_lands_on_the_settled_lines() {
    let s = at(1.0);
    let total = s.rig().total_lines();
    let aspect = VIEW.aspect();
    for m in &s.rig().strands {
        let strand = s.graph().strand(m.id).unwrap();
        let n = strand.buffer.len();
        for (j, p) in strand.buffer.points().iter().enumerate() {
            let expected = m.settle_point(j as f32 / n as f32, total, aspect);
            assert!((*p - expected).length() < 1e-3);
        }
        assert!(strand.material.opacity <= 1.0);
        assert!((strand.material.width - (SETTLE_STROKE + 1.0)).abs() < 1e-5);
    }
    let group = s.graph().node(s.rig().group).unwrap().local;
    assert_eq!(group.rotation_z, 0.0);
}

#[test]
fn unwind_brightens_and_thickens() {
    let s = at(0.5);
    let SpiralPhase::Unwind { ease, .. } = s.phase() else {
        panic!("expected unwind");
    };
    for m in &s.rig().strands {
        let mat = s.graph().strand(m.id).unwrap().material;
        assert!((mat.opacity - (m.base_opacity + 0.5 * ease)).abs() < 1e-5);
        assert!((mat.width - (2.0 + 2.0 * ease)).abs() < 1e-5);
    }
}

#[test]
fn scrolling_back_restores_the_rest_shape() {
    let fresh = scene();
    let mut s = scene();
    s.update(Progress::new(0.8), FrameClock::default()).unwrap();
    s.update(Progress::new(0.1), FrameClock::default()).unwrap();
    assert!(max_gap(&points_of(&fresh), &points_of(&s)) < 1e-5);
    for m in &s.rig().strands {
        let mat = s.graph().strand(m.id).unwrap().material;
        assert_eq!(mat.opacity, m.base_opacity);
        assert_eq!(mat.width, BASE_STROKE);
    }
}

#[test]
fn idle_spiral_spins_and_follows_the_pointer() {
    let mut s = scene();
    s.pointer_moved(Vec2::new(1.0, -1.0));
    s.update(Progress::ZERO, FrameClock::default()).unwrap();
    let group = s.graph().node(s.rig().group).unwrap().local;
    assert!((group.translation.x - (40.0 + 5.0 * 0.05)).abs() < 1e-5);
    assert!((group.translation.y - (-5.0 * 0.05)).abs() < 1e-5);
    assert!((group.rotation_z - SPIRAL_TIME_STEP * SPIRAL_SPIN_RATE).abs() < 1e-6);
    assert!((s.time() - SPIRAL_TIME_STEP).abs() < 1e-7);
}

#[test]
fn pointer_is_ignored_once_unwinding() {
    let mut s = scene();
    s.pointer_moved(Vec2::new(1.0, 1.0));
    s.update(Progress::new(0.4), FrameClock::default()).unwrap();
    let group = s.graph().node(s.rig().group).unwrap().local;
    assert_eq!(group.translation, Vec3::new(40.0, 0.0, 0.0));
}

#[test]
fn bands_sit_behind_spirals_at_rest() {
    let s = scene();
    for m in s.rig().strands.iter().filter(|m| m.shape == Shape::Band) {
        let strand = s.graph().strand(m.id).unwrap();
        assert!(strand.buffer.points().iter().all(|p| p.z == BAND_Z));
    }
}

#[test]
fn resize_updates_perspective_aspect() {
    let mut s = scene();
    s.resize(Viewport::new(800.0, 800.0)).unwrap();
    let Projection::Perspective { aspect, fovy_radians } = s.camera().projection else {
        panic!("spiral camera must be perspective");
    };
    assert!((aspect - 1.0).abs() < 1e-6);
    assert!((fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    assert_eq!(s.camera().eye, Vec3::new(40.0, 0.0, 120.0));
    assert_eq!(s.camera().target, Vec3::new(40.0, 0.0, 0.0));
}
