// Host-side tests for the horizontal gradient lines scene.

use scene_core::geometry::LinesParams;
use scene_core::{AnimatedScene, FrameClock, LinesScene, Progress, Projection, SceneKind, Viewport};
use std::f64::consts::PI;

fn scene(w: f32, h: f32) -> LinesScene {
    LinesScene::new(&LinesParams::default(), Viewport::new(w, h)).unwrap()
}

fn right_edge(s: &LinesScene) -> f32 {
    let id = s.lines()[0].id;
    s.graph().strand(id).unwrap().buffer.points()[1].x
}

#[test]
fn resize_regenerates_lines_for_the_new_width() {
    let mut s = scene(800.0, 800.0);
    assert_eq!(s.graph().strand_count(), 24);
    assert!((right_edge(&s) - 10.0).abs() < 1e-5);
    let generation = s.graph().generation();

    s.resize(Viewport::new(1500.0, 500.0)).unwrap();
    assert_eq!(s.graph().strand_count(), 24);
    assert_eq!(s.lines().len(), 24);
    assert!(s.graph().generation() > generation);
    assert!((right_edge(&s) - 30.0).abs() < 1e-4);

    let Projection::Orthographic { left, right, top, .. } = s.camera().projection else {
        panic!("lines camera must be orthographic");
    };
    assert!((right - 30.0).abs() < 1e-4 && (left + 30.0).abs() < 1e-4);
    assert!((top - 10.0).abs() < 1e-6);
}

#[test]
fn resize_to_the_same_size_is_a_no_op() {
    let mut s = scene(1024.0, 768.0);
    s.resize(Viewport::new(1280.0, 720.0)).unwrap();
    let snapshot = s.clone();
    s.resize(Viewport::new(1280.0, 720.0)).unwrap();
    assert_eq!(s.graph(), snapshot.graph());
    assert_eq!(s.graph().generation(), snapshot.graph().generation());
    assert_eq!(s.camera(), snapshot.camera());
}

#[test]
fn lines_bob_and_pulse_on_wall_clock() {
    let mut s = scene(800.0, 600.0);
    // sin(t * 1.5) peaks at t = π / 3 seconds
    let peak = FrameClock::from_millis(PI / 3.0 * 1000.0);
    s.update(Progress::ZERO, peak).unwrap();

    let group = s.graph().node(s.group()).unwrap().local;
    assert!((group.translation.y - 0.2).abs() < 1e-4);

    let first = s.graph().strand(s.lines()[0].id).unwrap().material.opacity;
    assert_eq!(first, 1.0);
    let last_line = s.lines()[23];
    let last = s.graph().strand(last_line.id).unwrap().material.opacity;
    assert!((last - (last_line.base_opacity + 0.08)).abs() < 1e-4);
}

#[test]
fn progress_has_no_effect() {
    let mut a = scene(800.0, 600.0);
    let mut b = scene(800.0, 600.0);
    let clock = FrameClock::from_millis(1234.0);
    a.update(Progress::ZERO, clock).unwrap();
    b.update(Progress::ONE, clock).unwrap();
    assert_eq!(a.graph(), b.graph());
    assert!(a.progress_strategy().is_none());
}

#[test]
fn scene_kind_builds_and_parses() {
    for (name, kind) in [
        ("catapult", SceneKind::Catapult),
        ("spiral-morph", SceneKind::Spiral),
        (" Lines ", SceneKind::Lines),
        ("horizontal-lines", SceneKind::Lines),
    ] {
        assert_eq!(name.parse::<SceneKind>().unwrap(), kind);
    }
    assert!("trebuchet".parse::<SceneKind>().is_err());

    for kind in [SceneKind::Catapult, SceneKind::Spiral, SceneKind::Lines] {
        let built = kind.build(Viewport::new(1280.0, 720.0)).unwrap();
        assert_eq!(built.kind(), kind);
        assert_eq!(kind.to_string().parse::<SceneKind>().unwrap(), kind);
    }
}
