// Host-side tests for progress → phase mapping.

use scene_core::constants::*;
use scene_core::phase::{smoothstep, CatapultPhase, SpiralPhase};
use std::f32::consts::PI;

const EPS: f32 = 1e-4;

#[test]
fn smoothstep_endpoints_and_midpoint() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(smoothstep(-2.0), 0.0);
    assert_eq!(smoothstep(4.0), 1.0);
}

#[test]
fn catapult_concrete_progress_points() {
    let wound = CatapultPhase::from_progress(0.05);
    assert_eq!(wound, CatapultPhase::Wound);
    assert!((wound.arm_rotation() - (0.05 - 0.35 * PI)).abs() < 1e-6);

    let mid = CatapultPhase::from_progress(0.35);
    match mid {
        CatapultPhase::Launching { local } => assert!((local - 0.5).abs() < 1e-5),
        other => panic!("expected launching, got {other:?}"),
    }
    assert!(mid.launch_window_open(0.35));
    // arm passes back through its resting tilt at the midpoint
    assert!((mid.arm_rotation() - ARM_BASE_ROTATION).abs() < 1e-4);

    assert!(matches!(
        CatapultPhase::from_progress(0.9),
        CatapultPhase::FollowThrough { .. }
    ));
}

#[test]
fn launch_window_stays_closed_early_in_the_swing() {
    for p in [0.1, 0.2, 0.3, 0.34] {
        assert!(!CatapultPhase::from_progress(p).launch_window_open(p), "open at {p}");
    }
    for p in [0.36, 0.45, 0.59] {
        assert!(CatapultPhase::from_progress(p).launch_window_open(p), "closed at {p}");
    }
    let follow = CatapultPhase::from_progress(0.7);
    assert!(!follow.launch_window_open(0.7));
}

#[test]
fn arm_rotation_is_continuous_at_thresholds() {
    for t in [CATAPULT_WOUND_END, CATAPULT_LAUNCH_END, 0.3] {
        let before = CatapultPhase::from_progress(t - 1e-5).arm_rotation();
        let after = CatapultPhase::from_progress(t + 1e-5).arm_rotation();
        assert!((before - after).abs() < 1e-3, "jump at {t}: {before} vs {after}");
    }
}

#[test]
fn arm_rotation_range() {
    let top = CatapultPhase::from_progress(CATAPULT_LAUNCH_END).arm_rotation();
    assert!((top - (ARM_BASE_ROTATION + ARM_WIND_ANGLE)).abs() < EPS);
    let end = CatapultPhase::from_progress(1.0).arm_rotation();
    assert!((end - (ARM_BASE_ROTATION + ARM_WIND_ANGLE - ARM_SETTLE_ANGLE)).abs() < EPS);
}

#[test]
fn spiral_phase_boundaries() {
    assert_eq!(SpiralPhase::from_progress(0.0), SpiralPhase::Spiral);
    assert_eq!(SpiralPhase::from_progress(0.2999), SpiralPhase::Spiral);
    match SpiralPhase::from_progress(SPIRAL_UNWIND_START) {
        SpiralPhase::Unwind { local, ease } => {
            assert!(local.abs() < EPS);
            assert!(ease.abs() < EPS);
        }
        other => panic!("expected unwind, got {other:?}"),
    }
    match SpiralPhase::from_progress(SPIRAL_SETTLE_START) {
        SpiralPhase::Settle { local, .. } => assert!(local.abs() < EPS),
        other => panic!("expected settle, got {other:?}"),
    }
}

#[test]
fn spiral_ease_is_continuous_into_settle() {
    let before = SpiralPhase::from_progress(SPIRAL_SETTLE_START - 1e-5);
    let SpiralPhase::Unwind { ease, .. } = before else {
        panic!("expected unwind, got {before:?}");
    };
    assert!((ease - 1.0).abs() < 1e-3);
}

#[test]
fn settle_saturates_at_full_progress() {
    match SpiralPhase::from_progress(1.0) {
        SpiralPhase::Settle { local, ease } => {
            assert!((local - 1.0).abs() < EPS);
            assert!((ease - 1.0).abs() < EPS);
        }
        other => panic!("expected settle, got {other:?}"),
    }
}
