// Host-side tests for constants and their relationships.

use scene_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn phase_thresholds_are_ordered() {
    assert!(0.0 < CATAPULT_WOUND_END);
    assert!(CATAPULT_WOUND_END < CATAPULT_LAUNCH_MIN_PROGRESS);
    assert!(CATAPULT_LAUNCH_MIN_PROGRESS < CATAPULT_LAUNCH_END);
    assert!(CATAPULT_LAUNCH_END < 1.0);

    assert!(0.0 < SPIRAL_UNWIND_START);
    assert!(SPIRAL_UNWIND_START < SPIRAL_SETTLE_START);
    assert!(SPIRAL_SETTLE_START < 1.0);
}

#[test]
fn arm_swing_returns_through_rest() {
    // winding back by the wind angle and swinging halfway lands on the base tilt
    assert!((ARM_SWING_ANGLE - 2.0 * ARM_WIND_ANGLE).abs() < 1e-6);
    assert!(ARM_SETTLE_ANGLE < ARM_WIND_ANGLE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn projectile_rest_is_inside_the_view() {
    let [x, y] = PROJECTILE_REST_OFFSET;
    assert!(x < OFFSCREEN_MAX_X);
    assert!(y > OFFSCREEN_MIN_Y);
    assert!(y.abs() < CATAPULT_VIEW_HALF_HEIGHT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn line_stack_fits_in_the_lower_half() {
    let top = -LINES_VIEW_HALF_HEIGHT + (LINE_COUNT - 1) as f32 * LINE_SPACING;
    assert!(top < 0.0);
    assert!(LINE_FADE < 1.0);
}

#[test]
fn palette_channels_are_normalized() {
    for c in [GREEN, BLUE_MID, BLUE_LIGHT] {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }
    assert!((GREEN[0] - 107.0 / 255.0).abs() < 1e-6);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_planes_enclose_every_scene() {
    assert!(Z_NEAR > 0.0 && Z_NEAR < Z_FAR);
    assert!(SPIRAL_CAMERA_EYE[2] < Z_FAR);
    assert!(CATAPULT_CAMERA_Z > Z_NEAR && LINES_CAMERA_Z > Z_NEAR);
}
