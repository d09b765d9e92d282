use std::f32::consts::PI;

// Shared tuning constants for the three line-art scenes.

// Palette
pub const GREEN: [f32; 3] = [0x6b as f32 / 255.0, 0xe5 as f32 / 255.0, 0xbe as f32 / 255.0];
pub const BLUE_MID: [f32; 3] = [0x4a as f32 / 255.0, 0x6f as f32 / 255.0, 0xa5 as f32 / 255.0];
pub const BLUE_LIGHT: [f32; 3] = [0x5a as f32 / 255.0, 0x7f as f32 / 255.0, 0xb5 as f32 / 255.0];

// Fixed-step animation assumptions
pub const FRAME_DT: f32 = 0.016; // seconds per frame at the 60fps design target

// ---------------- Catapult ----------------
pub const CATAPULT_WOUND_END: f32 = 0.1;
pub const CATAPULT_LAUNCH_END: f32 = 0.6;
pub const CATAPULT_LAUNCH_MIN_PROGRESS: f32 = 0.3; // global gate for the one-shot launch
pub const CATAPULT_LAUNCH_LOCAL_GATE: f32 = 0.5; // local gate inside the launch window

pub const ARM_BASE_ROTATION: f32 = 0.05; // slight resting tilt (radians)
pub const ARM_WIND_ANGLE: f32 = PI * 0.35;
pub const ARM_SWING_ANGLE: f32 = PI * 0.7; // wound -> overshoot
pub const ARM_SETTLE_ANGLE: f32 = PI * 0.15; // overshoot easing back during follow-through

pub const LAUNCH_SPEED: f32 = 18.0;
pub const LAUNCH_ANGLE: f32 = PI / 4.0;
pub const GRAVITY_PER_FRAME: f32 = 0.25; // velocity units removed each frame
pub const PROJECTILE_SPIN_PER_FRAME: f32 = 0.12;
pub const PROJECTILE_PULSE_RATE: f64 = 0.012; // per wall-clock millisecond
pub const PROJECTILE_PULSE_AMOUNT: f32 = 0.12;
pub const PROJECTILE_REST_OFFSET: [f32; 2] = [18.0, -7.2];
pub const OFFSCREEN_MIN_Y: f32 = -20.0;
pub const OFFSCREEN_MAX_X: f32 = 30.0;

pub const CATAPULT_VIEW_HALF_HEIGHT: f32 = 15.0;
pub const CATAPULT_CAMERA_Z: f32 = 10.0;
pub const CATAPULT_FALLBACK_HEIGHT: f32 = 800.0; // section height when the host reports zero

// ---------------- Spiral morph ----------------
pub const SPIRAL_UNWIND_START: f32 = 0.3;
pub const SPIRAL_SETTLE_START: f32 = 0.65;

pub const SPIRAL_COUNT: usize = 12;
pub const SPIRAL_SEGMENTS: usize = 200;
pub const BAND_COUNT: usize = 8;
pub const BAND_SEGMENTS: usize = 150;
pub const SPIRAL_MAX_RADIUS: f32 = 90.0;
pub const SPIRAL_TURNS_ANGLE: f32 = PI * 6.0;
pub const BAND_TURNS_ANGLE: f32 = PI * 4.0;
pub const BAND_Z: f32 = -5.0;

pub const SPIRAL_GROUP_X: f32 = 40.0;
pub const SPIRAL_CAMERA_EYE: [f32; 3] = [40.0, 0.0, 120.0];
pub const SPIRAL_CAMERA_FOV_DEG: f32 = 75.0;
pub const SPIRAL_TIME_STEP: f32 = 0.005; // animation time advanced per frame
pub const SPIRAL_SPIN_RATE: f32 = 0.6;
pub const SPIRAL_BREATHE_RATE: f32 = 0.8;
pub const SPIRAL_BREATHE_AMOUNT: f32 = 0.03;
pub const POINTER_FOLLOW_RANGE: f32 = 5.0;
pub const POINTER_FOLLOW_ALPHA: f32 = 0.05; // new = old + α*(target-old)

pub const SPREAD_HALF_WIDTH: f32 = 120.0;
pub const SPREAD_HALF_HEIGHT: f32 = 100.0;
pub const SETTLE_HALF_HEIGHT: f32 = 10.0;
pub const SETTLE_WIDTH_FRACTION: f32 = 0.6;

pub const BASE_STROKE: f32 = 2.0;
pub const UNWIND_OPACITY_GAIN: f32 = 0.5;
pub const UNWIND_STROKE_GAIN: f32 = 2.0;
pub const SETTLE_STROKE: f32 = 4.0;
pub const SETTLE_OPACITY_FALLOFF: f32 = 0.6;
pub const GLOW_RATE: f32 = 2.5;
pub const GLOW_PHASE_PER_LINE: f32 = 0.3;
pub const GLOW_AMOUNT: f32 = 0.15;

// ---------------- Horizontal lines ----------------
pub const LINE_COUNT: usize = 24;
pub const LINE_SPACING: f32 = 0.33;
pub const LINE_STROKE: f32 = 5.0;
pub const LINE_FADE: f32 = 0.95; // opacity lost from bottom line to top line
pub const LINES_VIEW_HALF_HEIGHT: f32 = 10.0;
pub const LINES_CAMERA_Z: f32 = 10.0;
pub const LINES_WAVE_RATE: f32 = 1.5;
pub const LINES_BOB_AMOUNT: f32 = 0.2;
pub const LINES_PULSE_AMOUNT: f32 = 0.08;

// Camera clip planes shared by all scenes
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;
