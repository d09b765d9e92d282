//! Progress → phase mapping for the two scroll-driven scenes.

use crate::constants::*;

const GATE_EPSILON: f32 = 1e-5;

/// Cubic smoothstep `x²(3 − 2x)` with `x` clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CatapultPhase {
    Wound,
    Launching { local: f32 },
    FollowThrough { local: f32 },
}

impl CatapultPhase {
    pub fn from_progress(progress: f32) -> Self {
        if progress < CATAPULT_WOUND_END {
            CatapultPhase::Wound
        } else if progress < CATAPULT_LAUNCH_END {
            CatapultPhase::Launching {
                local: (progress - CATAPULT_WOUND_END) / (CATAPULT_LAUNCH_END - CATAPULT_WOUND_END),
            }
        } else {
            CatapultPhase::FollowThrough {
                local: (progress - CATAPULT_LAUNCH_END) / (1.0 - CATAPULT_LAUNCH_END),
            }
        }
    }

    /// Arm rotation about +Z in radians.
    pub fn arm_rotation(self) -> f32 {
        match self {
            CatapultPhase::Wound => ARM_BASE_ROTATION - ARM_WIND_ANGLE,
            CatapultPhase::Launching { local } => {
                ARM_BASE_ROTATION - ARM_WIND_ANGLE + local * ARM_SWING_ANGLE
            }
            CatapultPhase::FollowThrough { local } => {
                ARM_BASE_ROTATION + ARM_WIND_ANGLE - local * ARM_SETTLE_ANGLE
            }
        }
    }

    /// Whether the one-shot launch may fire at this progress.
    ///
    /// The local gate includes the swing midpoint itself; `(0.35 - 0.1) / 0.5`
    /// lands just below 0.5 in floating point.
    pub fn launch_window_open(self, progress: f32) -> bool {
        matches!(self, CatapultPhase::Launching { local }
            if local >= CATAPULT_LAUNCH_LOCAL_GATE - GATE_EPSILON
                && progress > CATAPULT_LAUNCH_MIN_PROGRESS)
    }

    pub fn name(self) -> &'static str {
        match self {
            CatapultPhase::Wound => "wound",
            CatapultPhase::Launching { .. } => "launching",
            CatapultPhase::FollowThrough { .. } => "follow-through",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpiralPhase {
    Spiral,
    Unwind { local: f32, ease: f32 },
    Settle { local: f32, ease: f32 },
}

impl SpiralPhase {
    pub fn from_progress(progress: f32) -> Self {
        if progress < SPIRAL_UNWIND_START {
            SpiralPhase::Spiral
        } else if progress < SPIRAL_SETTLE_START {
            let local = (progress - SPIRAL_UNWIND_START) / (SPIRAL_SETTLE_START - SPIRAL_UNWIND_START);
            SpiralPhase::Unwind {
                local,
                ease: smoothstep(local),
            }
        } else {
            // The settle window reuses the unwind width, so it saturates at
            // progress 1.0 exactly.
            let local = ((progress - SPIRAL_SETTLE_START)
                / (SPIRAL_SETTLE_START - SPIRAL_UNWIND_START))
                .min(1.0);
            SpiralPhase::Settle {
                local,
                ease: smoothstep(local),
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpiralPhase::Spiral => "spiral",
            SpiralPhase::Unwind { .. } => "unwind",
            SpiralPhase::Settle { .. } => "settle",
        }
    }
}
