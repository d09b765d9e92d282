use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    /// Follows the arm's transform.
    Arm,
    /// Parented to the scene root and integrated every frame.
    FreeFlight,
    /// Past the off-screen bound; hidden until the next wind-up.
    Parked,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub launched: bool,
    pub attachment: Attachment,
}

impl Default for ProjectileState {
    fn default() -> Self {
        Self {
            position: Vec2::from_array(PROJECTILE_REST_OFFSET),
            velocity: Vec2::ZERO,
            launched: false,
            attachment: Attachment::Arm,
        }
    }
}

impl ProjectileState {
    #[inline]
    pub fn in_free_flight(&self) -> bool {
        self.launched && self.attachment == Attachment::FreeFlight
    }

    pub fn launch(&mut self, world_position: Vec2) {
        self.position = world_position;
        self.velocity = launch_velocity(LAUNCH_SPEED, LAUNCH_ANGLE);
        self.launched = true;
        self.attachment = Attachment::FreeFlight;
    }

    /// One fixed-step Euler update. Returns false once the projectile has
    /// left the visible area and been parked.
    pub fn step(&mut self) -> bool {
        if !self.in_free_flight() {
            return false;
        }
        self.velocity.y -= GRAVITY_PER_FRAME;
        self.position += self.velocity * FRAME_DT;
        if is_offscreen(self.position) {
            self.attachment = Attachment::Parked;
            return false;
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[inline]
pub fn launch_velocity(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

#[inline]
pub fn is_offscreen(p: Vec2) -> bool {
    p.y < OFFSCREEN_MIN_Y || p.x > OFFSCREEN_MAX_X
}

/// Position after `frames` fixed steps of [`ProjectileState::step`], ignoring
/// the off-screen cutoff.
pub fn closed_form_position(p0: Vec2, v0: Vec2, frames: u32) -> Vec2 {
    let n = frames as f32;
    let fall = GRAVITY_PER_FRAME * n * (n + 1.0) * 0.5;
    Vec2::new(
        p0.x + FRAME_DT * v0.x * n,
        p0.y + FRAME_DT * (v0.y * n - fall),
    )
}
