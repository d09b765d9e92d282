//! Camera descriptors shared with the web renderer.
//!
//! These types avoid platform APIs; the renderer only asks for the combined
//! view-projection matrix.

use crate::constants::{Z_FAR, Z_NEAR};
use glam::{Mat4, Vec3};

/// Host surface size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height; degenerate sizes fall back to square.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    },
    Perspective {
        fovy_radians: f32,
        aspect: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Orthographic camera looking down -Z from `(0, 0, z)`.
    pub fn orthographic(half_width: f32, half_height: f32, z: f32) -> Self {
        Self {
            projection: Projection::Orthographic {
                left: -half_width,
                right: half_width,
                top: half_height,
                bottom: -half_height,
            },
            eye: Vec3::new(0.0, 0.0, z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }

    pub fn perspective(fovy_degrees: f32, aspect: f32, eye: Vec3, target: Vec3) -> Self {
        Self {
            projection: Projection::Perspective {
                fovy_radians: fovy_degrees.to_radians(),
                aspect,
            },
            eye,
            target,
            up: Vec3::Y,
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }

    /// Keep the vertical extent fixed and widen the horizontal bounds to the
    /// viewport aspect.
    pub fn fit_orthographic_height(&mut self, half_height: f32, aspect: f32) {
        let half_width = half_height * aspect;
        self.projection = Projection::Orthographic {
            left: -half_width,
            right: half_width,
            top: half_height,
            bottom: -half_height,
        };
    }

    pub fn set_aspect(&mut self, new_aspect: f32) {
        if let Projection::Perspective { aspect, .. } = &mut self.projection {
            *aspect = new_aspect;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
            } => Mat4::orthographic_rh(left, right, bottom, top, self.znear, self.zfar),
            Projection::Perspective {
                fovy_radians,
                aspect,
            } => Mat4::perspective_rh(fovy_radians, aspect, self.znear, self.zfar),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
