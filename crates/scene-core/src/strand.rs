//! Strands: fixed-size polylines with a line material.
//!
//! A strand's point count is decided when it is built and never changes; the
//! morph animations rewrite points in place through [`StrandBuffer::set_point`]
//! so that nothing is allocated per frame. Every write marks the buffer dirty
//! and the renderer clears the flag once it has uploaded the points.

use crate::error::SceneError;
use glam::Vec3;

/// Color, opacity and stroke width of a strand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    /// Stroke width in CSS pixels.
    pub width: f32,
}

impl Material {
    pub const fn new(color: [f32; 3], opacity: f32, width: f32) -> Self {
        Self {
            color,
            opacity,
            width,
        }
    }

    /// Scale the RGB channels, leaving opacity and width alone.
    pub fn brightened(mut self, factor: f32) -> Self {
        for c in &mut self.color {
            *c *= factor;
        }
        self
    }

    pub fn rgba(&self) -> [f32; 4] {
        [
            self.color[0],
            self.color[1],
            self.color[2],
            self.opacity.clamp(0.0, 1.0),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrandBuffer {
    points: Vec<Vec3>,
    dirty: bool,
}

impl StrandBuffer {
    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self {
            points,
            dirty: true,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    #[inline]
    pub fn set_point(&mut self, index: usize, xyz: Vec3) -> Result<(), SceneError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(SceneError::PointOutOfRange { index, len })?;
        *slot = xyz;
        self.dirty = true;
        Ok(())
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// A polyline attached to a transform node.
#[derive(Clone, Debug, PartialEq)]
pub struct Strand {
    pub node: crate::graph::NodeId,
    pub buffer: StrandBuffer,
    pub material: Material,
}
