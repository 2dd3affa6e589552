use crate::math::Vector2;
use nalgebra as na;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Represents a rigid transformation in the plane (position and rotation)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in world space
    pub position: Vector2,

    /// Counter-clockwise rotation in radians
    pub angle: f32,
}

impl Transform {
    /// Creates a new transform with the given position and rotation
    #[inline]
    pub fn new(position: Vector2, angle: f32) -> Self {
        Self { position, angle }
    }

    /// Creates a new identity transform (no translation, no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector2::zero(),
            angle: 0.0,
        }
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector2) -> Self {
        Self { position, angle: 0.0 }
    }

    /// Converts to an nalgebra isometry
    #[inline]
    pub fn to_isometry(&self) -> na::Isometry2<f32> {
        na::Isometry2::new(self.position.to_nalgebra(), self.angle)
    }

    /// Rotates a direction from local space to world space
    #[inline]
    pub fn transform_vector(&self, vector: Vector2) -> Vector2 {
        vector.rotated(self.angle)
    }

    /// Transforms a point from local space to world space
    #[inline]
    pub fn transform_point(&self, point: Vector2) -> Vector2 {
        let p = self.to_isometry() * na::Point2::new(point.x, point.y);
        Vector2::new(p.x, p.y)
    }

    /// Transforms a point from world space to local space
    #[inline]
    pub fn inverse_transform_point(&self, point: Vector2) -> Vector2 {
        let p = self.to_isometry().inverse_transform_point(&na::Point2::new(point.x, point.y));
        Vector2::new(p.x, p.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
