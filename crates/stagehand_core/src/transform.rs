//! 3D Transform (position, rotation)
//!
//! Translation and rotation helpers operate in local space, so "forward" is
//! the object's own forward axis.

use stagehand_math::{Quat, Vec3};
use serde::{Serialize, Deserialize};

/// Position and orientation of an object in world space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Orientation
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Create a transform with position and heading (degrees about up)
    pub fn from_position_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_yaw_degrees(yaw_degrees),
        }
    }

    /// Local forward direction in world space
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(Vec3::FORWARD)
    }

    /// Local up direction in world space
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation.rotate(Vec3::UP)
    }

    /// Local right direction in world space
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation.rotate(Vec3::RIGHT)
    }

    /// Heading about the world up axis in degrees
    #[inline]
    pub fn yaw_degrees(&self) -> f32 {
        self.rotation.yaw_degrees()
    }

    /// Translate by a world-space offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Translate by an offset expressed in local space
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += self.rotation.rotate(offset);
    }

    /// Rotate about a local axis by `degrees`
    pub fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        let delta = Quat::from_axis_degrees(axis, degrees);
        self.rotation = self.rotation.mul(&delta).normalize();
    }
}
