//! Unit quaternion for 3D orientation
//!
//! Angles passed to the `*_degrees` helpers follow the editor convention
//! (degrees, positive = clockwise when looking down the axis).

use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Rotation quaternion `w + xi + yj + zk`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a rotation of `angle` radians about `axis`
    ///
    /// The axis is normalized; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = (angle * 0.5).sin_cos();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Create a rotation of `degrees` about `axis`
    #[inline]
    pub fn from_axis_degrees(axis: Vec3, degrees: f32) -> Self {
        Self::from_axis_angle(axis, degrees.to_radians())
    }

    /// Rotation about the world up axis
    #[inline]
    pub fn from_yaw_degrees(degrees: f32) -> Self {
        Self::from_axis_degrees(Vec3::UP, degrees)
    }

    /// Squared magnitude
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Normalize to unit length
    pub fn normalize(&self) -> Self {
        let len = self.length_squared().sqrt();
        if len < 1e-10 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len;
        Self {
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv,
            w: self.w * inv,
        }
    }

    /// Conjugate (inverse for unit quaternions)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    /// Hamilton product: result applies `other` first, then `self`
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Rotate a vector
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q x v) + 2 q x (q x v)
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Heading about the up axis in degrees, in `(-180, 180]`
    ///
    /// Measured from +Z toward +X.
    pub fn yaw_degrees(&self) -> f32 {
        let f = self.rotate(Vec3::FORWARD);
        f.x.atan2(f.z).to_degrees()
    }
}
