//! Stagehand Mathematics Library
//!
//! This crate provides the small set of 3D types the Stagehand behaviours need.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion orientation

mod vec3;
mod quat;

pub use vec3::Vec3;
pub use quat::Quat;
