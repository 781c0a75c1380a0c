//! Scene construction utilities
//!
//! This module provides a declarative API for building lab scenes.

mod scene_builder;

pub use scene_builder::{SceneBuilder, HOOD_CAMERA_OFFSET};
