//! Entity and Camera types
//!
//! An Entity is an object in the world: an optional name, a transform, and an
//! optional camera view.

use crate::Transform;

/// A camera view that can be switched on or off
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Camera {
    /// Whether this view is currently rendering
    pub enabled: bool,
}

impl Camera {
    /// Create a camera with the given enabled state
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// An object in the world
#[derive(Clone, Debug, Default)]
pub struct Entity {
    /// Optional name for lookup
    pub name: Option<String>,
    /// Position and orientation
    pub transform: Transform,
    /// Camera view, if this entity is a camera
    pub camera: Option<Camera>,
}

impl Entity {
    /// Create an entity with the given transform
    pub fn new(transform: Transform) -> Self {
        Self {
            name: None,
            transform,
            camera: None,
        }
    }

    /// Builder: set the entity name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: attach a camera view
    pub fn with_camera(mut self, enabled: bool) -> Self {
        self.camera = Some(Camera::new(enabled));
        self
    }

    /// Check if this entity is a camera that is currently enabled
    pub fn is_active_camera(&self) -> bool {
        self.camera.map(|c| c.enabled).unwrap_or(false)
    }
}
