//! Core types for Stagehand
//!
//! This crate provides the per-frame runtime and the lab behaviours:
//!
//! - [`Transform`] - Position and orientation in world space
//! - [`Entity`] / [`Camera`] - An object in the world, optionally a camera view
//! - [`World`] / [`EntityKey`] - Container for all entities
//! - [`Clock`] / [`Signal`] - Time of day and its minute-changed broadcast
//! - [`Behaviour`] - Per-object script with enable/update/late-update hooks
//! - [`Stage`] - Runs behaviours frame by frame
//! - [`MoveJob`] - One-shot linear move stepped once per frame
//! - [`Scene`] - Loadable scene template (RON)
//!
//! The behaviours themselves live in [`behaviours`].

mod transform;
mod entity;
mod world;
mod signal;
mod clock;
mod behaviour;
mod move_job;
mod stage;
mod scene;
pub mod behaviours;

pub use transform::Transform;
pub use entity::{Camera, Entity};
pub use world::{World, EntityKey};
pub use signal::{Signal, SubscriptionKey};
pub use clock::{Clock, HOURS_PER_DAY, MAX_CATCH_UP_MINUTES, MINUTES_PER_HOUR};
pub use behaviour::{Behaviour, BehaviourContext, BehaviourError, BehaviourKey, Phases};
pub use move_job::MoveJob;
pub use stage::{FrameReport, Stage};
pub use scene::{BehaviourTemplate, ClockTemplate, EntityTemplate, Scene, SceneError};

// Re-export commonly used types for convenience
pub use stagehand_math::{Quat, Vec3};
pub use stagehand_input::{AxisMap, InputBinding, InputState, KeyCode};
