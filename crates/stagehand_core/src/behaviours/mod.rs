//! The lab behaviours

mod camera_follower;
mod dual_axis_controller;
mod windowed_mover;

pub use camera_follower::{CameraFollower, DEFAULT_FOLLOW_OFFSET};
pub use dual_axis_controller::{CameraPair, DualAxisController, DEFAULT_SPEED, DEFAULT_TURN_SPEED};
pub use windowed_mover::{MoverSettings, RetriggerPolicy, WindowedMover};
