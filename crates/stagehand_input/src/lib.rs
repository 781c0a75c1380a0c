//! Input handling for Stagehand
//!
//! Keyboard state, named axes, and the per-controller bindings that select
//! which axes a controller reads.

mod axis;
mod input_state;

pub use axis::{AxisDefinition, AxisMap, InputBinding, InputError, HORIZONTAL_AXIS, VERTICAL_AXIS};
pub use input_state::InputState;

// Re-export key types so behaviours do not need a direct winit dependency
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
