//! Input mapping from raw events to application actions
//!
//! Maps keyboard input to high-level actions like Exit or TogglePause.
//! Driving keys and camera switch keys are NOT mapped here - they go straight
//! into the stage's `InputState` where the behaviours read them.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Application-level actions (not handled by behaviours)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Reload the scene from its template (R key)
    ResetScene,
    /// Freeze or resume the frame loop (P key)
    TogglePause,
}

/// Maps raw input events to application actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for application keys, `None` for everything else
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyR => Some(InputAction::ResetScene),
            KeyCode::KeyP => Some(InputAction::TogglePause),
            _ => None,
        }
    }
}
