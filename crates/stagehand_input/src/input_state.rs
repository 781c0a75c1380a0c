//! Per-frame keyboard state
//!
//! Tracks held keys for axis evaluation and keys that went down during the
//! current frame for edge-triggered actions. Call [`InputState::end_frame`]
//! once the frame's behaviours have run.

use std::collections::{HashMap, HashSet};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::axis::AxisMap;

/// Keyboard and axis state for one frame
pub struct InputState {
    axes: AxisMap,
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    // Analog values set directly (gamepads, scripted input)
    overrides: HashMap<String, f32>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(AxisMap::default())
    }
}

impl InputState {
    /// Create an input state reading the given axes
    pub fn new(axes: AxisMap) -> Self {
        Self {
            axes,
            held: HashSet::new(),
            pressed_this_frame: HashSet::new(),
            overrides: HashMap::new(),
        }
    }

    /// The axes this state evaluates
    pub fn axes(&self) -> &AxisMap {
        &self.axes
    }

    /// Process keyboard input
    ///
    /// Returns true when this is a new press (not a key-repeat of a held key).
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => {
                let fresh = self.held.insert(key);
                if fresh {
                    self.pressed_this_frame.insert(key);
                }
                fresh
            }
            ElementState::Released => {
                self.held.remove(&key);
                false
            }
        }
    }

    /// Press and immediately hold a key (shorthand for scripted input)
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.process_keyboard(key, ElementState::Pressed)
    }

    /// Release a key
    pub fn release(&mut self, key: KeyCode) {
        self.process_keyboard(key, ElementState::Released);
    }

    /// Check if a key is currently held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Check if a key went down during this frame
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.pressed_this_frame.contains(&key)
    }

    /// Set an axis value directly, overriding its keys until cleared
    pub fn set_axis(&mut self, name: impl Into<String>, value: f32) {
        self.overrides.insert(name.into(), value.clamp(-1.0, 1.0));
    }

    /// Remove a direct axis value
    pub fn clear_axis(&mut self, name: &str) {
        self.overrides.remove(name);
    }

    /// Current value of a named axis in `[-1, 1]`
    ///
    /// Unknown axes read as zero.
    pub fn axis(&self, name: &str) -> f32 {
        if let Some(value) = self.overrides.get(name) {
            return *value;
        }

        let Some(def) = self.axes.get(name) else {
            log::debug!("Axis '{}' is not defined", name);
            return 0.0;
        };

        let positive = def.positive.iter().any(|k| self.held.contains(k)) as i32;
        let negative = def.negative.iter().any(|k| self.held.contains(k)) as i32;
        (positive - negative) as f32
    }

    /// Finish the frame: forget this frame's key-down edges
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
    }
}
