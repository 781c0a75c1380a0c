//! Named input axes and per-controller bindings
//!
//! An axis is a keyboard composite: a set of keys pushing toward +1 and a set
//! pushing toward -1. Controllers look axes up by name ("Vertical1",
//! "Horizontal2", ...); the names are resolved once into an [`InputBinding`]
//! so a typo fails at construction instead of silently reading zero.

use serde::{Serialize, Deserialize};
use winit::keyboard::KeyCode;

/// Prefix of the forward/backward axis name
pub const VERTICAL_AXIS: &str = "Vertical";
/// Prefix of the turn axis name
pub const HORIZONTAL_AXIS: &str = "Horizontal";

/// A named axis driven by two groups of keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDefinition {
    /// Axis name used for lookup
    pub name: String,
    /// Keys that push the axis toward +1
    #[serde(default)]
    pub positive: Vec<KeyCode>,
    /// Keys that push the axis toward -1
    #[serde(default)]
    pub negative: Vec<KeyCode>,
}

impl AxisDefinition {
    /// Create an axis with one key in each direction
    pub fn new(name: impl Into<String>, positive: KeyCode, negative: KeyCode) -> Self {
        Self {
            name: name.into(),
            positive: vec![positive],
            negative: vec![negative],
        }
    }
}

/// The set of axes known to an [`InputState`](crate::InputState)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisMap {
    axes: Vec<AxisDefinition>,
}

impl Default for AxisMap {
    /// Two players: WASD on suffix "1", arrow keys on suffix "2", and both on
    /// the unsuffixed axes.
    fn default() -> Self {
        Self::new(vec![
            AxisDefinition {
                name: VERTICAL_AXIS.to_string(),
                positive: vec![KeyCode::KeyW, KeyCode::ArrowUp],
                negative: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            },
            AxisDefinition {
                name: HORIZONTAL_AXIS.to_string(),
                positive: vec![KeyCode::KeyD, KeyCode::ArrowRight],
                negative: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            },
            AxisDefinition::new("Vertical1", KeyCode::KeyW, KeyCode::KeyS),
            AxisDefinition::new("Horizontal1", KeyCode::KeyD, KeyCode::KeyA),
            AxisDefinition::new("Vertical2", KeyCode::ArrowUp, KeyCode::ArrowDown),
            AxisDefinition::new("Horizontal2", KeyCode::ArrowRight, KeyCode::ArrowLeft),
        ])
    }
}

impl AxisMap {
    /// Create a map from a list of axis definitions
    pub fn new(axes: Vec<AxisDefinition>) -> Self {
        Self { axes }
    }

    /// Look up an axis by name
    pub fn get(&self, name: &str) -> Option<&AxisDefinition> {
        self.axes.iter().find(|a| a.name == name)
    }

    /// Check whether an axis exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over all axes
    pub fn iter(&self) -> impl Iterator<Item = &AxisDefinition> {
        self.axes.iter()
    }

    /// Number of axes
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Check if the map has no axes
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

/// Axis names one controller instance reads every frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBinding {
    /// Forward/backward axis
    pub forward_axis: String,
    /// Turn axis
    pub horizontal_axis: String,
}

impl InputBinding {
    /// Resolve the "Vertical"/"Horizontal" axes for an instance suffix
    ///
    /// An empty suffix selects the shared axes.
    pub fn resolve(suffix: &str, axes: &AxisMap) -> Result<Self, InputError> {
        let forward_axis = format!("{}{}", VERTICAL_AXIS, suffix);
        let horizontal_axis = format!("{}{}", HORIZONTAL_AXIS, suffix);

        for name in [&forward_axis, &horizontal_axis] {
            if !axes.contains(name) {
                return Err(InputError::UnknownAxis(name.clone()));
            }
        }

        Ok(Self { forward_axis, horizontal_axis })
    }
}

/// Error resolving input bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No axis with this name is defined
    UnknownAxis(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::UnknownAxis(name) => write!(f, "Unknown input axis: {}", name),
        }
    }
}

impl std::error::Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_has_two_players() {
        let axes = AxisMap::default();
        for name in ["Vertical1", "Horizontal1", "Vertical2", "Horizontal2"] {
            assert!(axes.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_resolve_with_suffix() {
        let binding = InputBinding::resolve("2", &AxisMap::default()).unwrap();
        assert_eq!(binding.forward_axis, "Vertical2");
        assert_eq!(binding.horizontal_axis, "Horizontal2");
    }

    #[test]
    fn test_resolve_empty_suffix_uses_shared_axes() {
        let binding = InputBinding::resolve("", &AxisMap::default()).unwrap();
        assert_eq!(binding.forward_axis, "Vertical");
        assert_eq!(binding.horizontal_axis, "Horizontal");
    }

    #[test]
    fn test_resolve_unknown_suffix_fails() {
        let err = InputBinding::resolve("7", &AxisMap::default()).unwrap_err();
        assert_eq!(err, InputError::UnknownAxis("Vertical7".to_string()));
        assert!(err.to_string().contains("Vertical7"));
    }
}
