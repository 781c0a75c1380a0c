//! Scene serialization
//!
//! A [`Scene`] is a RON template: the starting clock, the entities, and the
//! behaviours attached to each entity. Behaviours refer to other entities by
//! name; [`Scene::instantiate`] resolves every name (and every input axis)
//! up front, so a broken reference fails at load time rather than mid-frame.

use serde::{Serialize, Deserialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use stagehand_input::{AxisMap, InputBinding, InputError, InputState, KeyCode};
use stagehand_math::Vec3;

use crate::behaviours::{CameraFollower, CameraPair, DualAxisController, MoverSettings, WindowedMover};
use crate::{Clock, Entity, EntityKey, Stage, Transform, World, HOURS_PER_DAY, MINUTES_PER_HOUR};

/// Starting time of the scene clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockTemplate {
    pub hour: u32,
    pub minute: u32,
    /// Real seconds per game minute
    pub minute_duration: f32,
}

impl ClockTemplate {
    pub fn to_clock(&self) -> Clock {
        Clock::new(self.hour, self.minute, self.minute_duration)
    }

    /// Check the reading is a real time of day and minutes have a positive length
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.hour >= HOURS_PER_DAY {
            return Err(SceneError::InvalidClock(format!(
                "hour must be below {}, got {}",
                HOURS_PER_DAY, self.hour
            )));
        }
        if self.minute >= MINUTES_PER_HOUR {
            return Err(SceneError::InvalidClock(format!(
                "minute must be below {}, got {}",
                MINUTES_PER_HOUR, self.minute
            )));
        }
        if !(self.minute_duration > 0.0 && self.minute_duration.is_finite()) {
            return Err(SceneError::InvalidClock(format!(
                "minute_duration must be positive and finite, got {}",
                self.minute_duration
            )));
        }
        Ok(())
    }
}

/// A behaviour to attach, with entity references by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BehaviourTemplate {
    CameraFollower {
        target: String,
        #[serde(default)]
        offset: Option<[f32; 3]>,
    },
    DualAxisController {
        /// Axis suffix, e.g. "1" selects "Vertical1"/"Horizontal1"
        input_id: String,
        switch_key: KeyCode,
        main_camera: String,
        hood_camera: String,
        #[serde(default)]
        speed: Option<f32>,
        #[serde(default)]
        turn_speed: Option<f32>,
    },
    WindowedMover {
        #[serde(default)]
        settings: MoverSettings,
    },
}

/// A serializable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Heading in degrees about the up axis
    #[serde(default)]
    pub yaw: f32,
    /// `Some(enabled)` makes this entity a camera
    #[serde(default)]
    pub camera: Option<bool>,
    #[serde(default)]
    pub behaviours: Vec<BehaviourTemplate>,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            position,
            yaw: 0.0,
            camera: None,
            behaviours: Vec::new(),
        }
    }

    /// Builder: make this entity a camera
    pub fn with_camera(mut self, enabled: bool) -> Self {
        self.camera = Some(enabled);
        self
    }

    /// Builder: set heading
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    /// Builder: attach a behaviour
    pub fn with_behaviour(mut self, behaviour: BehaviourTemplate) -> Self {
        self.behaviours.push(behaviour);
        self
    }

    fn to_entity(&self) -> Entity {
        let transform = Transform::from_position_yaw(Vec3::from_array(self.position), self.yaw);
        let mut entity = Entity::new(transform).with_name(self.name.clone());
        if let Some(enabled) = self.camera {
            entity = entity.with_camera(enabled);
        }
        entity
    }
}

/// A loadable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Starting clock; the default clock when absent
    #[serde(default)]
    pub clock: Option<ClockTemplate>,
    pub entities: Vec<EntityTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clock: None,
            entities: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a scene from RON text
    pub fn from_ron(contents: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(contents)?)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(false)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add an entity template
    pub fn add_entity(&mut self, entity: EntityTemplate) {
        self.entities.push(entity);
    }

    /// Set the starting clock
    pub fn with_clock(mut self, hour: u32, minute: u32, minute_duration: f32) -> Self {
        self.clock = Some(ClockTemplate { hour, minute, minute_duration });
        self
    }

    /// Build a runnable stage
    ///
    /// Entities are created first, then behaviours are attached in template
    /// order. Axis names are checked against `axes`.
    pub fn instantiate(&self, axes: &AxisMap) -> Result<Stage, SceneError> {
        if let Some(clock) = &self.clock {
            clock.validate()?;
        }

        let mut world = World::new();
        let mut names = HashSet::new();
        let mut owners = Vec::with_capacity(self.entities.len());

        for template in &self.entities {
            if !names.insert(template.name.as_str()) {
                return Err(SceneError::DuplicateEntity(template.name.clone()));
            }
            owners.push(world.add_entity(template.to_entity()));
        }

        // Resolve every reference before attaching anything
        let mut pending = Vec::new();
        for (template, owner) in self.entities.iter().zip(owners) {
            for behaviour in &template.behaviours {
                pending.push((owner, Self::resolve(&world, &template.name, behaviour, axes)?));
            }
        }

        let clock = self.clock.map(|c| c.to_clock()).unwrap_or_default();
        let mut stage = Stage::new(world, clock, InputState::new(axes.clone()));
        for (owner, behaviour) in pending {
            match behaviour {
                Resolved::Follower(b) => stage.attach(owner, b),
                Resolved::Controller(b) => stage.attach(owner, b),
                Resolved::Mover(b) => stage.attach(owner, b),
            };
        }

        log::info!(
            "Instantiated scene '{}': {} entities, {} behaviours",
            self.name,
            stage.world().entity_count(),
            stage.behaviour_count()
        );
        Ok(stage)
    }

    fn resolve(
        world: &World,
        owner_name: &str,
        template: &BehaviourTemplate,
        axes: &AxisMap,
    ) -> Result<Resolved, SceneError> {
        let lookup = |reference: &str| -> Result<EntityKey, SceneError> {
            world.key_by_name(reference).ok_or_else(|| SceneError::UnknownEntity {
                entity: owner_name.to_string(),
                reference: reference.to_string(),
            })
        };

        Ok(match template {
            BehaviourTemplate::CameraFollower { target, offset } => {
                let target = lookup(target)?;
                let follower = match offset {
                    Some(o) => CameraFollower::with_offset(target, Vec3::from_array(*o)),
                    None => CameraFollower::new(target),
                };
                Resolved::Follower(follower)
            }
            BehaviourTemplate::DualAxisController {
                input_id,
                switch_key,
                main_camera,
                hood_camera,
                speed,
                turn_speed,
            } => {
                let binding = InputBinding::resolve(input_id, axes)?;
                let cameras = CameraPair {
                    main: lookup(main_camera)?,
                    hood: lookup(hood_camera)?,
                };
                let mut controller = DualAxisController::new(binding, *switch_key, cameras);
                if let Some(speed) = speed {
                    controller = controller.with_speed(*speed);
                }
                if let Some(turn_speed) = turn_speed {
                    controller = controller.with_turn_speed(*turn_speed);
                }
                Resolved::Controller(controller)
            }
            BehaviourTemplate::WindowedMover { settings } => {
                Resolved::Mover(WindowedMover::new(*settings))
            }
        })
    }
}

enum Resolved {
    Follower(CameraFollower),
    Controller(DualAxisController),
    Mover(WindowedMover),
}

/// Error loading, saving or instantiating a scene
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// Two entities share a name
    DuplicateEntity(String),
    /// A behaviour refers to an entity that does not exist
    UnknownEntity { entity: String, reference: String },
    /// A controller's input binding could not be resolved
    Input(InputError),
    /// The starting clock is out of range
    InvalidClock(String),
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::Serialize(e)
    }
}

impl From<InputError> for SceneError {
    fn from(e: InputError) -> Self {
        SceneError::Input(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Serialize(e) => write!(f, "Serialize error: {}", e),
            SceneError::DuplicateEntity(name) => write!(f, "Duplicate entity name: {}", name),
            SceneError::UnknownEntity { entity, reference } => {
                write!(f, "Entity '{}' refers to unknown entity '{}'", entity, reference)
            }
            SceneError::Input(e) => write!(f, "Input error: {}", e),
            SceneError::InvalidClock(msg) => write!(f, "Invalid clock: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {}
