//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building lab scenes: vehicles with their camera
//! pairs, and clock-driven props.

use stagehand_core::{BehaviourTemplate, EntityTemplate, KeyCode, Scene};
use stagehand_core::behaviours::{MoverSettings, DEFAULT_FOLLOW_OFFSET, DEFAULT_SPEED, DEFAULT_TURN_SPEED};
use stagehand_math::Vec3;

/// Offset of the hood camera from its vehicle
pub const HOOD_CAMERA_OFFSET: Vec3 = Vec3 { x: 0.0, y: 2.4, z: 0.6 };

/// Builder for constructing lab scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new("Lab")
///     .with_clock(10, 9, 0.5)
///     .add_vehicle("Vehicle1", Vec3::new(-5.0, 0.0, 0.0), "1", KeyCode::KeyC)
///     .add_windowed_square("Square", MoverSettings::default())
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
    speed: f32,
    turn_speed: f32,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: Scene::new(name),
            speed: DEFAULT_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }

    /// Set the starting clock
    pub fn with_clock(mut self, hour: u32, minute: u32, minute_duration: f32) -> Self {
        self.scene = self.scene.with_clock(hour, minute, minute_duration);
        self
    }

    /// Speeds for vehicles added after this call
    pub fn with_vehicle_speed(mut self, speed: f32, turn_speed: f32) -> Self {
        self.speed = speed;
        self.turn_speed = turn_speed;
        self
    }

    /// Add a driveable vehicle with a main and a hood camera
    ///
    /// The cameras are named `{name}MainCamera` (enabled) and
    /// `{name}HoodCamera` (disabled); `switch_key` flips between them.
    pub fn add_vehicle(mut self, name: &str, position: Vec3, input_id: &str, switch_key: KeyCode) -> Self {
        let main_camera = format!("{}MainCamera", name);
        let hood_camera = format!("{}HoodCamera", name);

        self.scene.add_entity(
            EntityTemplate::new(name, position.to_array()).with_behaviour(
                BehaviourTemplate::DualAxisController {
                    input_id: input_id.to_string(),
                    switch_key,
                    main_camera: main_camera.clone(),
                    hood_camera: hood_camera.clone(),
                    speed: Some(self.speed),
                    turn_speed: Some(self.turn_speed),
                },
            ),
        );
        self.scene.add_entity(Self::camera(&main_camera, name, position, DEFAULT_FOLLOW_OFFSET, true));
        self.scene.add_entity(Self::camera(&hood_camera, name, position, HOOD_CAMERA_OFFSET, false));
        self
    }

    /// Add an entity that moves once at the time given in `settings`
    pub fn add_windowed_square(mut self, name: &str, settings: MoverSettings) -> Self {
        self.scene.add_entity(
            EntityTemplate::new(name, settings.start.to_array())
                .with_behaviour(BehaviourTemplate::WindowedMover { settings }),
        );
        self
    }

    /// Build the scene template
    pub fn build(self) -> Scene {
        self.scene
    }

    /// The two-vehicle lab: WASD drives Vehicle1 (C switches its camera),
    /// the arrow keys drive Vehicle2 (M switches), and a square slides across
    /// at 10:10.
    pub fn lab_scene() -> Scene {
        Self::new("Labs")
            .with_clock(10, 0, 0.5)
            .add_vehicle("Vehicle1", Vec3::new(-5.0, 0.0, 0.0), "1", KeyCode::KeyC)
            .add_vehicle("Vehicle2", Vec3::new(5.0, 0.0, 0.0), "2", KeyCode::KeyM)
            .add_windowed_square("Square", MoverSettings::default())
            .build()
    }

    fn camera(name: &str, target: &str, vehicle: Vec3, offset: Vec3, enabled: bool) -> EntityTemplate {
        EntityTemplate::new(name, (vehicle + offset).to_array())
            .with_camera(enabled)
            .with_behaviour(BehaviourTemplate::CameraFollower {
                target: target.to_string(),
                offset: Some(offset.to_array()),
            })
    }
}
