//! Two-player vehicle controller
//!
//! Each instance reads its own pair of axes (see [`InputBinding`]) so two
//! vehicles can share a keyboard. A switch key flips between the vehicle's
//! main and hood cameras.

use std::any::Any;
use stagehand_input::{InputBinding, KeyCode};
use stagehand_math::Vec3;

use crate::{Behaviour, BehaviourContext, BehaviourError, EntityKey, Phases};

/// Default forward speed in units per second
pub const DEFAULT_SPEED: f32 = 5.0;
/// Default turn speed in degrees per second (no turning)
pub const DEFAULT_TURN_SPEED: f32 = 0.0;

/// The pair of cameras a controller switches between
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraPair {
    pub main: EntityKey,
    pub hood: EntityKey,
}

/// Drives its entity from two input axes and toggles a camera pair
pub struct DualAxisController {
    binding: InputBinding,
    switch_key: KeyCode,
    cameras: CameraPair,
    pub speed: f32,
    pub turn_speed: f32,
}

impl DualAxisController {
    pub fn new(binding: InputBinding, switch_key: KeyCode, cameras: CameraPair) -> Self {
        Self {
            binding,
            switch_key,
            cameras,
            speed: DEFAULT_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }

    /// Builder: set forward speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: set turn speed (degrees per second)
    pub fn with_turn_speed(mut self, turn_speed: f32) -> Self {
        self.turn_speed = turn_speed;
        self
    }

    pub fn binding(&self) -> &InputBinding {
        &self.binding
    }

    pub fn switch_key(&self) -> KeyCode {
        self.switch_key
    }

    pub fn cameras(&self) -> CameraPair {
        self.cameras
    }

    fn camera_enabled(ctx: &BehaviourContext<'_>, key: EntityKey, role: &'static str) -> Result<bool, BehaviourError> {
        ctx.entity(key, role)?
            .camera
            .map(|c| c.enabled)
            .ok_or(BehaviourError::NotACamera { role, key })
    }

    fn set_camera(ctx: &mut BehaviourContext<'_>, key: EntityKey, role: &'static str, enabled: bool) -> Result<(), BehaviourError> {
        let camera = ctx
            .entity_mut(key, role)?
            .camera
            .as_mut()
            .ok_or(BehaviourError::NotACamera { role, key })?;
        camera.enabled = enabled;
        Ok(())
    }

    fn toggle_cameras(&self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        let main = Self::camera_enabled(ctx, self.cameras.main, "main camera")?;
        let hood = Self::camera_enabled(ctx, self.cameras.hood, "hood camera")?;
        Self::set_camera(ctx, self.cameras.main, "main camera", !main)?;
        Self::set_camera(ctx, self.cameras.hood, "hood camera", !hood)?;
        log::debug!("Switched camera: main={} hood={}", !main, !hood);
        Ok(())
    }
}

impl Behaviour for DualAxisController {
    fn name(&self) -> &'static str {
        "DualAxisController"
    }

    fn phases(&self) -> Phases {
        Phases::UPDATE
    }

    /// Make sure exactly one camera of the pair is on
    fn on_enable(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        let main = Self::camera_enabled(ctx, self.cameras.main, "main camera")?;
        let hood = Self::camera_enabled(ctx, self.cameras.hood, "hood camera")?;
        if main == hood {
            log::warn!(
                "Cameras for {:?} were both {}; enabling main view only",
                self.binding.forward_axis,
                if main { "on" } else { "off" }
            );
            Self::set_camera(ctx, self.cameras.main, "main camera", true)?;
            Self::set_camera(ctx, self.cameras.hood, "hood camera", false)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        let forward = ctx.input.axis(&self.binding.forward_axis);
        let horizontal = ctx.input.axis(&self.binding.horizontal_axis);
        let dt = ctx.dt;

        let transform = ctx.transform_mut()?;
        transform.translate_local(Vec3::FORWARD * (dt * self.speed * forward));
        transform.rotate_local(Vec3::UP, dt * self.turn_speed * horizontal);

        if ctx.input.key_down(self.switch_key) {
            self.toggle_cameras(ctx)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
