//! Behaviour trait and per-call context
//!
//! A behaviour is a per-object script attached to an entity. The
//! [`Stage`](crate::Stage) calls its hooks:
//!
//! - `on_enable` / `on_disable` when the behaviour is switched on or off
//! - `on_minute_changed` for each game minute, if subscribed to the clock
//! - `update` once per frame
//! - `late_update` once per frame, after every `update` has run
//!
//! Hooks report failures as [`BehaviourError`]; the stage logs them and moves
//! on to the next behaviour.

use std::any::Any;
use bitflags::bitflags;
use slotmap::new_key_type;
use stagehand_input::InputState;

use crate::{Clock, Entity, EntityKey, Transform, World};

new_key_type! {
    /// Key to a behaviour attached to the stage
    pub struct BehaviourKey;
}

bitflags! {
    /// Frame phases a behaviour takes part in
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Phases: u8 {
        /// Regular per-frame update
        const UPDATE = 1 << 0;
        /// After all regular updates
        const LATE_UPDATE = 1 << 1;
        /// Receives minute-changed dispatch
        const CLOCK = 1 << 2;
    }
}

/// Everything a hook may touch during one call
pub struct BehaviourContext<'a> {
    /// Entity the behaviour is attached to
    pub owner: EntityKey,
    /// Key of the behaviour being called
    pub key: BehaviourKey,
    /// Frame delta time in seconds (zero outside a frame)
    pub dt: f32,
    pub world: &'a mut World,
    pub clock: &'a mut Clock,
    pub input: &'a InputState,
}

impl BehaviourContext<'_> {
    /// The owning entity's transform
    pub fn transform(&self) -> Result<&Transform, BehaviourError> {
        self.entity(self.owner, "owner").map(|e| &e.transform)
    }

    /// The owning entity's transform, mutably
    pub fn transform_mut(&mut self) -> Result<&mut Transform, BehaviourError> {
        let owner = self.owner;
        self.entity_mut(owner, "owner").map(|e| &mut e.transform)
    }

    /// Look up a referenced entity
    pub fn entity(&self, key: EntityKey, role: &'static str) -> Result<&Entity, BehaviourError> {
        self.world
            .get(key)
            .ok_or(BehaviourError::MissingEntity { role, key })
    }

    /// Look up a referenced entity mutably
    pub fn entity_mut(
        &mut self,
        key: EntityKey,
        role: &'static str,
    ) -> Result<&mut Entity, BehaviourError> {
        self.world
            .get_mut(key)
            .ok_or(BehaviourError::MissingEntity { role, key })
    }
}

/// A per-object script driven by the stage
///
/// All hooks default to doing nothing; implement the ones named in
/// [`phases`](Behaviour::phases).
pub trait Behaviour: Any {
    /// Short type name for logs
    fn name(&self) -> &'static str;

    /// Which frame phases to call
    fn phases(&self) -> Phases;

    fn on_enable(&mut self, _ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        Ok(())
    }

    fn on_disable(&mut self, _ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        Ok(())
    }

    fn late_update(&mut self, _ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        Ok(())
    }

    /// Called once per game minute while subscribed to the clock
    ///
    /// Read the time with `ctx.clock.hour()` / `ctx.clock.minute()`.
    fn on_minute_changed(&mut self, _ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Failure inside a behaviour hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BehaviourError {
    /// A referenced entity no longer exists
    MissingEntity { role: &'static str, key: EntityKey },
    /// A referenced entity has no camera view
    NotACamera { role: &'static str, key: EntityKey },
}

impl std::fmt::Display for BehaviourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BehaviourError::MissingEntity { role, key } => {
                write!(f, "Missing {} entity {:?}", role, key)
            }
            BehaviourError::NotACamera { role, key } => {
                write!(f, "{} entity {:?} has no camera", role, key)
            }
        }
    }
}

impl std::error::Error for BehaviourError {}
