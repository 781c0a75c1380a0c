//! Third-person camera follow
//!
//! Runs in the late phase so the target has already moved this frame.

use std::any::Any;
use stagehand_math::Vec3;

use crate::{Behaviour, BehaviourContext, BehaviourError, EntityKey, Phases};

/// Default offset: above and behind the target
pub const DEFAULT_FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 6.0, -7.0);

/// Keeps its entity at a fixed offset from a target entity
pub struct CameraFollower {
    target: EntityKey,
    offset: Vec3,
}

impl CameraFollower {
    /// Follow `target` at the default offset
    pub fn new(target: EntityKey) -> Self {
        Self::with_offset(target, DEFAULT_FOLLOW_OFFSET)
    }

    /// Follow `target` at a custom offset
    pub fn with_offset(target: EntityKey, offset: Vec3) -> Self {
        Self { target, offset }
    }

    pub fn target(&self) -> EntityKey {
        self.target
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}

impl Behaviour for CameraFollower {
    fn name(&self) -> &'static str {
        "CameraFollower"
    }

    fn phases(&self) -> Phases {
        Phases::LATE_UPDATE
    }

    fn late_update(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        let target = ctx.entity(self.target, "follow target")?.transform.position;
        ctx.transform_mut()?.position = target + self.offset;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
