//! Clock-triggered one-shot move
//!
//! Listens to the clock's minute-changed signal while enabled. When the clock
//! reads exactly the activation time the entity jumps to `start` and slides to
//! `target` over `duration` seconds. Outside that minute nothing happens.

use std::any::Any;
use serde::{Serialize, Deserialize};
use stagehand_math::Vec3;

use crate::{Behaviour, BehaviourContext, BehaviourError, MoveJob, Phases, SubscriptionKey};

/// What to do when the activation time comes round while a move is running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetriggerPolicy {
    /// Drop the running move and start again from `start`
    Restart,
    /// Keep the running move, ignore the new trigger
    Ignore,
    /// Run both; the newest move writes last each frame
    #[default]
    Overlap,
}

/// Activation time and path of a [`WindowedMover`]
///
/// Fields missing from a scene file take their default values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverSettings {
    pub hour: u32,
    pub minute: u32,
    pub start: Vec3,
    pub target: Vec3,
    /// Seconds
    pub duration: f32,
    pub retrigger: RetriggerPolicy,
}

impl Default for MoverSettings {
    fn default() -> Self {
        Self {
            hour: 10,
            minute: 10,
            start: Vec3::new(62.0, -126.0, 0.0),
            target: Vec3::new(729.0, 465.0, 0.0),
            duration: 3.0,
            retrigger: RetriggerPolicy::Overlap,
        }
    }
}

/// Moves its entity once when the clock hits the activation time
#[derive(Default)]
pub struct WindowedMover {
    settings: MoverSettings,
    subscription: Option<SubscriptionKey>,
    jobs: Vec<MoveJob>,
}

impl WindowedMover {
    pub fn new(settings: MoverSettings) -> Self {
        Self {
            settings,
            subscription: None,
            jobs: Vec::new(),
        }
    }

    pub fn settings(&self) -> &MoverSettings {
        &self.settings
    }

    /// Check if a move is in progress
    pub fn is_moving(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Number of moves in progress (above one only with [`RetriggerPolicy::Overlap`])
    pub fn active_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Check if currently listening to the clock
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    fn begin(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        match self.settings.retrigger {
            RetriggerPolicy::Ignore if self.is_moving() => {
                log::debug!("Move already running, ignoring trigger");
                return Ok(());
            }
            RetriggerPolicy::Restart => self.jobs.clear(),
            _ => {}
        }

        let MoverSettings { start, target, duration, .. } = self.settings;
        ctx.transform_mut()?.position = start;
        self.jobs.push(MoveJob::new(start, target, duration));
        log::info!(
            "{} move started at {} toward ({:.1}, {:.1}, {:.1})",
            self.name(),
            ctx.clock.display(),
            target.x,
            target.y,
            target.z
        );
        Ok(())
    }
}

impl Behaviour for WindowedMover {
    fn name(&self) -> &'static str {
        "WindowedMover"
    }

    fn phases(&self) -> Phases {
        Phases::UPDATE | Phases::CLOCK
    }

    fn on_enable(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        if self.subscription.is_none() {
            self.subscription = Some(ctx.clock.minute_changed_mut().subscribe(ctx.key));
        }
        Ok(())
    }

    fn on_disable(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        if let Some(key) = self.subscription.take() {
            ctx.clock.minute_changed_mut().unsubscribe(key);
        }
        Ok(())
    }

    fn on_minute_changed(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        if ctx.clock.reads(self.settings.hour, self.settings.minute) {
            self.begin(ctx)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut BehaviourContext<'_>) -> Result<(), BehaviourError> {
        if self.jobs.is_empty() {
            return Ok(());
        }

        let dt = ctx.dt;
        let transform = ctx.transform_mut()?;
        self.jobs.retain_mut(|job| match job.step(dt) {
            Some(position) => {
                transform.position = position;
                true
            }
            None => false,
        });

        if self.jobs.is_empty() {
            log::info!("{} move finished", self.name());
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
