//! The stage: world, clock, input and the behaviours that run on them
//!
//! One call to [`Stage::frame`] runs a full frame in this order:
//!
//! 1. Advance the clock; for every minute boundary crossed, step the clock one
//!    minute and dispatch minute-changed to current subscribers
//! 2. `update` on every enabled behaviour
//! 3. `late_update` on every enabled behaviour
//! 4. Clear this frame's key-down edges
//!
//! A move started during dispatch therefore takes its first step in the same
//! frame's update phase.

use slotmap::SlotMap;
use stagehand_input::InputState;

use crate::{
    Behaviour, BehaviourContext, BehaviourError, BehaviourKey, Clock, EntityKey, Phases, World,
};

struct BehaviourSlot {
    owner: EntityKey,
    enabled: bool,
    behaviour: Box<dyn Behaviour>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Hook {
    Enable,
    Disable,
    MinuteChanged,
    Update,
    LateUpdate,
}

/// Outcome of one frame
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Frame number (starting at 0)
    pub frame: u64,
    /// Game minutes that ticked over this frame
    pub minutes_elapsed: u32,
    /// Hook failures, already logged
    pub errors: Vec<BehaviourError>,
}

/// Runs behaviours against a world, a clock and the current input
pub struct Stage {
    world: World,
    clock: Clock,
    input: InputState,
    behaviours: SlotMap<BehaviourKey, BehaviourSlot>,
    frame: u64,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(World::new(), Clock::default(), InputState::default())
    }
}

impl Stage {
    /// Create a stage with no behaviours
    pub fn new(world: World, clock: Clock, input: InputState) -> Self {
        Self {
            world,
            clock,
            input,
            behaviours: SlotMap::with_key(),
            frame: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Replace the clock
    ///
    /// Subscriptions live on the clock, so enabled clock listeners are
    /// disabled before the swap and re-enabled after it.
    pub fn set_clock(&mut self, clock: Clock) {
        let listeners: Vec<BehaviourKey> = self
            .behaviours
            .iter()
            .filter(|(_, s)| s.enabled && s.behaviour.phases().contains(Phases::CLOCK))
            .map(|(k, _)| k)
            .collect();

        for key in &listeners {
            self.set_enabled(*key, false);
        }
        self.clock = clock;
        for key in &listeners {
            self.set_enabled(*key, true);
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Number of attached behaviours
    pub fn behaviour_count(&self) -> usize {
        self.behaviours.len()
    }

    /// Attach a behaviour to `owner` and enable it
    ///
    /// Errors from `on_enable` are logged; the behaviour stays attached and
    /// enabled.
    pub fn attach<B: Behaviour>(&mut self, owner: EntityKey, behaviour: B) -> BehaviourKey {
        let key = self.behaviours.insert(BehaviourSlot {
            owner,
            enabled: false,
            behaviour: Box::new(behaviour),
        });
        self.set_enabled(key, true);
        key
    }

    /// Disable and remove a behaviour
    pub fn detach(&mut self, key: BehaviourKey) -> Option<Box<dyn Behaviour>> {
        self.set_enabled(key, false);
        self.behaviours.remove(key).map(|slot| slot.behaviour)
    }

    /// Check whether a behaviour is attached and enabled
    pub fn is_enabled(&self, key: BehaviourKey) -> bool {
        self.behaviours.get(key).map(|s| s.enabled).unwrap_or(false)
    }

    /// Enable or disable a behaviour
    ///
    /// Returns false if the key is unknown. Disabling releases every clock
    /// subscription the behaviour still holds, even if its `on_disable`
    /// forgot to.
    pub fn set_enabled(&mut self, key: BehaviourKey, enabled: bool) -> bool {
        let Some(slot) = self.behaviours.get_mut(key) else {
            return false;
        };
        if slot.enabled == enabled {
            return true;
        }
        slot.enabled = enabled;

        let hook = if enabled { Hook::Enable } else { Hook::Disable };
        if let Err(e) = self.invoke(key, hook, 0.0) {
            self.log_failure(key, hook, &e);
        }

        if !enabled {
            let leaked = self.clock.minute_changed_mut().unsubscribe_listener(key);
            if leaked > 0 {
                log::warn!(
                    "{} kept {} clock subscription(s) after disable; released",
                    self.behaviour_name(key),
                    leaked
                );
            }
        }
        true
    }

    /// Downcast an attached behaviour
    pub fn get<T: Behaviour>(&self, key: BehaviourKey) -> Option<&T> {
        self.behaviours
            .get(key)
            .and_then(|s| s.behaviour.as_any().downcast_ref::<T>())
    }

    /// Downcast an attached behaviour mutably
    pub fn get_mut<T: Behaviour>(&mut self, key: BehaviourKey) -> Option<&mut T> {
        self.behaviours
            .get_mut(key)
            .and_then(|s| s.behaviour.as_any_mut().downcast_mut::<T>())
    }

    /// Entities that own an attached behaviour of type `T`, enabled or not
    pub fn owners<T: Behaviour>(&self) -> Vec<EntityKey> {
        self.behaviours
            .values()
            .filter(|s| s.behaviour.as_any().is::<T>())
            .map(|s| s.owner)
            .collect()
    }

    /// Run one frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let mut report = FrameReport {
            frame: self.frame,
            ..Default::default()
        };

        // 1. Clock
        report.minutes_elapsed = self.clock.tick(dt);
        for _ in 0..report.minutes_elapsed {
            if self.clock.advance_minute() {
                log::debug!("Hour changed: {}", self.clock.display());
            }
            self.dispatch_minute_changed(dt, &mut report);
        }

        // 2-3. Update phases
        self.run_phase(Phases::UPDATE, Hook::Update, dt, &mut report);
        self.run_phase(Phases::LATE_UPDATE, Hook::LateUpdate, dt, &mut report);

        // 4. Input edges are valid for one frame
        self.input.end_frame();
        self.frame += 1;
        report
    }

    fn dispatch_minute_changed(&mut self, dt: f32, report: &mut FrameReport) {
        for (subscription, listener) in self.clock.minute_changed().subscriptions() {
            // A handler earlier in this dispatch may have released it
            if !self.clock.minute_changed().is_subscribed(subscription) || !self.is_enabled(listener) {
                continue;
            }
            if let Err(e) = self.invoke(listener, Hook::MinuteChanged, dt) {
                self.log_failure(listener, Hook::MinuteChanged, &e);
                report.errors.push(e);
            }
        }
    }

    fn run_phase(&mut self, phase: Phases, hook: Hook, dt: f32, report: &mut FrameReport) {
        let keys: Vec<BehaviourKey> = self
            .behaviours
            .iter()
            .filter(|(_, s)| s.enabled && s.behaviour.phases().contains(phase))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            if let Err(e) = self.invoke(key, hook, dt) {
                self.log_failure(key, hook, &e);
                report.errors.push(e);
            }
        }
    }

    fn invoke(&mut self, key: BehaviourKey, hook: Hook, dt: f32) -> Result<(), BehaviourError> {
        let Some(slot) = self.behaviours.get_mut(key) else {
            return Ok(());
        };

        let mut ctx = BehaviourContext {
            owner: slot.owner,
            key,
            dt,
            world: &mut self.world,
            clock: &mut self.clock,
            input: &self.input,
        };

        let behaviour = &mut slot.behaviour;
        match hook {
            Hook::Enable => behaviour.on_enable(&mut ctx),
            Hook::Disable => behaviour.on_disable(&mut ctx),
            Hook::MinuteChanged => behaviour.on_minute_changed(&mut ctx),
            Hook::Update => behaviour.update(&mut ctx),
            Hook::LateUpdate => behaviour.late_update(&mut ctx),
        }
    }

    fn behaviour_name(&self, key: BehaviourKey) -> &'static str {
        self.behaviours
            .get(key)
            .map(|s| s.behaviour.name())
            .unwrap_or("<detached>")
    }

    fn log_failure(&self, key: BehaviourKey, hook: Hook, error: &BehaviourError) {
        log::error!("{} {:?} failed: {}", self.behaviour_name(key), hook, error);
    }
}
