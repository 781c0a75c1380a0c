//! Frame loop system
//!
//! Measures wall-clock time between redraws, clamps it, and runs one stage
//! frame per redraw. Pausing freezes the stage entirely, clock included.

use std::time::Instant;
use stagehand_core::{FrameReport, Stage};

/// Drives a [`Stage`] from wall-clock time
pub struct SimulationSystem {
    last_frame: Instant,
    max_dt: f32,
    paused: bool,
}

impl SimulationSystem {
    /// Create a new simulation system
    ///
    /// Frame steps longer than `max_dt` seconds are clamped to it.
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt,
            paused: false,
        }
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle pause, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    /// Seconds since the previous call, clamped to `max_dt`
    pub fn frame_dt(&mut self, now: Instant) -> f32 {
        let raw_dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        raw_dt.min(self.max_dt)
    }

    /// Run one frame using wall-clock time
    ///
    /// Returns `None` while paused. Time spent paused is not replayed on resume.
    pub fn update(&mut self, stage: &mut Stage) -> Option<FrameReport> {
        let dt = self.frame_dt(Instant::now());
        if self.paused {
            return None;
        }
        Some(self.step(stage, dt))
    }

    /// Run one frame with an explicit time step
    pub fn step(&self, stage: &mut Stage, dt: f32) -> FrameReport {
        let dt = dt.clamp(0.0, self.max_dt);
        let report = stage.frame(dt);
        if report.minutes_elapsed > 0 {
            log::debug!("Clock {}", stage.clock().display());
        }
        report
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use stagehand_core::{Clock, InputState, World};

    #[test]
    fn test_frame_dt_capped() {
        let mut sim = SimulationSystem::new(0.25);
        let later = sim.last_frame + Duration::from_secs(2);
        assert_eq!(sim.frame_dt(later), 0.25);
    }

    #[test]
    fn test_frame_dt_measures_gap() {
        let mut sim = SimulationSystem::new(0.25);
        let later = sim.last_frame + Duration::from_millis(100);
        let dt = sim.frame_dt(later);
        assert!((dt - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_step_advances_stage() {
        let sim = SimulationSystem::new(0.25);
        let mut stage = Stage::new(World::new(), Clock::new(10, 0, 0.5), InputState::default());
        let report = sim.step(&mut stage, 0.2);
        assert_eq!(report.frame, 0);
        assert_eq!(stage.frame_count(), 1);
    }

    #[test]
    fn test_step_clamps_dt() {
        let sim = SimulationSystem::new(0.25);
        let mut stage = Stage::new(World::new(), Clock::new(10, 0, 0.5), InputState::default());
        // 10 seconds would be 20 minutes unclamped
        let report = sim.step(&mut stage, 10.0);
        assert_eq!(report.minutes_elapsed, 0);
        let report = sim.step(&mut stage, 10.0);
        assert_eq!(report.minutes_elapsed, 1);
        assert!(stage.clock().reads(10, 1));
    }

    #[test]
    fn test_paused_update_skips_frame() {
        let mut sim = SimulationSystem::default();
        let mut stage = Stage::default();
        assert!(sim.toggle_pause());
        assert!(sim.update(&mut stage).is_none());
        assert_eq!(stage.frame_count(), 0);

        assert!(!sim.toggle_pause());
        assert!(sim.update(&mut stage).is_some());
        assert_eq!(stage.frame_count(), 1);
    }
}
