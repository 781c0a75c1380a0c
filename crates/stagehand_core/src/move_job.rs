//! One-shot linear move
//!
//! A [`MoveJob`] is the state of a fixed-duration interpolation between two
//! points. The owner calls [`step`](MoveJob::step) once per frame and writes
//! the returned position; `None` means the move is over and the job can be
//! dropped.
//!
//! Each step writes the position for the elapsed time *before* adding the
//! frame delta, so the last written position is usually short of the target:
//! with 1s frames over 3s the writes are at t = 0, 1/3 and 2/3, and the step
//! that would reach 3s ends the job instead.

use stagehand_math::Vec3;

/// State of a one-shot interpolation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveJob {
    start: Vec3,
    target: Vec3,
    elapsed: f32,
    duration: f32,
}

impl MoveJob {
    /// Create a job at elapsed time zero
    pub fn new(start: Vec3, target: Vec3, duration: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Seconds since the job started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated position at the current elapsed time
    pub fn position(&self) -> Vec3 {
        self.start.lerp(self.target, self.progress())
    }

    /// Check if the job has run its full duration
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance one frame
    ///
    /// Returns the position to write this frame, or `None` once the job has
    /// finished. `dt` is never subtracted, so elapsed time only grows.
    pub fn step(&mut self, dt: f32) -> Option<Vec3> {
        if self.is_finished() {
            return None;
        }
        let position = self.position();
        self.elapsed += dt.max(0.0);
        Some(position)
    }
}
