//! In-game time of day
//!
//! The clock turns real seconds into game minutes. Each game minute lasts
//! `minute_duration` real seconds. When a minute boundary is crossed the
//! [`Stage`](crate::Stage) advances the clock one minute at a time and raises
//! the minute-changed signal after each step, so a long frame never skips a
//! minute that a listener is waiting for.

use crate::Signal;

/// Minutes in an hour
pub const MINUTES_PER_HOUR: u32 = 60;
/// Hours in a day
pub const HOURS_PER_DAY: u32 = 24;
/// Most minute boundaries one [`Clock::tick`] reports; longer gaps are dropped
pub const MAX_CATCH_UP_MINUTES: u32 = HOURS_PER_DAY * MINUTES_PER_HOUR;

/// Time-of-day publisher
pub struct Clock {
    hour: u32,
    minute: u32,
    minute_duration: f32,
    // Real seconds left until the next minute boundary
    timer: f32,
    minute_changed: Signal,
}

impl Default for Clock {
    /// 10:00, half a second per game minute
    fn default() -> Self {
        Self::new(10, 0, 0.5)
    }
}

impl Clock {
    /// Create a clock at `hour:minute`
    ///
    /// Hour and minute wrap into range; a non-positive `minute_duration` is
    /// raised to a millisecond so the clock always makes progress.
    pub fn new(hour: u32, minute: u32, minute_duration: f32) -> Self {
        let minute_duration = minute_duration.max(0.001);
        Self {
            hour: (hour % HOURS_PER_DAY + (minute / MINUTES_PER_HOUR) % HOURS_PER_DAY) % HOURS_PER_DAY,
            minute: minute % MINUTES_PER_HOUR,
            minute_duration,
            timer: minute_duration,
            minute_changed: Signal::new(),
        }
    }

    /// Current hour (0-23)
    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Current minute (0-59)
    #[inline]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Real seconds per game minute
    pub fn minute_duration(&self) -> f32 {
        self.minute_duration
    }

    /// Check if the clock reads exactly `hour:minute`
    pub fn reads(&self, hour: u32, minute: u32) -> bool {
        self.hour == hour && self.minute == minute
    }

    /// The minute-changed signal
    pub fn minute_changed(&self) -> &Signal {
        &self.minute_changed
    }

    /// Mutable access to the minute-changed signal (subscribe/unsubscribe)
    pub fn minute_changed_mut(&mut self) -> &mut Signal {
        &mut self.minute_changed
    }

    /// Consume `dt` real seconds and return how many minute boundaries were crossed
    ///
    /// The clock reading itself is not changed; call [`advance_minute`](Self::advance_minute)
    /// once per returned boundary.
    ///
    /// Negative and non-finite `dt` are ignored. At most
    /// [`MAX_CATCH_UP_MINUTES`] are reported; the rest of a longer gap is
    /// dropped and the next boundary is a full minute away.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite clock step {}", dt);
            return 0;
        }
        self.timer -= dt.max(0.0);
        if self.timer > 0.0 {
            return 0;
        }

        let duration = self.minute_duration as f64;
        let behind = -(self.timer as f64);
        let mut boundaries = (behind / duration).floor() + 1.0;
        let mut timer = boundaries * duration - behind;
        if timer <= 0.0 {
            boundaries += 1.0;
            timer += duration;
        }
        if boundaries > MAX_CATCH_UP_MINUTES as f64 {
            log::warn!(
                "Clock fell {:.1}s behind; skipping to the next minute after {} boundaries",
                behind,
                MAX_CATCH_UP_MINUTES
            );
            self.timer = self.minute_duration;
            return MAX_CATCH_UP_MINUTES;
        }

        self.timer = (timer as f32).max(f32::MIN_POSITIVE);
        boundaries as u32
    }

    /// Step the reading forward one minute, rolling over hours and days
    ///
    /// Returns true when the hour changed.
    pub fn advance_minute(&mut self) -> bool {
        self.minute += 1;
        if self.minute >= MINUTES_PER_HOUR {
            self.minute = 0;
            self.hour = (self.hour + 1) % HOURS_PER_DAY;
            return true;
        }
        false
    }

    /// Format as `HH:MM`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}
