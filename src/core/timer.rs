/// Self-contained timers driven by frame delta.
/// Each accumulates seconds and reports when it fires; none reads a clock.

/// Fires at a fixed frequency, catching up after long frames
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    interval: f32,
    accumulator: f32,
}

impl FixedHz {
    /// Timer firing `hz` times per second
    pub fn new(hz: f32) -> Self {
        Self::every(1.0 / hz)
    }

    /// Timer firing once per `interval` seconds
    pub fn every(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Number of intervals completed by this delta
    pub fn ticks(&mut self, delta: f32) -> u32 {
        if !delta.is_finite() || delta <= 0.0 {
            return 0;
        }
        self.accumulator += delta;
        let fired = (self.accumulator / self.interval).floor();
        self.accumulator -= fired * self.interval;
        fired as u32
    }

    /// True when at least one interval completed
    pub fn tick(&mut self, delta: f32) -> bool {
        self.ticks(delta) > 0
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Minimum spacing between fires; the first attempt fires immediately
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: min_interval,
        }
    }

    /// Returns true, and restarts the wait, once enough time has passed
    pub fn try_tick(&mut self, delta: f32) -> bool {
        if delta.is_finite() && delta > 0.0 {
            self.time_since_last += delta;
        }

        if self.time_since_last >= self.min_interval {
            self.time_since_last = 0.0;
            true
        } else {
            false
        }
    }
}

/// Fires once after a duration
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Inactive countdown; call [`Countdown::start`] to run it
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Countdown that is already running
    pub fn started(duration: f32) -> Self {
        let mut countdown = Self::new(duration);
        countdown.start();
        countdown
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Returns true on the tick that completes the countdown
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active || !delta.is_finite() || delta <= 0.0 {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fraction complete in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hz_fires_at_rate() {
        let mut timer = FixedHz::new(60.0);

        assert!(!timer.tick(0.01));
        assert!(timer.tick(0.01)); // ~0.02s >= 0.0166s
        assert!(!timer.tick(0.001));
    }

    #[test]
    fn fixed_hz_catches_up() {
        let mut timer = FixedHz::every(0.02);
        assert_eq!(timer.ticks(0.105), 5);
        assert_eq!(timer.ticks(0.014), 0); // 0.005 + 0.014 < 0.02
        assert_eq!(timer.ticks(0.002), 1);
    }

    #[test]
    fn fixed_hz_ignores_bad_delta() {
        let mut timer = FixedHz::every(0.02);
        assert_eq!(timer.ticks(-1.0), 0);
        assert_eq!(timer.ticks(f32::NAN), 0);
        assert_eq!(timer.ticks(0.02), 1);
    }

    #[test]
    fn throttled_enforces_minimum() {
        let mut timer = Throttled::new(0.1);

        assert!(timer.try_tick(0.05)); // first fire immediate
        assert!(!timer.try_tick(0.05));
        assert!(timer.try_tick(0.06));
    }

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5)); // inactive

        timer.start();
        assert!(!timer.tick(0.5));
        assert_eq!(timer.progress(), 0.5);

        assert!(timer.tick(0.6));
        assert!(!timer.tick(0.1));
        assert!(!timer.is_active());
    }
}
