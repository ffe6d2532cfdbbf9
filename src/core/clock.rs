use std::time::Instant;

/// Frame clock: monotonic elapsed time plus per-tick delta, in seconds
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Advance the clock, returning `(elapsed, delta)`
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        (now.duration_since(self.start).as_secs_f32(), delta)
    }

    /// Seconds since the clock started, without advancing it
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Forget the time spent away (e.g. while minimized) so the next delta is small.
    /// Elapsed time keeps counting.
    pub fn resume(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.tick();

        assert!(delta >= 0.009);
        assert!(elapsed >= delta);
    }

    #[test]
    fn elapsed_never_decreases() {
        let mut clock = Clock::new();
        let mut last = 0.0;
        for _ in 0..50 {
            let (elapsed, delta) = clock.tick();
            assert!(elapsed >= last);
            assert!(delta >= 0.0);
            last = elapsed;
        }
    }

    #[test]
    fn resume_drops_the_gap() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.resume();

        let (elapsed, delta) = clock.tick();
        assert!(delta < 0.005);
        assert!(elapsed >= 0.009);
    }
}
