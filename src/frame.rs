use serde::Serialize;

/// Frame metadata handed to per-frame callbacks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the first frame
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Deterministic frame source stepping a fixed delta.
/// Yields `count` frames; the first has delta 0, like a freshly started clock.
pub struct FixedStepFrames {
    frame_number: u64,
    count: u64,
    delta: f32,
}

impl FixedStepFrames {
    pub fn new(fps: f32, count: u64) -> Self {
        let delta = if fps.is_finite() && fps > 0.0 { 1.0 / fps } else { 0.0 };
        Self {
            frame_number: 0,
            count,
            delta,
        }
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}

impl Iterator for FixedStepFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.frame_number >= self.count {
            return None;
        }

        let n = self.frame_number;
        let delta = if n == 0 { 0.0 } else { self.delta };
        self.frame_number += 1;

        Some(FrameInfo::new(n, n as f32 * self.delta, delta))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.frame_number) as usize;
        (left, Some(left))
    }
}
