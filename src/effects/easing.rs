use glam::Vec2;

/// Quadratic ease-out: fast start, gentle landing
pub fn power2_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in
pub fn power2_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Side a section slides in from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealFrom {
    Top,
    Bottom,
    Left,
    Right,
}

impl RevealFrom {
    fn start_offset(self, distance: f32) -> Vec2 {
        match self {
            RevealFrom::Top => Vec2::new(0.0, -distance),
            RevealFrom::Bottom => Vec2::new(0.0, distance),
            RevealFrom::Left => Vec2::new(-distance, 0.0),
            RevealFrom::Right => Vec2::new(distance, 0.0),
        }
    }
}

/// Slide-and-fade entrance, sampled by time since it was triggered
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    pub from: RevealFrom,
    pub distance: f32,
    pub delay: f32,
    pub duration: f32,
}

impl Reveal {
    pub fn new(from: RevealFrom) -> Self {
        Self {
            from,
            distance: 100.0,
            delay: 0.0,
            duration: 1.0,
        }
    }

    fn eased(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        power2_out((t - self.delay) / self.duration)
    }

    /// Pixel offset from the resting position
    pub fn offset(&self, t: f32) -> Vec2 {
        self.from.start_offset(self.distance) * (1.0 - self.eased(t))
    }

    pub fn opacity(&self, t: f32) -> f32 {
        self.eased(t)
    }
}
