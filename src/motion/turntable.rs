use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Tuning for the drag-to-spin model viewer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurntableTuning {
    /// Idle spin in radians per second
    pub auto_rotate_speed: f32,
    /// Radians per pixel of pointer travel
    pub drag_sensitivity: f32,
    /// Momentum gain applied while coasting
    pub coast_gain: f32,
    /// Spin kept after each coasting frame
    pub coast_damping: f32,
    /// Spin below which coasting hands back to auto-rotate
    pub rest_threshold: f32,
    pub pitch_limit: f32,
}

impl Default for TurntableTuning {
    fn default() -> Self {
        Self {
            auto_rotate_speed: 0.5,
            drag_sensitivity: 0.01,
            coast_gain: 5.0,
            coast_damping: 0.95,
            rest_threshold: 0.001,
            pitch_limit: FRAC_PI_4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurntableMode {
    AutoRotating,
    Dragging { last_pointer: Vec2 },
    Coasting,
}

/// Model viewer that spins on its own until grabbed, follows the pointer
/// while held, then coasts back into the idle spin.
#[derive(Debug, Clone)]
pub struct Turntable {
    tuning: TurntableTuning,
    mode: TurntableMode,
    pitch: f32,
    yaw: f32,
    spin: Vec2,
}

impl Turntable {
    pub fn new(tuning: TurntableTuning) -> Self {
        Self {
            tuning,
            mode: TurntableMode::AutoRotating,
            pitch: 0.0,
            yaw: 0.0,
            spin: Vec2::ZERO,
        }
    }

    /// Grab the model. Returns true so the caller can play the hit sound.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.mode = TurntableMode::Dragging {
            last_pointer: Vec2::new(x, y),
        };
        true
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let TurntableMode::Dragging { last_pointer } = self.mode else {
            return;
        };

        let pointer = Vec2::new(x, y);
        let moved = (pointer - last_pointer) * self.tuning.drag_sensitivity;

        self.yaw += moved.x;
        let limit = self.tuning.pitch_limit;
        self.pitch = (self.pitch + moved.y).clamp(-limit, limit);
        self.spin = moved;
        self.mode = TurntableMode::Dragging { last_pointer: pointer };
    }

    pub fn pointer_up(&mut self) {
        if matches!(self.mode, TurntableMode::Dragging { .. }) {
            self.mode = TurntableMode::Coasting;
        }
    }

    pub fn update(&mut self, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }

        match self.mode {
            TurntableMode::AutoRotating => {
                self.yaw += delta * self.tuning.auto_rotate_speed;
            }
            TurntableMode::Dragging { .. } => {}
            TurntableMode::Coasting => {
                // Coasting pitch is not clamped; only direct drags are
                self.yaw += self.spin.x * delta * self.tuning.coast_gain;
                self.pitch += self.spin.y * delta * self.tuning.coast_gain;
                self.spin *= self.tuning.coast_damping;

                if self.spin.x.abs() < self.tuning.rest_threshold
                    && self.spin.y.abs() < self.tuning.rest_threshold
                {
                    self.spin = Vec2::ZERO;
                    self.mode = TurntableMode::AutoRotating;
                }
            }
        }
    }

    pub fn mode(&self) -> TurntableMode {
        self.mode
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn spin(&self) -> Vec2 {
        self.spin
    }
}

impl Default for Turntable {
    fn default() -> Self {
        Self::new(TurntableTuning::default())
    }
}

/// Glow intensity multiplier for the arc reactor and eyes
pub fn pulse(elapsed: f32) -> f32 {
    (elapsed * 3.0).sin() * 0.2 + 0.8
}
