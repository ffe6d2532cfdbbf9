use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::orientation::{look_at_euler, Wobble};
use super::target::{compute_target, sanitize_progress};

/// Pull toward the target, per second
pub const ACCELERATION: f32 = 0.8;
/// Velocity kept after each frame
pub const DAMPING: f32 = 0.8;
/// Below this speed the heading is frozen
pub const ORIENTATION_THRESHOLD: f32 = 0.01;
/// Roll applied per unit of lateral velocity
pub const BANK_FACTOR: f32 = 0.5;
/// Uniform scale of the flying avatar
pub const AVATAR_SCALE: f32 = 0.5;

/// How velocity decay relates to frame timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DampingMode {
    /// Multiply by `damping` once per frame regardless of delta.
    /// Motion feels smoother at higher frame rates.
    PerFrame,
    /// Multiply by `damping ^ (delta * reference_rate)`, which matches
    /// `PerFrame` exactly when frames arrive at `reference_rate` Hz.
    FrameRateIndependent { reference_rate: f32 },
}

impl Default for DampingMode {
    fn default() -> Self {
        DampingMode::PerFrame
    }
}

/// Tuning for the flight controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub acceleration: f32,
    pub damping: f32,
    pub damping_mode: DampingMode,
    pub orientation_threshold: f32,
    pub bank_factor: f32,
    pub wobble: Wobble,
    pub scale: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            damping: DAMPING,
            damping_mode: DampingMode::PerFrame,
            orientation_threshold: ORIENTATION_THRESHOLD,
            bank_factor: BANK_FACTOR,
            wobble: Wobble::default(),
            scale: AVATAR_SCALE,
        }
    }
}

impl FlightTuning {
    /// Velocity multiplier for one frame. A reference rate that is not a
    /// positive finite number falls back to per-frame damping.
    fn decay(&self, delta: f32) -> f32 {
        match self.damping_mode {
            DampingMode::FrameRateIndependent { reference_rate }
                if reference_rate.is_finite() && reference_rate > 0.0 =>
            {
                self.damping.powf(delta * reference_rate)
            }
            _ => self.damping,
        }
    }
}

/// Avatar kinematic state, owned by [`FlightController`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvatarState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Euler radians, XYZ order, including idle wobble
    pub rotation: Vec3,
}

impl AvatarState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

/// What the renderer applies to the avatar visual
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

/// Scroll-driven avatar motion.
///
/// Each frame the avatar's velocity is nudged toward the scroll-dependent
/// target, damped, then integrated. Position is never assigned outright after
/// construction, so a jump in the target never teleports the avatar.
#[derive(Debug, Clone)]
pub struct FlightController {
    tuning: FlightTuning,
    state: AvatarState,
    /// Look-at orientation plus bank, without wobble
    heading: Vec3,
    target: Vec3,
    frames: u64,
    active: bool,
}

impl FlightController {
    /// Start at the top-of-page target
    pub fn new(tuning: FlightTuning) -> Self {
        Self::with_initial_position(tuning, compute_target(0.0, 0.0))
    }

    pub fn with_initial_position(tuning: FlightTuning, position: Vec3) -> Self {
        let position = if position.is_finite() { position } else { Vec3::ZERO };
        Self {
            tuning,
            state: AvatarState::at(position),
            heading: Vec3::ZERO,
            target: position,
            frames: 0,
            active: true,
        }
    }

    /// Advance one frame and return the transform to draw.
    ///
    /// Integration is skipped when `delta` is zero, negative or not finite;
    /// the idle wobble still follows `elapsed`.
    pub fn step(&mut self, progress: f32, elapsed: f32, delta: f32) -> Transform {
        if !self.active {
            return self.transform();
        }

        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        self.target = compute_target(sanitize_progress(progress), elapsed);

        if delta.is_finite() && delta > 0.0 {
            let direction = self.target - self.state.position;
            self.state.velocity += direction * self.tuning.acceleration * delta;
            self.state.velocity *= self.tuning.decay(delta);
            self.state.position += self.state.velocity;
        } else {
            log::trace!("skipping integration for delta {delta}");
        }

        let velocity = self.state.velocity;
        if velocity.length() > self.tuning.orientation_threshold {
            let look_point = self.state.position + velocity.normalize();
            let mut heading = look_at_euler(self.state.position, look_point, Vec3::Y);
            heading.z = -velocity.x * self.tuning.bank_factor;
            self.heading = heading;
        }

        self.state.rotation = self.heading + self.tuning.wobble.offset(elapsed);
        self.frames += 1;

        self.transform()
    }

    /// Stop responding to frames; state is kept for a final draw
    pub fn teardown(&mut self) {
        if self.active {
            log::debug!("flight controller torn down after {} frames", self.frames);
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> &AvatarState {
        &self.state
    }

    /// Heading without wobble
    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    /// Target computed on the most recent frame
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn tuning(&self) -> &FlightTuning {
        &self.tuning
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.state.position,
            rotation: self.state.rotation,
            scale: self.tuning.scale,
        }
    }
}

impl Default for FlightController {
    fn default() -> Self {
        Self::new(FlightTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn starts_at_rest_on_the_top_target() {
        let c = FlightController::default();
        assert_eq!(c.state().position, Vec3::new(0.0, 2.0, -5.0));
        assert_eq!(c.state().velocity, Vec3::ZERO);
        assert!(c.is_active());
    }

    #[test]
    fn single_step_matches_hand_computation() {
        let mut c = FlightController::with_initial_position(FlightTuning::default(), Vec3::ZERO);
        c.step(0.0, 0.0, 0.5);

        // target (0, 2, -5); v = d * 0.8 * 0.5 * 0.8
        let expected_v = Vec3::new(0.0, 2.0, -5.0) * 0.32;
        assert!((c.state().velocity - expected_v).length() < 1e-5);
        assert!((c.state().position - expected_v).length() < 1e-5);
    }

    #[test]
    fn zero_and_negative_delta_skip_integration() {
        let mut c = FlightController::with_initial_position(FlightTuning::default(), Vec3::ZERO);
        c.step(0.5, 1.0, DT);
        let before = *c.state();

        for delta in [0.0, -0.25, f32::NAN, f32::INFINITY] {
            c.step(1.0, 2.0, delta);
            assert_eq!(c.state().position, before.position);
            assert_eq!(c.state().velocity, before.velocity);
        }
    }

    #[test]
    fn frame_rate_independent_mode_matches_per_frame_at_reference_rate() {
        let tuning = FlightTuning {
            damping_mode: DampingMode::FrameRateIndependent { reference_rate: 60.0 },
            ..FlightTuning::default()
        };
        let mut a = FlightController::with_initial_position(FlightTuning::default(), Vec3::ZERO);
        let mut b = FlightController::with_initial_position(tuning, Vec3::ZERO);

        for i in 0..120 {
            let t = i as f32 * DT;
            a.step(0.4, t, DT);
            b.step(0.4, t, DT);
        }
        assert!((a.state().position - b.state().position).length() < 1e-3);
    }

    #[test]
    fn teardown_freezes_state() {
        let mut c = FlightController::with_initial_position(FlightTuning::default(), Vec3::ZERO);
        c.step(0.2, 0.0, DT);
        c.teardown();
        let frozen = *c.state();
        let frames = c.frames();

        let t = c.step(1.0, 10.0, DT);
        assert_eq!(*c.state(), frozen);
        assert_eq!(c.frames(), frames);
        assert_eq!(t.position, frozen.position);
        assert!(!c.is_active());
    }

    #[test]
    fn banks_against_lateral_velocity() {
        let mut c = FlightController::with_initial_position(
            FlightTuning::default(),
            Vec3::new(-2.0, 1.0, -5.0),
        );
        // target x = 2 at progress 0.25, so velocity.x > 0
        c.step(0.25, 0.0, 0.1);
        let v = c.state().velocity;
        assert!(v.x > 0.0);
        assert!((c.heading().z - (-v.x * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn transform_carries_scale() {
        let mut c = FlightController::default();
        assert_eq!(c.step(0.0, 0.0, DT).scale, 0.5);
    }
}
