use glam::Vec3;
use std::f32::consts::TAU;

/// Lateral wave amplitude in world units
pub const WAVE_AMPLITUDE: f32 = 2.0;
/// Height at progress 0; the path descends to `-TOP_HEIGHT` at progress 1
pub const TOP_HEIGHT: f32 = 2.0;
/// Resting depth of the flight path
pub const BASE_DEPTH: f32 = -5.0;
pub const DEPTH_SWAY: f32 = 0.5;
pub const DEPTH_SWAY_RATE: f32 = 0.5;

/// Clamp scroll progress into [0, 1]; non-finite input reads as the top of the page
pub fn sanitize_progress(progress: f32) -> f32 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Where the avatar wants to be for a given scroll position and time.
///
/// Height depends only on scroll progress, so a given scroll position always
/// maps to the same altitude. Depth sways with `elapsed` so the avatar keeps
/// moving while the page is still.
pub fn compute_target(progress: f32, elapsed: f32) -> Vec3 {
    let progress = sanitize_progress(progress);
    let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };

    Vec3::new(
        (progress * TAU).sin() * WAVE_AMPLITUDE,
        TOP_HEIGHT - progress * TOP_HEIGHT * 2.0,
        BASE_DEPTH + (elapsed * DEPTH_SWAY_RATE).sin() * DEPTH_SWAY,
    )
}
