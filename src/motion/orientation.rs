use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Euler angles (XYZ order) that point an object's +Z axis from `from` toward `to`.
///
/// Returns zero rotation when the two points coincide.
pub fn look_at_euler(from: Vec3, to: Vec3, up: Vec3) -> Vec3 {
    let Some(mut z) = (to - from).try_normalize() else {
        return Vec3::ZERO;
    };

    let mut x = up.cross(z);
    if x.length_squared() < 1e-12 {
        // Looking straight along `up`: nudge off the pole so the basis is defined
        if (up.z.abs() - 1.0).abs() < 1e-6 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    let (ex, ey, ez) = Quat::from_mat3(&Mat3::from_cols(x, y, z)).to_euler(EulerRot::XYZ);
    Vec3::new(ex, ey, ez)
}

/// Convert XYZ euler angles into a quaternion
pub fn euler_to_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Small sinusoidal hover on pitch and yaw, driven by elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wobble {
    pub pitch_rate: f32,
    pub yaw_rate: f32,
    pub amplitude: f32,
}

impl Wobble {
    pub const fn new(pitch_rate: f32, yaw_rate: f32, amplitude: f32) -> Self {
        Self { pitch_rate, yaw_rate, amplitude }
    }

    /// Rotation offset to layer over the heading at `elapsed` seconds
    pub fn offset(&self, elapsed: f32) -> Vec3 {
        if !elapsed.is_finite() {
            return Vec3::ZERO;
        }
        Vec3::new(
            (elapsed * self.pitch_rate).sin() * self.amplitude,
            (elapsed * self.yaw_rate).cos() * self.amplitude,
            0.0,
        )
    }
}

impl Default for Wobble {
    fn default() -> Self {
        Self::new(2.0, 1.5, 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn forward_of(rotation: Vec3) -> Vec3 {
        euler_to_quat(rotation) * Vec3::Z
    }

    #[test]
    fn looking_down_positive_z_is_identity() {
        let r = look_at_euler(Vec3::ZERO, Vec3::Z, Vec3::Y);
        assert!(r.length() < EPS);
    }

    #[test]
    fn forward_axis_points_at_target() {
        let from = Vec3::new(1.0, 2.0, -5.0);
        let targets = [
            Vec3::new(2.0, 2.0, -5.0),
            Vec3::new(1.0, 1.0, -6.0),
            Vec3::new(-3.0, 4.0, 2.0),
        ];
        for to in targets {
            let r = look_at_euler(from, to, Vec3::Y);
            let expected = (to - from).normalize();
            assert!((forward_of(r) - expected).length() < EPS, "to={to:?}");
        }
    }

    #[test]
    fn straight_up_does_not_produce_nan() {
        let r = look_at_euler(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(r.is_finite());
        assert!((forward_of(r) - Vec3::Y).length() < 1e-2);
    }

    #[test]
    fn coincident_points_keep_identity() {
        assert_eq!(look_at_euler(Vec3::ONE, Vec3::ONE, Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn wobble_at_zero() {
        let w = Wobble::default().offset(0.0);
        assert!(w.x.abs() < EPS);
        assert!((w.y - 0.05).abs() < EPS);
        assert_eq!(w.z, 0.0);
    }

    #[test]
    fn wobble_is_bounded() {
        let w = Wobble::default();
        for i in 0..500 {
            let o = w.offset(i as f32 * 0.037);
            assert!(o.x.abs() <= 0.05 + EPS && o.y.abs() <= 0.05 + EPS);
        }
    }
}
