use avatar_flight::motion::{pulse, Turntable, TurntableMode, TurntableTuning};
use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

const DT: f32 = 1.0 / 60.0;

#[cfg(test)]
mod turntable_tests {
    use super::*;

    #[test]
    fn test_idle_spin() {
        let mut t = Turntable::default();
        t.update(2.0);
        assert!((t.yaw() - 1.0).abs() < 1e-6);
        assert_eq!(t.pitch(), 0.0);
        assert_eq!(t.mode(), TurntableMode::AutoRotating);
    }

    #[test]
    fn test_drag_coast_then_resume() {
        let mut t = Turntable::default();
        assert!(t.pointer_down(100.0, 100.0));
        t.pointer_move(150.0, 110.0);
        assert!((t.yaw() - 0.5).abs() < 1e-6);
        assert!((t.pitch() - 0.1).abs() < 1e-6);
        assert!((t.spin() - Vec2::new(0.5, 0.1)).length() < 1e-6);

        // holding still does not drift
        let held_yaw = t.yaw();
        t.update(DT);
        assert_eq!(t.yaw(), held_yaw);

        t.pointer_up();
        assert_eq!(t.mode(), TurntableMode::Coasting);
        t.update(DT);
        assert!(t.yaw() > held_yaw);

        let mut frames = 0;
        while t.mode() == TurntableMode::Coasting {
            t.update(DT);
            frames += 1;
            assert!(frames < 1000, "coasting never settled");
        }
        assert_eq!(t.mode(), TurntableMode::AutoRotating);
        assert_eq!(t.spin(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_pitch_is_clamped() {
        let mut t = Turntable::new(TurntableTuning::default());
        t.pointer_down(0.0, 0.0);
        t.pointer_move(0.0, 10_000.0);
        assert!((t.pitch() - FRAC_PI_4).abs() < 1e-6);
        t.pointer_move(0.0, -10_000.0);
        assert!((t.pitch() + FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_moves_without_grab_are_ignored() {
        let mut t = Turntable::default();
        t.pointer_move(500.0, 500.0);
        t.pointer_up();
        assert_eq!(t.mode(), TurntableMode::AutoRotating);
        assert_eq!(t.yaw(), 0.0);
    }

    #[test]
    fn test_glow_pulse_range() {
        for i in 0..200 {
            let g = pulse(i as f32 * 0.05);
            assert!((0.6 - 1e-6..=1.0 + 1e-6).contains(&g));
        }
        assert!((pulse(0.0) - 0.8).abs() < 1e-6);
    }
}
