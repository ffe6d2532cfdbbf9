use avatar_flight::config::AppConfig;
use avatar_flight::headless::{run, write_trace};
use avatar_flight::motion::compute_target;

#[cfg(test)]
mod headless_tests {
    use super::*;

    #[test]
    fn test_trace_is_reproducible() {
        let config = AppConfig::default();
        assert_eq!(run(&config, 60.0, 120), run(&config, 60.0, 120));
    }

    #[test]
    fn test_trace_targets_match_scroll() {
        let records = run(&AppConfig::default(), 60.0, 90);
        for r in &records {
            assert_eq!(r.target, compute_target(r.progress, r.frame.time));
        }
        assert!(records.windows(2).all(|w| w[1].progress >= w[0].progress));
    }

    #[test]
    fn test_first_frame_does_not_move() {
        let records = run(&AppConfig::default(), 60.0, 2);
        assert_eq!(records[0].frame.delta, 0.0);
        assert_eq!(records[0].position, compute_target(0.0, 0.0));
    }

    #[test]
    fn test_zero_frames_prints_nothing() {
        let records = run(&AppConfig::default(), 60.0, 0);
        let mut out = Vec::new();
        write_trace(&records, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
