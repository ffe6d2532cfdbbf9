use avatar_flight::state::{AudioState, Clip, LogSink, SinkEvent};

fn loaded(sink: LogSink) -> AudioState<LogSink> {
    let mut audio = AudioState::new(sink);
    audio.set_background_music(Clip::new("theme", 0.5).looping());
    audio.set_hit_sound(Clip::new("hit", 1.0));
    audio.set_success_sound(Clip::new("success", 0.7));
    audio
}

#[cfg(test)]
mod audio_tests {
    use super::*;

    #[test]
    fn test_muted_state_plays_nothing() {
        let mut audio = loaded(LogSink::new());
        audio.play_hit();
        audio.play_success();
        audio.play_all();
        audio.toggle_background_music();
        assert!(audio.sink().events().is_empty());
        assert!(!audio.is_playing());
    }

    #[test]
    fn test_hit_uses_fixed_volume_from_start() {
        let mut audio = loaded(LogSink::new());
        audio.toggle_mute();
        audio.play_hit();
        assert_eq!(
            audio.sink().events(),
            &[SinkEvent::Played { clip: "hit".into(), volume: 0.3, from_start: true }]
        );
    }

    #[test]
    fn test_play_all_resumes_background() {
        let mut audio = loaded(LogSink::new());
        audio.toggle_mute();
        audio.play_all();
        assert_eq!(
            audio.sink().events(),
            &[SinkEvent::Played { clip: "theme".into(), volume: 0.5, from_start: false }]
        );
    }

    #[test]
    fn test_toggle_music_round_trip() {
        let mut audio = loaded(LogSink::new());
        audio.toggle_mute();

        audio.toggle_background_music();
        assert!(audio.is_playing());

        audio.toggle_background_music();
        assert!(!audio.is_playing());
        assert_eq!(audio.sink().events().last(), Some(&SinkEvent::Paused { clip: "theme".into() }));
    }

    #[test]
    fn test_blocked_playback_is_swallowed() {
        let mut audio = loaded(LogSink::blocked());
        audio.toggle_mute();
        audio.toggle_background_music();
        audio.play_hit();
        audio.play_success();
        assert!(!audio.is_playing());
        assert!(audio.sink().events().is_empty());
    }

    #[test]
    fn test_no_music_loaded_is_a_no_op() {
        let mut audio = AudioState::new(LogSink::new());
        audio.toggle_mute();
        audio.toggle_background_music();
        assert!(!audio.is_playing());
        assert!(audio.background_music().is_none());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = loaded(LogSink::new());
        let b = loaded(LogSink::new());
        a.toggle_mute();
        assert!(!a.is_muted());
        assert!(b.is_muted());
    }
}
