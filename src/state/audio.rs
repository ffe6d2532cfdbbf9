use std::collections::HashMap;
use std::fmt;

/// Volume used for overlapping UI hit sounds
pub const HIT_VOLUME: f32 = 0.3;

/// A loaded sound, identified by name
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    pub volume: f32,
    pub looping: bool,
}

impl Clip {
    pub fn new(name: impl Into<String>, volume: f32) -> Self {
        Self {
            name: name.into(),
            volume,
            looping: false,
        }
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// The platform refused to start playback (no device, autoplay policy)
    Blocked(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Blocked(reason) => write!(f, "playback blocked: {reason}"),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Something that can actually make noise
pub trait AudioSink {
    /// Start `clip` at `volume`, rewinding first when `from_start` is set
    fn play(&mut self, clip: &Clip, volume: f32, from_start: bool) -> Result<(), PlaybackError>;

    fn pause(&mut self, clip: &Clip);

    fn is_paused(&self, clip: &Clip) -> bool;
}

/// App-wide mute and music state.
///
/// Owned by the app and handed out by reference; there is no global
/// instance. Playback failures are logged and otherwise ignored.
pub struct AudioState<S: AudioSink> {
    sink: S,
    background_music: Option<Clip>,
    hit_sound: Option<Clip>,
    success_sound: Option<Clip>,
    is_muted: bool,
    is_playing: bool,
}

impl<S: AudioSink> AudioState<S> {
    /// Starts muted with nothing loaded
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            background_music: None,
            hit_sound: None,
            success_sound: None,
            is_muted: true,
            is_playing: false,
        }
    }

    pub fn set_background_music(&mut self, clip: Clip) {
        self.is_playing = !self.sink.is_paused(&clip);
        self.background_music = Some(clip);
    }

    pub fn set_hit_sound(&mut self, clip: Clip) {
        self.hit_sound = Some(clip);
    }

    pub fn set_success_sound(&mut self, clip: Clip) {
        self.success_sound = Some(clip);
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
        log::info!("Sound {}", if self.is_muted { "muted" } else { "unmuted" });
    }

    pub fn play_hit(&mut self) {
        if self.is_muted {
            return;
        }
        if let Some(clip) = &self.hit_sound {
            if let Err(e) = self.sink.play(clip, HIT_VOLUME, true) {
                log::warn!("Hit sound play prevented: {e}");
            }
        }
    }

    pub fn play_success(&mut self) {
        if self.is_muted {
            return;
        }
        if let Some(clip) = &self.success_sound {
            if let Err(e) = self.sink.play(clip, clip.volume, true) {
                log::warn!("Success sound play prevented: {e}");
            }
        }
    }

    /// Start the background music where it left off
    pub fn play_all(&mut self) {
        if self.is_muted {
            return;
        }
        if let Some(clip) = &self.background_music {
            if let Err(e) = self.sink.play(clip, clip.volume, false) {
                log::warn!("Background music play prevented: {e}");
            }
        }
    }

    /// Pause if playing; otherwise restart from the top unless muted
    pub fn toggle_background_music(&mut self) {
        let Some(clip) = &self.background_music else {
            return;
        };

        if !self.sink.is_paused(clip) {
            self.sink.pause(clip);
            self.is_playing = false;
        } else if !self.is_muted {
            match self.sink.play(clip, clip.volume, true) {
                Ok(()) => self.is_playing = true,
                Err(e) => log::warn!("Error playing background music: {e}"),
            }
        }
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn background_music(&self) -> Option<&Clip> {
        self.background_music.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// One call made against a [`LogSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Played { clip: String, volume: f32, from_start: bool },
    Paused { clip: String },
}

/// Sink without an audio device: records and logs every request.
///
/// `blocked` simulates a platform that refuses playback.
#[derive(Debug, Default)]
pub struct LogSink {
    playing: HashMap<String, bool>,
    events: Vec<SinkEvent>,
    blocked: bool,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::default()
        }
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, clip: &Clip, volume: f32, from_start: bool) -> Result<(), PlaybackError> {
        if self.blocked {
            return Err(PlaybackError::Blocked(format!("{} not allowed to start", clip.name)));
        }
        let rewind = if from_start { ", from start" } else { "" };
        log::info!("♪ {} (volume {:.1}{})", clip.name, volume, rewind);
        // one-shot clips finish immediately as far as pause state is concerned
        self.playing.insert(clip.name.clone(), clip.looping);
        self.events.push(SinkEvent::Played {
            clip: clip.name.clone(),
            volume,
            from_start,
        });
        Ok(())
    }

    fn pause(&mut self, clip: &Clip) {
        log::info!("♪ {} paused", clip.name);
        self.playing.insert(clip.name.clone(), false);
        self.events.push(SinkEvent::Paused {
            clip: clip.name.clone(),
        });
    }

    fn is_paused(&self, clip: &Clip) -> bool {
        !self.playing.get(&clip.name).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_muted_and_silent() {
        let audio = AudioState::new(LogSink::new());
        assert!(audio.is_muted());
        assert!(!audio.is_playing());
    }

    #[test]
    fn error_display() {
        let e = PlaybackError::Blocked("theme not allowed to start".into());
        assert_eq!(e.to_string(), "playback blocked: theme not allowed to start");
    }

    #[test]
    fn one_shot_clip_reads_paused_after_playing() {
        let mut sink = LogSink::new();
        let clip = Clip::new("hit", 0.3);
        sink.play(&clip, 0.3, true).unwrap();
        assert!(sink.is_paused(&clip));
    }
}
