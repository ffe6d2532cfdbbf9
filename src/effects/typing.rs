use crate::core::timer::FixedHz;

/// Delay between characters in the hero terminal
pub const CHAR_INTERVAL: f32 = 0.02;

/// Reveals text one character at a time
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the end of the revealed prefix
    revealed: usize,
    chars_shown: usize,
    char_count: usize,
    timer: FixedHz,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, char_interval: f32) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            revealed: 0,
            chars_shown: 0,
            char_count,
            timer: FixedHz::every(char_interval),
        }
    }

    /// Spread the whole text evenly over `duration` seconds
    pub fn with_duration(text: impl Into<String>, duration: f32) -> Self {
        let text = text.into();
        let count = text.chars().count().max(1);
        Self::new(text, duration / count as f32)
    }

    pub fn update(&mut self, delta: f32) {
        if self.is_done() {
            return;
        }
        let ticks = self.timer.ticks(delta) as usize;
        for _ in 0..ticks.min(self.char_count - self.chars_shown) {
            let next = self.text[self.revealed..].chars().next();
            if let Some(c) = next {
                self.revealed += c.len_utf8();
                self.chars_shown += 1;
            }
        }
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.revealed]
    }

    pub fn is_done(&self) -> bool {
        self.chars_shown >= self.char_count
    }

    pub fn restart(&mut self) {
        self.revealed = 0;
        self.chars_shown = 0;
        self.timer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_char_per_interval() {
        let mut t = Typewriter::new("> ready", 0.02);
        assert_eq!(t.visible(), "");
        t.update(0.021);
        assert_eq!(t.visible(), ">");
        t.update(0.04);
        assert_eq!(t.visible(), "> r");
    }

    #[test]
    fn long_frame_catches_up_but_never_overruns() {
        let mut t = Typewriter::new("abc", 0.02);
        t.update(10.0);
        assert_eq!(t.visible(), "abc");
        assert!(t.is_done());
    }

    #[test]
    fn multibyte_text() {
        let mut t = Typewriter::new("é→ok", 0.01);
        t.update(0.025);
        assert_eq!(t.visible(), "é→");
    }

    #[test]
    fn duration_spreads_evenly() {
        let mut t = Typewriter::with_duration("abcd", 2.0);
        t.update(1.01);
        assert_eq!(t.visible(), "ab");
    }
}
