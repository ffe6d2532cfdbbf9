use serde::{Deserialize, Serialize};

/// Pixels moved per wheel line or arrow key press
pub const LINE_HEIGHT: f32 = 40.0;

/// Anything that can report normalized scroll progress
pub trait ScrollSource {
    /// Fraction scrolled, 0.0 at the top and 1.0 at the bottom
    fn progress(&self) -> f32;
}

/// Raw geometry of a scroll container, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub scroll_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    pub fn new(offset: f32, scroll_height: f32, viewport_height: f32) -> Self {
        Self {
            offset,
            scroll_height,
            viewport_height,
        }
    }

    /// Distance the container can actually scroll; never negative
    pub fn range(&self) -> f32 {
        let range = self.scroll_height - self.viewport_height;
        if range.is_finite() {
            range.max(0.0)
        } else {
            0.0
        }
    }

    pub fn progress(&self) -> f32 {
        let range = self.range();
        if range <= 0.0 || !self.offset.is_finite() {
            return 0.0;
        }
        (self.offset / range).clamp(0.0, 1.0)
    }
}

impl ScrollSource for ScrollMetrics {
    fn progress(&self) -> f32 {
        ScrollMetrics::progress(self)
    }
}

/// Host-side scroll container: turns wheel and key input into a clamped offset
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    metrics: ScrollMetrics,
}

impl ScrollTracker {
    pub fn new(scroll_height: f32, viewport_height: f32) -> Self {
        Self {
            metrics: ScrollMetrics::new(0.0, scroll_height, viewport_height),
        }
    }

    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    pub fn offset(&self) -> f32 {
        self.metrics.offset
    }

    pub fn scroll_to(&mut self, offset: f32) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.metrics.offset = offset.clamp(0.0, self.metrics.range());
    }

    pub fn scroll_by(&mut self, pixels: f32) {
        if pixels.is_finite() {
            self.scroll_to(self.metrics.offset + pixels);
        }
    }

    /// Positive lines scroll down the page
    pub fn scroll_lines(&mut self, lines: f32) {
        self.scroll_by(lines * LINE_HEIGHT);
    }

    /// Scroll by whole viewports, minus one line of overlap
    pub fn scroll_pages(&mut self, pages: f32) {
        let page = (self.metrics.viewport_height - LINE_HEIGHT).max(LINE_HEIGHT);
        self.scroll_by(pages * page);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0.0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.metrics.range());
    }

    /// Window resized; keep the offset inside the new range
    pub fn resize(&mut self, viewport_height: f32) {
        self.metrics.viewport_height = viewport_height.max(0.0);
        self.scroll_to(self.metrics.offset);
    }

    pub fn set_scroll_height(&mut self, scroll_height: f32) {
        self.metrics.scroll_height = scroll_height.max(0.0);
        self.scroll_to(self.metrics.offset);
    }
}

impl ScrollSource for ScrollTracker {
    fn progress(&self) -> f32 {
        self.metrics.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_offset_over_range() {
        let m = ScrollMetrics::new(250.0, 1500.0, 500.0);
        assert_eq!(m.progress(), 0.25);
    }

    #[test]
    fn no_scrollable_range_reads_zero() {
        assert_eq!(ScrollMetrics::new(100.0, 500.0, 500.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(100.0, 300.0, 500.0).progress(), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(ScrollMetrics::new(-40.0, 1500.0, 500.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(5000.0, 1500.0, 500.0).progress(), 1.0);
    }

    #[test]
    fn tracker_clamps_offset() {
        let mut t = ScrollTracker::new(2000.0, 600.0);
        t.scroll_by(-100.0);
        assert_eq!(t.offset(), 0.0);
        t.scroll_by(99_999.0);
        assert_eq!(t.offset(), 1400.0);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn resize_pulls_offset_back_in_range() {
        let mut t = ScrollTracker::new(2000.0, 600.0);
        t.scroll_to_bottom();
        t.resize(1000.0);
        assert_eq!(t.offset(), 1000.0);
        assert_eq!(t.progress(), 1.0);
    }
}
