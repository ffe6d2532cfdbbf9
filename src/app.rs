//! Window-independent app state: everything the frame loop updates,
//! driven by a [`Controller`] so it can be exercised without a window.

use glam::Vec2;

use crate::config::AppConfig;
use crate::core::{Button, Controller, Countdown, Throttled};
use crate::effects::Terminal;
use crate::motion::{pulse, FlightController, Turntable};
use crate::render::{HudAction, HudModel, SceneFrame};
use crate::scroll::{ScrollSource, ScrollTracker};
use crate::state::{AudioSink, AudioState, Clip, LogSink, PageLayout, PortfolioState, Section};

/// Fraction of the viewport below its top edge used for the scroll spy
const SPY_LINE: f32 = 0.3;

pub struct AppState {
    layout: PageLayout,
    scroll: ScrollTracker,
    flight: FlightController,
    turntable: Turntable,
    audio: AudioState<LogSink>,
    portfolio: PortfolioState,
    terminal: Terminal,
    loading: Countdown,
    /// Seconds since the loading screen closed
    since_loaded: f32,
    fps: f32,
    fps_window: Throttled,
    fps_frames: u32,
    fps_time: f32,
}

impl AppState {
    pub fn new(config: &AppConfig, viewport_height: f32) -> Self {
        let layout = config.page.resolve();
        let scroll = ScrollTracker::new(layout.total_height(), viewport_height);

        let mut audio = AudioState::new(LogSink::new());
        audio.set_background_music(Clip::new("background-music.mp3", 0.5).looping());
        audio.set_hit_sound(Clip::new("hit.mp3", 0.3));
        audio.set_success_sound(Clip::new("success.mp3", 0.5));

        Self {
            layout,
            scroll,
            flight: FlightController::new(config.flight),
            turntable: Turntable::new(config.turntable),
            audio,
            portfolio: PortfolioState::new(),
            terminal: Terminal::new(),
            loading: Countdown::started(config.loading_seconds),
            since_loaded: 0.0,
            fps: 0.0,
            fps_window: Throttled::new(0.5),
            fps_frames: 0,
            fps_time: 0.0,
        }
    }

    /// Advance one frame. `wheel_lines` is wheel travel since the last frame.
    pub fn update<C: Controller>(
        &mut self,
        input: &C,
        wheel_lines: f32,
        elapsed: f32,
        delta: f32,
    ) -> SceneFrame {
        self.track_fps(delta);

        if self.loading.tick(delta) {
            log::info!("loading finished after {:.1}s", elapsed);
            self.audio.play_success();
        } else if !self.loading.is_active() && delta.is_finite() && delta > 0.0 {
            self.since_loaded += delta;
        }

        self.handle_keys(input);
        self.scroll.scroll_lines(wheel_lines);

        let offset = self.scroll.offset();
        let viewport = self.scroll.metrics().viewport_height;
        let section = self.layout.section_at(offset + viewport * SPY_LINE);
        if section != self.portfolio.current_section() {
            log::debug!("entered section {section}");
            self.portfolio.set_current_section(section);
        }

        let progress = self.scroll.progress();
        let flight = self.flight.step(progress, elapsed, delta);
        self.turntable.update(delta);
        if section == Section::Hero && !self.loading.is_active() {
            self.terminal.update(delta);
        }

        SceneFrame {
            flight,
            turntable: Vec2::new(self.turntable.pitch(), self.turntable.yaw()),
            glow: pulse(elapsed),
            scroll_pages: if viewport > 0.0 { offset / viewport } else { 0.0 },
            progress,
            loading: self.loading.is_active().then(|| self.loading.progress()),
            revealed: self.since_loaded,
        }
    }

    fn handle_keys<C: Controller>(&mut self, input: &C) {
        let shift = input.is_down(Button::Shift);

        if input.was_pressed(Button::ArrowDown) {
            self.scroll.scroll_lines(1.0);
        }
        if input.was_pressed(Button::ArrowUp) {
            self.scroll.scroll_lines(-1.0);
        }
        if input.was_pressed(Button::PageDown) {
            self.scroll.scroll_pages(1.0);
        }
        if input.was_pressed(Button::PageUp) {
            self.scroll.scroll_pages(-1.0);
        }
        if input.was_pressed(Button::Space) {
            self.scroll.scroll_pages(if shift { -1.0 } else { 1.0 });
        }
        if input.was_pressed(Button::Home) {
            self.scroll.scroll_to_top();
        }
        if input.was_pressed(Button::End) {
            self.scroll.scroll_to_bottom();
        }

        if input.was_pressed(Button::KeyM) {
            self.apply(HudAction::ToggleMute);
        }
        if input.was_pressed(Button::KeyB) {
            self.apply(HudAction::ToggleMusic);
        }
        if input.was_pressed(Button::KeyN) {
            self.apply(HudAction::ToggleNav);
        }
    }

    pub fn apply(&mut self, action: HudAction) {
        match action {
            HudAction::ToggleMute => {
                self.audio.toggle_mute();
                if !self.audio.is_muted() {
                    self.audio.play_all();
                } else if self.music_playing() {
                    self.audio.toggle_background_music();
                }
                self.audio.play_hit();
            }
            HudAction::ToggleMusic => self.audio.toggle_background_music(),
            HudAction::ToggleNav => self.portfolio.toggle_nav(),
            HudAction::Jump(section) => {
                self.audio.play_hit();
                if let Some(anchor) = self.layout.anchor(section) {
                    self.scroll.scroll_to(anchor);
                }
                self.portfolio.set_current_section(section);
                self.portfolio.close_nav();
            }
        }
    }

    /// Grab the turntable when the press lands on it
    pub fn pointer_pressed(&mut self, pointer: Vec2, viewer: Option<(Vec2, f32)>) {
        let Some((center, radius)) = viewer else {
            return;
        };
        if pointer.distance(center) <= radius && self.turntable.pointer_down(pointer.x, pointer.y) {
            self.audio.play_hit();
        }
    }

    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.turntable.pointer_move(pointer.x, pointer.y);
    }

    pub fn pointer_released(&mut self) {
        self.turntable.pointer_up();
    }

    pub fn resize(&mut self, viewport_height: f32) {
        self.scroll.resize(viewport_height);
    }

    pub fn hud_model(&self) -> HudModel {
        let state = self.flight.state();
        HudModel {
            fps: self.fps,
            progress: self.scroll.progress(),
            section: self.portfolio.current_section(),
            position: state.position,
            velocity: state.velocity,
            muted: self.audio.is_muted(),
            music_playing: self.music_playing(),
            nav_open: self.portfolio.is_nav_open(),
            terminal: self.terminal.text().to_string(),
            install_percentage: self.terminal.installer().map(|t| t.percentage()),
        }
    }

    fn music_playing(&self) -> bool {
        self.audio
            .background_music()
            .is_some_and(|clip| !self.audio.sink().is_paused(clip))
    }

    /// Stop the flight controller; later frames keep the final pose
    pub fn shutdown(&mut self) {
        self.flight.teardown();
    }

    fn track_fps(&mut self, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }
        self.fps_frames += 1;
        self.fps_time += delta;
        if self.fps_window.try_tick(delta) {
            self.fps = self.fps_frames as f32 / self.fps_time;
            self.fps_frames = 0;
            self.fps_time = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn scroll(&self) -> &ScrollTracker {
        &self.scroll
    }

    pub fn flight(&self) -> &FlightController {
        &self.flight
    }

    pub fn turntable(&self) -> &Turntable {
        &self.turntable
    }

    pub fn audio(&self) -> &AudioState<LogSink> {
        &self.audio
    }

    pub fn portfolio(&self) -> &PortfolioState {
        &self.portfolio
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::TurntableMode;
    use crate::state::SinkEvent;

    #[derive(Default)]
    struct Keys {
        held: Vec<Button>,
        pressed: Vec<Button>,
    }

    impl Controller for Keys {
        fn is_down(&self, button: Button) -> bool {
            self.held.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.held
        }

        fn was_pressed(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }
    }

    fn pressed(buttons: &[Button]) -> Keys {
        Keys {
            held: buttons.to_vec(),
            pressed: buttons.to_vec(),
        }
    }

    fn app() -> AppState {
        AppState::new(&AppConfig::default(), 800.0)
    }

    #[test]
    fn loading_screen_then_scene() {
        let mut app = app();
        let frame = app.update(&Keys::default(), 0.0, 0.0, 0.0);
        assert!(frame.loading.is_some());

        let mut t = 0.0;
        for _ in 0..200 {
            t += 1.0 / 60.0;
            app.update(&Keys::default(), 0.0, t, 1.0 / 60.0);
        }
        assert!(!app.is_loading());
    }

    #[test]
    fn end_key_reaches_contact() {
        let mut app = app();
        let frame = app.update(&pressed(&[Button::End]), 0.0, 0.0, 1.0 / 60.0);
        assert_eq!(frame.progress, 1.0);
        assert_eq!(app.portfolio().current_section(), Section::Contact);
    }

    #[test]
    fn wheel_scrolls_down() {
        let mut app = app();
        app.update(&Keys::default(), 3.0, 0.0, 1.0 / 60.0);
        assert_eq!(app.scroll().offset(), 120.0);
    }

    #[test]
    fn nav_jump_closes_menu() {
        let mut app = app();
        app.apply(HudAction::ToggleNav);
        assert!(app.portfolio().is_nav_open());
        app.apply(HudAction::Jump(Section::Projects));
        assert!(!app.portfolio().is_nav_open());
        assert_eq!(app.scroll().offset(), 1700.0);
    }

    #[test]
    fn mute_key_unmutes_and_starts_music() {
        let mut app = app();
        app.update(&pressed(&[Button::KeyM]), 0.0, 0.0, 1.0 / 60.0);
        assert!(!app.audio().is_muted());
        let music = app.audio().background_music().unwrap();
        assert!(!app.audio().sink().is_paused(music));
        assert!(app.hud_model().music_playing);

        app.apply(HudAction::ToggleMute);
        assert!(app.audio().is_muted());
        assert!(!app.hud_model().music_playing);
    }

    fn hits(app: &AppState) -> usize {
        app.audio()
            .sink()
            .events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Played { clip, .. } if clip == "hit.mp3"))
            .count()
    }

    #[test]
    fn nav_and_mute_clicks_play_hit() {
        let mut app = app();
        // muted: clicks stay silent
        app.apply(HudAction::Jump(Section::About));
        assert_eq!(hits(&app), 0);

        app.apply(HudAction::ToggleMute);
        assert_eq!(hits(&app), 1);
        app.apply(HudAction::Jump(Section::Projects));
        assert_eq!(hits(&app), 2);

        // muting silences its own click
        app.apply(HudAction::ToggleMute);
        assert_eq!(hits(&app), 2);
    }

    #[test]
    fn reveal_clock_starts_after_loading() {
        let mut app = app();
        let mut t = 0.0;
        let mut frame = app.update(&Keys::default(), 0.0, t, 1.0 / 60.0);
        assert_eq!(frame.revealed, 0.0);
        while frame.loading.is_some() {
            t += 1.0 / 60.0;
            frame = app.update(&Keys::default(), 0.0, t, 1.0 / 60.0);
        }
        assert_eq!(frame.revealed, 0.0);
        for _ in 0..30 {
            frame = app.update(&Keys::default(), 0.0, t, 1.0 / 60.0);
        }
        assert!((frame.revealed - 0.5).abs() < 1e-4);
    }

    #[test]
    fn press_outside_viewer_is_ignored() {
        let mut app = app();
        let viewer = Some((Vec2::new(500.0, 300.0), 50.0));
        app.pointer_pressed(Vec2::new(10.0, 10.0), viewer);
        assert_eq!(app.turntable().mode(), TurntableMode::AutoRotating);

        app.pointer_pressed(Vec2::new(510.0, 300.0), viewer);
        assert!(matches!(app.turntable().mode(), TurntableMode::Dragging { .. }));
        app.pointer_released();
        assert_eq!(app.turntable().mode(), TurntableMode::Coasting);
    }

    #[test]
    fn shutdown_freezes_flight() {
        let mut app = app();
        app.update(&Keys::default(), 0.0, 0.0, 1.0 / 60.0);
        app.shutdown();
        let before = app.flight().state().position;
        app.update(&pressed(&[Button::End]), 0.0, 1.0, 1.0 / 60.0);
        assert_eq!(app.flight().state().position, before);
        assert!(!app.flight().is_active());
    }
}
