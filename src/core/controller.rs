/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
    Shift,
    /// Toggle mute
    KeyM,
    /// Toggle background music
    KeyB,
    /// Toggle the navigation menu
    KeyN,
    Escape,
    MouseLeft,
}

/// Controller - button states as seen by the frame update
pub trait Controller {
    /// Check if button is currently held
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently held buttons
    fn get_down_keys(&self) -> &[Button];

    /// Check if button went down since the last frame
    fn was_pressed(&self, button: Button) -> bool;
}
