use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};
use crate::scroll::LINE_HEIGHT;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Currently held buttons
    held: HashSet<Button>,
    /// Held buttons in press order (for get_down_keys)
    held_vec: Vec<Button>,
    /// Buttons that went down since the last reset
    pressed: Vec<Button>,
    /// Current cursor position (relative to window)
    cursor: Option<(f32, f32)>,
    /// Wheel travel since last reset, in lines; positive scrolls down
    scroll_lines: f32,
}

impl WinitController {
    /// Create a new WinitController with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    self.set_button(Button::MouseLeft, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // Wheel up is positive in winit; page scroll runs the other way
                self.scroll_lines -= match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / LINE_HEIGHT,
                };
            }
            _ => {}
        }
    }

    fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.held.insert(button) {
                    self.held_vec.push(button);
                    self.pressed.push(button);
                }
            }
            ElementState::Released => {
                if self.held.remove(&button) {
                    self.held_vec.retain(|&b| b != button);
                }
            }
        }
    }

    /// Reset per-frame state (edges and wheel travel).
    /// Call this at the end of each frame after processing input
    pub fn reset_deltas(&mut self) {
        self.pressed.clear();
        self.scroll_lines = 0.0;
    }

    /// Drop everything held, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
        self.held_vec.clear();
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    pub fn scroll_lines(&self) -> f32 {
        self.scroll_lines
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::PageUp => Some(Button::PageUp),
            KeyCode::PageDown => Some(Button::PageDown),
            KeyCode::Home => Some(Button::Home),
            KeyCode::End => Some(Button::End),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::KeyM => Some(Button::KeyM),
            KeyCode::KeyB => Some(Button::KeyB),
            KeyCode::KeyN => Some(Button::KeyN),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.held_vec
    }

    fn was_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}
