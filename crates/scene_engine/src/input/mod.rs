//! Input state tracking
//!
//! The window layer forwards key and mouse events here; the
//! [`CameraController`] reads the held state once per frame.

pub mod camera_controller;

use std::collections::HashSet;

pub use camera_controller::{CameraController, CameraDeltas};

use crate::foundation::math::Vec2;

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    held_keys: HashSet<KeyCode>,
    held_buttons: HashSet<MouseButton>,
    cursor: Option<Vec2>,
    drag_delta: Vec2,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.held_buttons.insert(button);
        } else {
            self.held_buttons.remove(&button);
        }
    }

    /// Handle mouse movement; motion with the left button held accumulates as drag
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if let Some(previous) = self.cursor {
            if self.is_button_held(MouseButton::Left) {
                self.drag_delta += position - previous;
            }
        }
        self.cursor = Some(position);
    }

    /// Check if a key is currently held
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Check if a mouse button is currently held
    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.held_buttons.contains(&button)
    }

    /// +1 when `positive` is held, -1 for `negative`, 0 for both or neither
    pub fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        f32::from(u8::from(self.is_key_held(positive))) - f32::from(u8::from(self.is_key_held(negative)))
    }

    /// Drag accumulated since the last call, in pixels
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.drag_delta)
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held_keys.clear();
        self.held_buttons.clear();
        self.drag_delta = Vec2::zeros();
    }
}

/// Key codes used by the viewer bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum KeyCode {
    A,
    D,
    E,
    Q,
    S,
    W,
    X,
    Z,
    Up,
    Down,
    Left,
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::W, true);
        assert!(input.is_key_held(KeyCode::W));
        assert_eq!(input.axis(KeyCode::W, KeyCode::S), 1.0);
        input.handle_key_input(KeyCode::S, true);
        assert_eq!(input.axis(KeyCode::W, KeyCode::S), 0.0);
        input.handle_key_input(KeyCode::W, false);
        assert_eq!(input.axis(KeyCode::W, KeyCode::S), -1.0);
    }

    #[test]
    fn test_drag_only_with_left_button() {
        let mut input = InputManager::new();
        input.handle_mouse_move(10.0, 10.0);
        input.handle_mouse_move(20.0, 15.0);
        assert_eq!(input.take_mouse_delta(), Vec2::zeros());

        input.handle_mouse_button(MouseButton::Left, true);
        input.handle_mouse_move(25.0, 10.0);
        input.handle_mouse_move(30.0, 10.0);
        assert_eq!(input.take_mouse_delta(), Vec2::new(10.0, -5.0));
        assert_eq!(input.take_mouse_delta(), Vec2::zeros());
    }
}
