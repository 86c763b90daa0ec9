use std::collections::HashSet;

// Re-export the winit key/button enums so downstream crates don't have to
// depend on winit just for these types.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Keyboard and mouse state for the current moment.
///
/// The runner feeds winit events into this structure; the control panel and
/// the app read it through the query helpers.
#[derive(Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
    mouse_pos: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_pos = (x, y);
    }

    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_key_pressed(KeyCode::Escape));
        state.update_key(KeyCode::Escape, true);
        assert!(state.is_key_pressed(KeyCode::Escape));
        state.update_key(KeyCode::Escape, false);
        assert!(!state.is_key_pressed(KeyCode::Escape));
    }

    #[test]
    fn mouse_tracking() {
        let mut state = InputState::new();
        state.update_mouse_button(MouseButton::Left, true);
        assert!(state.is_button_down(MouseButton::Left));
        state.set_mouse_position(10.0, 20.0);
        assert_eq!(state.mouse_position(), (10.0, 20.0));
    }
}
