// Input state tracking for keyboard and mouse
// Abstracts winit events into a queryable per-frame snapshot

use std::collections::HashSet;
use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::locomotion::PlayerInput;

// Key bindings
pub const KEY_FORWARD: KeyCode = KeyCode::KeyW;
pub const KEY_BACKWARD: KeyCode = KeyCode::KeyS;
pub const KEY_LEFT: KeyCode = KeyCode::KeyA;
pub const KEY_RIGHT: KeyCode = KeyCode::KeyD;
/// Jump while walking, ascend in noclip.
pub const KEY_JUMP: KeyCode = KeyCode::Space;
pub const KEY_DESCEND: KeyCode = KeyCode::ShiftLeft;
pub const KEY_SPRINT: KeyCode = KeyCode::ControlLeft;
pub const KEY_TOGGLE_NOCLIP: KeyCode = KeyCode::KeyV;
pub const KEY_MENU: KeyCode = KeyCode::Escape;
pub const KEY_CURSOR_LOCK: KeyCode = KeyCode::Tab;
pub const KEY_DEBUG_OVERLAY: KeyCode = KeyCode::F3;
pub const KEY_WINDOW_MODE: KeyCode = KeyCode::F11;

pub struct InputState {
    // Keyboard
    keys_held: HashSet<KeyCode>,
    // Went down since the last end_frame(); OS key repeat excluded
    keys_pressed: HashSet<KeyCode>,

    // Raw mouse motion accumulated this frame, reset in end_frame()
    pub mouse_delta: Vec2,

    pub window_size: (u32, u32),

    // Device events keep arriving while another app has focus
    focused: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            window_size: (0, 0),
            focused: true,
        }
    }

    /// Feed a winit WindowEvent into the input state.
    /// Call this once per event before the game's own event handling.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed, event.repeat);
                }
            }
            WindowEvent::Resized(size) => {
                self.window_size = (size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    // Releases are lost while unfocused
                    self.keys_held.clear();
                    self.mouse_delta = Vec2::ZERO;
                }
            }
            _ => {}
        }
    }

    /// Raw mouse motion; unaffected by cursor grab or window edges.
    /// Ignored while the window is unfocused.
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if !self.focused {
            return;
        }
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
        }
    }

    fn set_key(&mut self, key: KeyCode, down: bool, repeat: bool) {
        if down {
            if !repeat && self.keys_held.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else {
            self.keys_held.remove(&key);
        }
    }

    /// Call once per frame after update() and render() have consumed input.
    /// Resets per-frame accumulators.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Snapshot for the player controller.
    pub fn player_input(&self) -> PlayerInput {
        PlayerInput {
            forward: self.is_key_held(KEY_FORWARD),
            backward: self.is_key_held(KEY_BACKWARD),
            left: self.is_key_held(KEY_LEFT),
            right: self.is_key_held(KEY_RIGHT),
            up: self.is_key_held(KEY_JUMP),
            down: self.is_key_held(KEY_DESCEND),
            sprint: self.is_key_held(KEY_SPRINT),
            jump: self.was_pressed(KEY_JUMP),
            toggle_mode: self.was_pressed(KEY_TOGGLE_NOCLIP),
            mouse_delta: self.mouse_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_edge_triggered() {
        let mut input = InputState::new();
        input.set_key(KEY_JUMP, true, false);
        assert!(input.player_input().jump);
        assert!(input.player_input().up);

        input.end_frame();
        // Still held, but no longer "pressed this frame"
        assert!(!input.player_input().jump);
        assert!(input.player_input().up);

        // OS key repeat does not re-trigger
        input.set_key(KEY_JUMP, true, true);
        assert!(!input.player_input().jump);

        input.set_key(KEY_JUMP, false, false);
        input.end_frame();
        input.set_key(KEY_JUMP, true, false);
        assert!(input.player_input().jump);
    }

    #[test]
    fn held_movement_keys_map_to_intents() {
        let mut input = InputState::new();
        input.set_key(KEY_FORWARD, true, false);
        input.set_key(KEY_LEFT, true, false);
        input.set_key(KEY_SPRINT, true, false);
        let snapshot = input.player_input();
        assert!(snapshot.forward && snapshot.left && snapshot.sprint);
        assert!(!snapshot.backward && !snapshot.right && !snapshot.down);
        assert!(!snapshot.toggle_mode);
    }

    #[test]
    fn unfocused_window_ignores_mouse_motion() {
        let mut input = InputState::new();
        input.set_key(KEY_FORWARD, true, false);
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (4.0, 0.0) });

        input.process_event(&WindowEvent::Focused(false));
        assert!(!input.is_focused());
        assert!(!input.player_input().forward);
        assert_eq!(input.player_input().mouse_delta, Vec2::ZERO);

        // Motion made in another app never reaches the camera
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (250.0, -80.0) });
        assert_eq!(input.player_input().mouse_delta, Vec2::ZERO);

        input.process_event(&WindowEvent::Focused(true));
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (2.0, 1.0) });
        assert_eq!(input.player_input().mouse_delta, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn mouse_motion_accumulates_until_end_frame() {
        let mut input = InputState::new();
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (3.0, -1.0) });
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (2.0, 4.0) });
        assert_eq!(input.player_input().mouse_delta, Vec2::new(5.0, 3.0));
        input.end_frame();
        assert_eq!(input.player_input().mouse_delta, Vec2::ZERO);
    }
}
