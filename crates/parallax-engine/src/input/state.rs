use std::collections::HashSet;

use super::frame::{InputFrame, WHEEL_LINE_HEIGHT};
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current input state for a single window.
///
/// Holds the modifier state and held keys, so a key held down with
/// auto-repeat registers as pressed only once. Per-frame transitions are
/// recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(false) => {
                // Focus loss can swallow releases; drop held keys so nothing sticks.
                self.keys_down.clear();
            }

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                let (dx, dy) = delta.to_pixels(WHEEL_LINE_HEIGHT);
                frame.scroll_delta.0 += dx;
                frame.scroll_delta.1 += dy;
            }

            InputEvent::Focused(true) | InputEvent::PointerMoved(_) | InputEvent::PointerLeft => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), code: 0, repeat: false }
    }

    #[test]
    fn wheel_lines_accumulate_as_pixels() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let wheel = |y| InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y },
            modifiers: Modifiers::default(),
        };
        state.apply_event(&mut frame, wheel(-1.0));
        state.apply_event(&mut frame, wheel(-2.0));
        assert_eq!(frame.scroll_delta, (0.0, -3.0 * WHEEL_LINE_HEIGHT));

        frame.clear();
        assert_eq!(frame.scroll_delta, (0.0, 0.0));
    }

    #[test]
    fn key_press_recorded_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::PageDown, KeyState::Pressed));
        assert!(frame.keys_pressed.contains(&Key::PageDown));

        frame.clear();
        state.apply_event(&mut frame, key(Key::PageDown, KeyState::Pressed));
        assert!(frame.keys_pressed.is_empty());

        state.apply_event(&mut frame, key(Key::PageDown, KeyState::Released));
        state.apply_event(&mut frame, key(Key::PageDown, KeyState::Pressed));
        assert!(frame.keys_pressed.contains(&Key::PageDown));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        frame.clear();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(frame.keys_pressed.contains(&Key::Space));
    }
}
