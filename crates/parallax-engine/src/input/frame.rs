use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Logical pixels scrolled per notched wheel line.
pub const WHEEL_LINE_HEIGHT: f32 = 40.0;

/// Per-frame input deltas.
///
/// `InputState` tracks what is held; `InputFrame` collects the events, newly
/// pressed keys and wheel movement of the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,

    /// Wheel movement accumulated this frame, in logical pixels.
    /// Positive `y` scrolls towards the top of the page.
    pub scroll_delta: (f32, f32),
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.scroll_delta = (0.0, 0.0);
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
