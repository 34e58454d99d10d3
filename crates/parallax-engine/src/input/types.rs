use std::fmt;

/// Keyboard key identifier.
///
/// Only keys that drive page navigation are named; everything else maps to
/// `Key::Unknown(code)` with the platform code preserved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,

    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Modifier keys state.
///
/// Stored as booleans rather than bitflags to keep it explicit and stable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse wheel delta.
///
/// `Line` is notched-wheel input; `Pixel` is high-precision (trackpads) and is
/// already in logical pixels. Positive `y` means the wheel moved up/away from
/// the user, i.e. the page should scroll towards its top.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Converts to logical pixels, using `line_height` px per wheel line.
    pub fn to_pixels(self, line_height: f32) -> (f32, f32) {
        match self {
            MouseWheelDelta::Line { x, y } => (x * line_height, y * line_height),
            MouseWheelDelta::Pixel { x, y } => (x, y),
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
