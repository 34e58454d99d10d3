//! Window-space coordinate types.
//!
//! Canonical CPU space for input is logical pixels, origin top-left, +Y down.
//! 3D world space uses `glam` types directly (right-handed, +Y up).

mod viewport;

pub use viewport::Viewport;
