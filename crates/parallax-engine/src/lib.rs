//! Parallax engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by higher layers:
//! the winit window loop, the wgpu device and surface, input normalisation,
//! frame timing, and a small retained 3D scene with its renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
