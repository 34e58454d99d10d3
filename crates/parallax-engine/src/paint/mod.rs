//! Color model shared between the page layer and renderers.

pub mod color;

pub use color::Color;
