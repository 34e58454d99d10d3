//! The scroll-driven backdrop scene: configuration, construction and the
//! per-frame state machine. GPU work lives in the engine's renderers.

mod builder;
mod config;
mod state;

pub use builder::{build_scene, particle_positions};
pub use config::{SceneConfig, ShapeSpec};
pub use state::{approach, section_for, SceneState};
