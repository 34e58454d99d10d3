//! 3D mesh renderers.
//!
//! - [`ToonRenderer`]: indexed meshes, banded by a gradient-map lookup
//! - [`PointsRenderer`]: instanced camera-facing sprites
//! - [`SceneRenderer`]: both, in order, for a [`crate::scene::Scene`]

mod common;
mod points;
mod renderer;
mod toon;

pub use points::PointsRenderer;
pub use renderer::SceneRenderer;
pub use toon::ToonRenderer;
