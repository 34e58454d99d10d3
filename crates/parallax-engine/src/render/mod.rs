//! GPU rendering subsystem.
//!
//! Renderers consume the retained [`crate::scene::Scene`] and issue GPU
//! commands via wgpu. Each renderer is responsible for its own GPU resources
//! (pipelines, buffers, textures) and creates them lazily on first use.
//!
//! Convention:
//! - world space is right-handed, +Y up, camera looking down -Z.
//! - every pass depth-tests against the shared `Depth32Float` target.

mod ctx;
pub mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
