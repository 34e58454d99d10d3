//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) at a pixel-ratio-capped size
//! - owning the depth target that matches the surface
//! - acquiring frames and providing encoders/views for rendering

mod depth;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use depth::DepthTarget;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::drawable_size;
