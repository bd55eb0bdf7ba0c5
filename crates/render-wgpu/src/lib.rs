//! wgpu render backend for the tile grid.
//!
//! Draws each tile as an unlit solid box with its twelve edges on top, using
//! two instanced pipelines over one shared cube. The camera orbits a target
//! point under pointer control.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - Camera motion is independent of the tile animation clock.

mod camera;
mod context;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use context::GpuContext;
pub use gpu::TileRenderer;

/// GPU setup or presentation failed.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

pub fn crate_info() -> &'static str {
    "tileflip-render-wgpu v0.1.0"
}
