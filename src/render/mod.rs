use thiserror::Error;

pub mod buffer;
pub mod mesh;
pub mod mesh_renderer;
pub mod render_manager;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod vertex;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to acquire surface texture: {0}")]
    SurfaceTexture(#[from] wgpu::SurfaceError),
    #[error("failed to create buffers for {label}: {source}")]
    BufferCreation { label: String, source: wgpu::Error },
}
