//! Error types for the card application.
//!
//! The simulation core itself has no recoverable-error surface (bad spawn
//! input is defaulted, never rejected); errors only arise at the edges:
//! GPU/window setup and wish-jar persistence.

use std::fmt;

/// Errors that can occur while setting up the GPU presenter.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter(e) => write!(
                f,
                "No compatible GPU adapter found ({}). Ensure your system has Vulkan/Metal/DX12 support.",
                e
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors from wish-jar persistence.
#[derive(Debug)]
pub enum WishError {
    /// Failed to read or write the jar file.
    Io(std::io::Error),
    /// The jar file held malformed JSON.
    Json(serde_json::Error),
}

impl fmt::Display for WishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WishError::Io(e) => write!(f, "Failed to access wish jar file: {}", e),
            WishError::Json(e) => write!(f, "Wish jar file is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for WishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WishError::Io(e) => Some(e),
            WishError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for WishError {
    fn from(e: std::io::Error) -> Self {
        WishError::Io(e)
    }
}

impl From<serde_json::Error> for WishError {
    fn from(e: serde_json::Error) -> Self {
        WishError::Json(e)
    }
}

/// Errors that can occur when running the card application.
#[derive(Debug)]
pub enum CardError {
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// Wish jar could not be loaded or saved.
    Wishes(WishError),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            CardError::Gpu(e) => write!(f, "GPU error: {}", e),
            CardError::Wishes(e) => write!(f, "Wish jar error: {}", e),
        }
    }
}

impl std::error::Error for CardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CardError::EventLoop(e) => Some(e),
            CardError::Gpu(e) => Some(e),
            CardError::Wishes(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for CardError {
    fn from(e: winit::error::EventLoopError) -> Self {
        CardError::EventLoop(e)
    }
}

impl From<GpuError> for CardError {
    fn from(e: GpuError) -> Self {
        CardError::Gpu(e)
    }
}

impl From<WishError> for CardError {
    fn from(e: WishError) -> Self {
        CardError::Wishes(e)
    }
}
