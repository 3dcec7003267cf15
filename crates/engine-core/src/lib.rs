//! engine-core: Core types and entry point for the GPU-backed 2D renderer.

use std::sync::Arc;

/// Re-export wgpu for downstream crates while avoiding direct dependency leakage.
pub use wgpu;

mod allocator;
pub use allocator::{BufKey, OwnedBuffer, OwnedTexture, RenderAllocator, TexKey};

/// Top-level engine handle.
pub struct GraphicsEngine {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    allocator: RenderAllocator,
}

impl GraphicsEngine {
    /// Initialize the engine with an existing device/queue.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self::from_shared(Arc::new(device), Arc::new(queue))
    }

    /// Initialize the engine with handles already shared with a window.
    pub fn from_shared(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let allocator = RenderAllocator::new(device.clone());
        Self { device, queue, allocator }
    }

    /// Get a clone of the device handle.
    pub fn device(&self) -> Arc<wgpu::Device> { self.device.clone() }

    /// Get a clone of the queue handle.
    pub fn queue(&self) -> Arc<wgpu::Queue> { self.queue.clone() }

    /// Access the allocator.
    pub fn allocator(&self) -> &RenderAllocator { &self.allocator }
    pub fn allocator_mut(&mut self) -> &mut RenderAllocator { &mut self.allocator }
}

/// Choose an sRGB surface format when available; otherwise, pick the first format.
pub fn choose_srgb_surface_format(adapter: &wgpu::Adapter, surface: &wgpu::Surface) -> wgpu::TextureFormat {
    let caps = surface.get_capabilities(adapter);
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .unwrap_or(caps.formats[0])
}

/// Create a surface configuration for the given size, favoring FIFO present mode when present.
pub fn make_surface_config(
    adapter: &wgpu::Adapter,
    surface: &wgpu::Surface,
    width: u32,
    height: u32,
) -> wgpu::SurfaceConfiguration {
    let caps = surface.get_capabilities(adapter);
    let format = choose_srgb_surface_format(adapter, surface);
    let present_mode = caps
        .present_modes
        .iter()
        .copied()
        .find(|m| *m == wgpu::PresentMode::Fifo)
        .unwrap_or(caps.present_modes[0]);
    let alpha_mode = caps
        .alpha_modes
        .iter()
        .copied()
        .find(|m| *m == wgpu::CompositeAlphaMode::Opaque)
        .unwrap_or(caps.alpha_modes[0]);
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 1,
    }
}

mod color;
mod display_list;
mod painter;
mod pass_manager;
mod pipeline;
mod scene;
mod upload;

pub use color::ColorParseError;
pub use display_list::*;
pub use painter::*;
pub use pass_manager::*;
pub use pipeline::*;
pub use scene::*;
pub use upload::*;
