use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
pub struct OwnedTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub key: TexKey,
}

#[derive(Debug)]
pub struct OwnedBuffer {
    pub buffer: wgpu::Buffer,
    pub key: BufKey,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TexKey {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
    pub usage: wgpu::TextureUsages,
    pub sample_count: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BufKey {
    pub size: u64,
    pub usage: wgpu::BufferUsages,
}

/// Pools textures and buffers by exact descriptor so that geometry rebuilds
/// and per-frame render targets recycle GPU memory.
pub struct RenderAllocator {
    device: Arc<wgpu::Device>,
    texture_pool: HashMap<TexKey, Vec<wgpu::Texture>>,
    buffer_pool: HashMap<BufKey, Vec<wgpu::Buffer>>,
}

impl RenderAllocator {
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        Self {
            device,
            texture_pool: HashMap::new(),
            buffer_pool: HashMap::new(),
        }
    }

    pub fn allocate_texture(&mut self, key: TexKey) -> OwnedTexture {
        let entry = self.texture_pool.entry(key).or_default();
        let texture = entry.pop().unwrap_or_else(|| {
            self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("alloc:tex"),
                size: wgpu::Extent3d {
                    width: key.width,
                    height: key.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: key.sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: key.format,
                usage: key.usage,
                view_formats: &[],
            })
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        OwnedTexture { texture, view, key }
    }

    pub fn release_texture(&mut self, tex: OwnedTexture) {
        self.texture_pool
            .entry(tex.key)
            .or_default()
            .push(tex.texture);
    }

    pub fn allocate_buffer(&mut self, key: BufKey) -> OwnedBuffer {
        let entry = self.buffer_pool.entry(key).or_default();
        let buffer = entry.pop().unwrap_or_else(|| {
            log::trace!("allocating {} byte buffer ({:?})", key.size, key.usage);
            self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("alloc:buf"),
                size: key.size,
                usage: key.usage,
                mapped_at_creation: false,
            })
        });
        OwnedBuffer { buffer, key }
    }

    pub fn release_buffer(&mut self, buf: OwnedBuffer) {
        self.buffer_pool
            .entry(buf.key)
            .or_default()
            .push(buf.buffer);
    }

    /// Drop pooled textures, e.g. after a resize made every size stale.
    pub fn purge_textures(&mut self) {
        self.texture_pool.clear();
    }
}
