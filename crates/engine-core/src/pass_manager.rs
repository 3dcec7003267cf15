use std::sync::Arc;

use crate::allocator::{RenderAllocator, TexKey};
use crate::pipeline::BasicSolidRenderer;
use crate::upload::GpuScene;

/// Owns the solid pipeline and per-frame uniforms and records the frame's
/// render pass (optionally multisampled, resolving into the surface).
pub struct PassManager {
    device: Arc<wgpu::Device>,
    solid: BasicSolidRenderer,
    surface_format: wgpu::TextureFormat,
    sample_count: u32,
    vp_buffer: wgpu::Buffer,
    vp_bind_group: wgpu::BindGroup,
}

impl PassManager {
    pub fn new(device: Arc<wgpu::Device>, target_format: wgpu::TextureFormat, sample_count: u32) -> Self {
        let sample_count = effective_sample_count(sample_count);
        let solid = BasicSolidRenderer::new(device.clone(), target_format, sample_count);
        let vp_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("viewport-uniform"),
            size: 16,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let vp_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vp-bg"),
            layout: solid.viewport_bgl(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: vp_buffer.as_entire_binding(),
            }],
        });
        Self {
            device,
            solid,
            surface_format: target_format,
            sample_count,
            vp_buffer,
            vp_bind_group,
        }
    }

    /// Expose the device for callers that need to create resources.
    pub fn device(&self) -> Arc<wgpu::Device> {
        self.device.clone()
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Clear the surface and draw `scene` (if any) over it.
    #[allow(clippy::too_many_arguments)]
    pub fn render_frame(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        allocator: &mut RenderAllocator,
        surface_view: &wgpu::TextureView,
        width: u32,
        height: u32,
        scene: Option<&GpuScene>,
        clear: wgpu::Color,
        queue: &wgpu::Queue,
    ) {
        let vp_data = viewport_uniform(width, height);
        queue.write_buffer(&self.vp_buffer, 0, bytemuck::bytes_of(&vp_data));

        let msaa = (self.sample_count > 1).then(|| {
            allocator.allocate_texture(TexKey {
                width: width.max(1),
                height: height.max(1),
                format: self.surface_format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                sample_count: self.sample_count,
            })
        });
        let (view, resolve_target) = match &msaa {
            Some(tex) => (&tex.view, Some(surface_view)),
            None => (surface_view, None),
        };
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("solid-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            if let Some(scene) = scene {
                self.solid.record(&mut pass, &self.vp_bind_group, scene);
            }
        }
        // Return the multisample target to the pool to avoid per-frame allocations.
        if let Some(tex) = msaa {
            allocator.release_texture(tex);
        }
    }
}

/// Multisample count actually used for a requested one. Only 1x and 4x are
/// guaranteed across backends: 4 or more gives 4, anything lower gives 1.
pub fn effective_sample_count(requested: u32) -> u32 {
    if requested >= 4 { 4 } else { 1 }
}

/// Map y-down pixel coordinates to NDC: `[scale.x, scale.y, translate.x, translate.y]`.
pub fn viewport_uniform(width: u32, height: u32) -> [f32; 4] {
    [
        2.0f32 / (width.max(1) as f32),
        -2.0f32 / (height.max(1) as f32),
        -1.0,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_uniform_maps_corners_to_ndc() {
        let [sx, sy, tx, ty] = viewport_uniform(200, 100);
        assert_eq!([0.0 * sx + tx, 0.0 * sy + ty], [-1.0, 1.0]);
        assert_eq!([200.0 * sx + tx, 100.0 * sy + ty], [1.0, -1.0]);
    }

    #[test]
    fn sample_count_is_one_or_four() {
        assert_eq!(effective_sample_count(0), 1);
        assert_eq!(effective_sample_count(1), 1);
        assert_eq!(effective_sample_count(2), 1);
        assert_eq!(effective_sample_count(3), 1);
        assert_eq!(effective_sample_count(4), 4);
        assert_eq!(effective_sample_count(8), 4);
    }

    #[test]
    fn viewport_uniform_survives_zero_size() {
        let vp = viewport_uniform(0, 0);
        assert!(vp.iter().all(|v| v.is_finite()));
    }
}
