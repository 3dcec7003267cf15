use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use crate::allocator::{BufKey, OwnedBuffer, RenderAllocator};
use crate::display_list::{Command, DisplayList};
use crate::scene::{Brush, Rect, Transform2D};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

/// Vertices per tessellated quad.
pub const QUAD_VERTICES: usize = 4;
/// Indices per tessellated quad.
pub const QUAD_INDICES: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("vertex rewrite of {got} vertices does not match the {expected} uploaded")]
    VertexCountMismatch { expected: u32, got: usize },
}

pub struct GpuScene {
    pub vertex: OwnedBuffer,
    pub index: OwnedBuffer,
    pub vertices: u32,
    pub indices: u32,
}

impl GpuScene {
    /// Overwrite the uploaded vertex data in place. The buffer is reused as is,
    /// so the vertex count must match the original upload.
    pub fn rewrite_vertices(&self, queue: &wgpu::Queue, vertices: &[Vertex]) -> Result<(), UploadError> {
        if vertices.len() != self.vertices as usize {
            return Err(UploadError::VertexCountMismatch {
                expected: self.vertices,
                got: vertices.len(),
            });
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.vertex.buffer, 0, bytemuck::cast_slice(vertices));
        }
        Ok(())
    }

    /// Hand both buffers back to the allocator pool.
    pub fn release(self, allocator: &mut RenderAllocator) {
        allocator.release_buffer(self.vertex);
        allocator.release_buffer(self.index);
    }
}

/// CPU-side triangle data ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tessellation {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Tessellation {
    pub fn with_quad_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * QUAD_VERTICES),
            indices: Vec::with_capacity(quads * QUAD_INDICES),
        }
    }

    /// Append a transformed rectangle as two triangles.
    pub fn push_rect(&mut self, rect: Rect, color: [f32; 4], t: Transform2D) {
        debug_assert!(
            self.vertices.len() + QUAD_VERTICES <= u32::MAX as usize,
            "vertex index overflow"
        );
        let base = self.vertices.len() as u32;
        for p in rect.corners() {
            self.vertices.push(Vertex {
                pos: t.apply(p),
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / QUAD_VERTICES
    }
}

/// Tessellate every solid rect of a display list, in command order.
pub fn tessellate_display_list(list: &DisplayList) -> Tessellation {
    let mut out = Tessellation::with_quad_capacity(list.draw_count());
    for cmd in &list.commands {
        match cmd {
            Command::DrawRect {
                rect,
                brush: Brush::Solid(col),
                transform,
                ..
            } => out.push_rect(*rect, col.to_array(), *transform),
            // Draw commands already carry their composed transform.
            Command::PushTransform(_) | Command::PopTransform => {}
        }
    }
    out
}

/// Allocate GPU buffers for `tess` and upload its contents.
pub fn upload_tessellation(
    allocator: &mut RenderAllocator,
    queue: &wgpu::Queue,
    tess: &Tessellation,
) -> Result<GpuScene> {
    let vsize = (tess.vertices.len() * std::mem::size_of::<Vertex>()) as u64;
    let isize = (tess.indices.len() * std::mem::size_of::<u32>()) as u64;
    let vbuf = allocator.allocate_buffer(BufKey {
        size: vsize.max(4),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let ibuf = allocator.allocate_buffer(BufKey {
        size: isize.max(4),
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
    });
    if vsize > 0 {
        queue.write_buffer(&vbuf.buffer, 0, bytemuck::cast_slice(&tess.vertices));
    }
    if isize > 0 {
        queue.write_buffer(&ibuf.buffer, 0, bytemuck::cast_slice(&tess.indices));
    }

    Ok(GpuScene {
        vertex: vbuf,
        index: ibuf,
        vertices: tess.vertices.len() as u32,
        indices: tess.indices.len() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::Viewport;
    use crate::painter::Painter;
    use crate::scene::ColorLinPremul;

    #[test]
    fn rect_becomes_two_triangles() {
        let mut tess = Tessellation::default();
        tess.push_rect(Rect::new(0.0, 0.0, 2.0, 1.0), [1.0; 4], Transform2D::identity());
        tess.push_rect(Rect::new(5.0, 5.0, 1.0, 1.0), [1.0; 4], Transform2D::identity());
        assert_eq!(tess.quad_count(), 2);
        assert_eq!(&tess.indices[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(tess.vertices[2].pos, [2.0, 1.0]);
    }

    #[test]
    fn display_list_tessellation_uses_command_transform() {
        let mut p = Painter::begin_frame(Viewport { width: 100, height: 100 });
        p.push_transform(Transform2D::uniform_scale(10.0));
        p.rect(Rect::new(1.0, 1.0, 1.0, 1.0), Brush::Solid(ColorLinPremul::BLACK), 0);
        p.pop_transform();
        let tess = tessellate_display_list(&p.finish());
        assert_eq!(tess.vertices.len(), 4);
        assert_eq!(tess.vertices[0].pos, [10.0, 10.0]);
        assert_eq!(tess.vertices[2].pos, [20.0, 20.0]);
        assert_eq!(tess.vertices[0].color, [0.0, 0.0, 0.0, 1.0]);
    }
}
