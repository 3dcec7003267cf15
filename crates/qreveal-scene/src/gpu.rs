use anyhow::Result;
use engine_core::{GpuScene, RenderAllocator, upload_tessellation, wgpu};

use crate::item::{PaintUpdate, QrCodeItem};

/// GPU copy of a [`QrCodeItem`]'s geometry.
///
/// Buffers are allocated only on [`PaintUpdate::Rebuilt`]; animation frames
/// write the existing vertex buffer.
#[derive(Default)]
pub struct GpuRevealScene {
    scene: Option<GpuScene>,
}

impl GpuRevealScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(
        &mut self,
        item: &QrCodeItem,
        update: PaintUpdate,
        allocator: &mut RenderAllocator,
        queue: &wgpu::Queue,
    ) -> Result<()> {
        match update {
            PaintUpdate::Rebuilt => self.reupload(item, allocator, queue),
            PaintUpdate::Animated => {
                if let (Some(scene), Some(geometry)) = (&self.scene, item.geometry()) {
                    scene.rewrite_vertices(queue, geometry.vertices())?;
                }
                Ok(())
            }
            PaintUpdate::Unchanged => Ok(()),
        }
    }

    /// Drop the current buffers and upload the item's geometry from scratch.
    pub fn reupload(
        &mut self,
        item: &QrCodeItem,
        allocator: &mut RenderAllocator,
        queue: &wgpu::Queue,
    ) -> Result<()> {
        if let Some(old) = self.scene.take() {
            old.release(allocator);
        }
        if let Some(geometry) = item.geometry().filter(|g| !g.is_empty()) {
            self.scene = Some(upload_tessellation(allocator, queue, geometry.tessellation())?);
        }
        Ok(())
    }

    pub fn scene(&self) -> Option<&GpuScene> {
        self.scene.as_ref()
    }
}
