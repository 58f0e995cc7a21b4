//! Draw submission.
//!
//! The renderer talks to a [`Batcher`]; [`PolygonBatcher`] is a CPU-side
//! implementation that merges consecutive draws sharing a texture and blend
//! function into [`Batch`]es ready for upload.

use wgpu::util::DeviceExt;
use wgpu::{BlendFactor, Buffer, BufferUsages, Device};

use crate::attachment::TextureId;
use crate::renderer::blend::BlendFactors;
use crate::renderer::vertex::VertexLayout;

pub trait Batcher {
    /// Switch the blend function for subsequent draws.
    fn set_blend_mode(&mut self, src: BlendFactor, dst: BlendFactor);

    /// Queue a triangle list. `vertices` is interleaved in the renderer's
    /// vertex layout and `indices` are relative to its first vertex.
    fn draw(&mut self, texture: TextureId, vertices: &[f32], indices: &[u16]);
}

/// A run of draws sharing texture and blend function.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: TextureId,
    pub blend: BlendFactors,
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
}

impl Batch {
    pub fn vertex_count(&self, layout: VertexLayout) -> usize {
        self.vertices.len() / layout.floats_per_vertex()
    }

    /// Upload this batch into fresh vertex and index buffers.
    pub fn create_buffers(&self, device: &Device) -> (Buffer, Buffer) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Skeleton Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Skeleton Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: BufferUsages::INDEX,
        });
        (vertex_buffer, index_buffer)
    }
}

/// Largest vertex count a single batch may address with `u16` indices.
pub const MAX_BATCH_VERTICES: usize = u16::MAX as usize + 1;

#[derive(Debug)]
pub struct PolygonBatcher {
    layout: VertexLayout,
    blend: BlendFactors,
    max_vertices: usize,
    current: Option<Batch>,
    batches: Vec<Batch>,
}

impl PolygonBatcher {
    pub fn new(layout: VertexLayout) -> Self {
        Self::with_max_vertices(layout, MAX_BATCH_VERTICES)
    }

    /// Limit batches to `max_vertices` vertices (clamped to the `u16` range).
    pub fn with_max_vertices(layout: VertexLayout, max_vertices: usize) -> Self {
        Self {
            layout,
            blend: BlendFactors::default(),
            max_vertices: max_vertices.min(MAX_BATCH_VERTICES),
            current: None,
            batches: Vec::new(),
        }
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Discard all queued batches and reset the blend function.
    pub fn begin(&mut self) {
        self.current = None;
        self.batches.clear();
        self.blend = BlendFactors::default();
    }

    /// Close the open batch and hand out everything queued since `begin`.
    pub fn end(&mut self) -> Vec<Batch> {
        self.flush();
        std::mem::take(&mut self.batches)
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    fn flush(&mut self) {
        if let Some(batch) = self.current.take() {
            if !batch.indices.is_empty() {
                log::trace!(
                    "Flushing batch: texture {:?}, {} vertices, {} indices",
                    batch.texture,
                    batch.vertex_count(self.layout),
                    batch.indices.len()
                );
                self.batches.push(batch);
            }
        }
    }
}

impl Batcher for PolygonBatcher {
    fn set_blend_mode(&mut self, src: BlendFactor, dst: BlendFactor) {
        let blend = BlendFactors { src, dst };
        if blend == self.blend {
            return;
        }
        self.flush();
        self.blend = blend;
    }

    fn draw(&mut self, texture: TextureId, vertices: &[f32], indices: &[u16]) {
        let vertex_count = vertices.len() / self.layout.floats_per_vertex();
        if vertex_count > self.max_vertices {
            log::warn!(
                "Dropping draw of {} vertices, more than a batch can hold ({})",
                vertex_count,
                self.max_vertices
            );
            return;
        }

        let needs_flush = self.current.as_ref().is_some_and(|batch| {
            batch.texture != texture
                || batch.vertex_count(self.layout) + vertex_count > self.max_vertices
        });
        if needs_flush {
            self.flush();
        }

        let blend = self.blend;
        let batch = self.current.get_or_insert_with(|| Batch {
            texture,
            blend,
            vertices: Vec::new(),
            indices: Vec::new(),
        });
        let base = batch.vertex_count(self.layout) as u16;
        batch.vertices.extend_from_slice(vertices);
        batch.indices.extend(indices.iter().map(|&i| base + i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(x: f32) -> Vec<f32> {
        let mut vertices = Vec::new();
        for (dx, dy) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)] {
            vertices.extend_from_slice(&[x + dx, dy, 1.0, 1.0, 1.0, 1.0, dx, dy]);
        }
        vertices
    }

    const QUAD: [u16; 6] = [0, 1, 2, 2, 3, 0];

    #[test]
    fn test_same_texture_merges_and_rebases_indices() {
        let mut batcher = PolygonBatcher::new(VertexLayout::Simple);
        batcher.draw(TextureId(1), &quad(0.0), &QUAD);
        batcher.draw(TextureId(1), &quad(2.0), &QUAD);
        let batches = batcher.end();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].vertex_count(VertexLayout::Simple), 8);
        assert_eq!(&batches[0].indices[6..], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn test_texture_change_flushes() {
        let mut batcher = PolygonBatcher::new(VertexLayout::Simple);
        batcher.draw(TextureId(1), &quad(0.0), &QUAD);
        batcher.draw(TextureId(2), &quad(0.0), &QUAD);
        let batches = batcher.end();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1].texture, TextureId(2));
        assert_eq!(batches[1].indices, QUAD.to_vec());
    }

    #[test]
    fn test_blend_change_flushes_only_on_difference() {
        let mut batcher = PolygonBatcher::new(VertexLayout::Simple);
        batcher.draw(TextureId(1), &quad(0.0), &QUAD);
        batcher.set_blend_mode(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        batcher.draw(TextureId(1), &quad(0.0), &QUAD);
        batcher.set_blend_mode(BlendFactor::One, BlendFactor::One);
        batcher.draw(TextureId(1), &quad(0.0), &QUAD);
        let batches = batcher.end();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1].blend.dst, BlendFactor::One);
        assert_eq!(batches[1].blend.blend_state().alpha.src_factor, BlendFactor::One);
    }

    #[test]
    fn test_vertex_limit_splits_batches() {
        let mut batcher = PolygonBatcher::with_max_vertices(VertexLayout::Simple, 6);
        batcher.draw(TextureId(1), &quad(0.0), &QUAD);
        batcher.draw(TextureId(1), &quad(1.0), &QUAD);
        assert_eq!(batcher.end().len(), 2);
    }

    #[test]
    fn test_begin_discards_pending() {
        let mut batcher = PolygonBatcher::new(VertexLayout::Simple);
        batcher.draw(TextureId(1), &quad(0.0), &QUAD);
        batcher.begin();
        assert!(batcher.end().is_empty());
    }
}
