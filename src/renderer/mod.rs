//! Turns a posed [`Skeleton`] into interleaved vertex and index data.

pub mod blend;
mod config;
pub mod scratch;
pub mod tint;
pub mod vertex;

use crate::attachment::{Attachment, TextureId};
use crate::batcher::Batcher;
use crate::clipping::{Clipper, SkeletonClipping};
use crate::color::Color;
use crate::render_stats;
use crate::skeleton::{Skeleton, Slot};

use self::blend::BlendTracker;
use self::scratch::VertexScratch;
use self::vertex::{VertexLayout, pack_attributes};

pub use config::RendererConfig;

/// Index list shared by every region attachment: two triangles over the
/// corners in bottom-left, top-left, top-right, bottom-right order.
pub const QUAD_TRIANGLES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Vertices the scratch buffer holds before its first growth.
const INITIAL_SCRATCH_VERTICES: usize = 1024;

/// Size of the geometry produced for the most recent slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderable {
    pub num_vertices: usize,
    pub num_floats: usize,
}

/// Per-frame skeleton renderer.
///
/// Owns a grow-only vertex scratch buffer and two scratch colors that are
/// reused for every slot of every [`draw`](Self::draw) call. A renderer is
/// therefore meant for one thread at a time; give each thread (or each
/// concurrently drawn skeleton) its own instance.
#[derive(Debug)]
pub struct SkeletonRenderer<C: Clipper = SkeletonClipping> {
    config: RendererConfig,
    layout: VertexLayout,
    vertices: VertexScratch,
    light_color: Color,
    dark_color: Color,
    renderable: Renderable,
    clipper: C,
}

impl SkeletonRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self::with_clipper(config, SkeletonClipping::new())
    }
}

impl Default for SkeletonRenderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl<C: Clipper> SkeletonRenderer<C> {
    pub fn with_clipper(config: RendererConfig, clipper: C) -> Self {
        let layout = VertexLayout::new(config.two_color_tint);
        Self {
            config,
            layout,
            vertices: VertexScratch::new(layout.floats_per_vertex() * INITIAL_SCRATCH_VERTICES),
            light_color: Color::WHITE,
            dark_color: Color::BLACK,
            renderable: Renderable::default(),
            clipper,
        }
    }

    pub fn config(&self) -> RendererConfig {
        self.config
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Current scratch buffer capacity in floats.
    pub fn scratch_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn clipper(&self) -> &C {
        &self.clipper
    }

    pub fn clipper_mut(&mut self) -> &mut C {
        &mut self.clipper
    }

    /// Primary tint of the last emitted slot.
    pub fn light_color(&self) -> Color {
        self.light_color
    }

    /// Secondary tint of the last emitted slot.
    pub fn dark_color(&self) -> Color {
        self.dark_color
    }

    /// Geometry size of the last region or mesh slot.
    pub fn renderable(&self) -> Renderable {
        self.renderable
    }

    /// Submit every slot of `skeleton` to `batcher`, in draw order.
    ///
    /// Slots without an attachment, with an unsupported attachment, or whose
    /// attachment has no texture produce no geometry. Blend state changes
    /// are only sent when a slot's blend mode differs from the previous
    /// emitting slot. Any clip region still open when the draw order is
    /// exhausted is closed.
    pub fn draw<B: Batcher + ?Sized>(&mut self, batcher: &mut B, skeleton: &Skeleton) {
        let vertex_size = self.layout.floats_per_vertex();
        let mut blend = BlendTracker::new();

        for slot in skeleton.draw_order() {
            let clipped_vertex_size = if self.clipper.is_clipping() {
                2
            } else {
                vertex_size
            };

            let (triangles, uvs, texture, attachment_color): (&[u16], &[f32], _, _) =
                match slot.attachment() {
                    Some(Attachment::Region(region)) => {
                        self.renderable = Renderable {
                            num_vertices: 4,
                            num_floats: clipped_vertex_size * 4,
                        };
                        self.grow_scratch(self.renderable.num_floats);
                        region.compute_world_vertices(
                            skeleton.bone_of(slot),
                            self.vertices.as_mut_slice(),
                            0,
                            clipped_vertex_size,
                        );
                        (&QUAD_TRIANGLES, region.uvs(), region.texture(), region.color())
                    }
                    Some(Attachment::Mesh(mesh)) => {
                        let length = mesh.world_vertices_length();
                        self.renderable = Renderable {
                            num_vertices: length / 2,
                            num_floats: length / 2 * clipped_vertex_size,
                        };
                        self.grow_scratch(self.renderable.num_floats);
                        mesh.compute_world_vertices(
                            skeleton.bones(),
                            slot,
                            0,
                            length,
                            self.vertices.as_mut_slice(),
                            0,
                            clipped_vertex_size,
                        );
                        (mesh.triangles(), mesh.uvs(), mesh.texture(), mesh.color())
                    }
                    Some(Attachment::Clipping(clip)) => {
                        self.clipper.clip_start(skeleton, slot, clip);
                        continue;
                    }
                    Some(Attachment::Unsupported { name }) => {
                        log::trace!(
                            "Skipping slot {}: unsupported attachment '{}'",
                            slot.index(),
                            name
                        );
                        render_stats::record_slot_skipped();
                        continue;
                    }
                    None => {
                        render_stats::record_slot_skipped();
                        continue;
                    }
                };

            match texture {
                Some(texture) => {
                    self.emit(
                        batcher,
                        &mut blend,
                        skeleton,
                        slot,
                        texture,
                        triangles,
                        uvs,
                        attachment_color,
                    );
                }
                None => {
                    log::trace!("Skipping slot {}: attachment has no texture", slot.index());
                    render_stats::record_slot_skipped();
                }
            }

            self.clipper.clip_end_with_slot(slot);
        }

        self.clipper.clip_end();
        render_stats::end_draw();
    }

    fn grow_scratch(&mut self, floats: usize) {
        if self.vertices.ensure_capacity(floats) {
            render_stats::record_scratch_growth();
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn emit<B: Batcher + ?Sized>(
        &mut self,
        batcher: &mut B,
        blend: &mut BlendTracker,
        skeleton: &Skeleton,
        slot: &Slot,
        texture: TextureId,
        triangles: &[u16],
        uvs: &[f32],
        attachment_color: Color,
    ) {
        let premultiplied_alpha = self.config.premultiplied_alpha;
        self.light_color.set_from(&tint::light_color(
            skeleton.color,
            slot.color,
            attachment_color,
            premultiplied_alpha,
        ));
        self.dark_color.set_from(&tint::dark_color(slot.dark_color));

        if let Some(factors) = blend.transition(slot.blend_mode(), premultiplied_alpha) {
            batcher.set_blend_mode(factors.src, factors.dst);
            render_stats::record_blend_change();
        }

        let num_floats = self.renderable.num_floats;
        if self.clipper.is_clipping() {
            let clipped = self.clipper.clip_triangles(
                &self.vertices.as_slice()[..num_floats],
                triangles,
                uvs,
                self.light_color,
                self.dark_color,
                self.config.two_color_tint,
            );
            batcher.draw(texture, &clipped.vertices, &clipped.indices);
            render_stats::record_slot_clipped();
        } else {
            let vertices = &mut self.vertices.as_mut_slice()[..num_floats];
            pack_attributes(vertices, self.layout, uvs, self.light_color, self.dark_color);
            batcher.draw(texture, vertices, triangles);
            render_stats::record_slot_drawn();
        }
    }
}
