//! Clip-region collaborator used by the renderer.
//!
//! While a clipping attachment is active, the renderer hands each slot's raw
//! positions to a [`Clipper`], which returns fully interleaved geometry that is
//! submitted as-is.

mod polygon;

use crate::attachment::ClippingAttachment;
use crate::color::Color;
use crate::renderer::vertex::VertexLayout;
use crate::skeleton::{Skeleton, Slot};

pub use self::polygon::Point;
use self::polygon::{clip_polygon, convex_pieces, ensure_counter_clockwise};

/// Clipped geometry in the full interleaved vertex layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClippedGeometry {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
}

pub trait Clipper {
    fn is_clipping(&self) -> bool;

    /// Open a clip region defined by `clip`, attached to `slot`.
    fn clip_start(&mut self, skeleton: &Skeleton, slot: &Slot, clip: &ClippingAttachment);

    /// Clip a triangle list.
    ///
    /// `vertices` holds positions only (stride 2), `uvs` two floats per
    /// vertex. The result uses [`VertexLayout::TwoColor`] when
    /// `two_color_tint` is set and [`VertexLayout::Simple`] otherwise.
    fn clip_triangles(
        &mut self,
        vertices: &[f32],
        triangles: &[u16],
        uvs: &[f32],
        light: Color,
        dark: Color,
        two_color_tint: bool,
    ) -> ClippedGeometry;

    /// Close the clip region if `slot` is the one it ends at.
    fn clip_end_with_slot(&mut self, slot: &Slot);

    /// Close any open clip region.
    fn clip_end(&mut self);
}

const MAX_CLIPPED_VERTICES: usize = u16::MAX as usize + 1;

#[derive(Debug)]
struct ActiveClip {
    end_slot: Option<usize>,
    /// Counter-clockwise world-space polygon.
    polygon: Vec<Point>,
    /// `polygon` split into convex parts.
    pieces: Vec<Vec<Point>>,
}

/// A [`Clipper`] that clips triangles against a simple polygon.
///
/// Concave clip polygons are split into convex pieces when the region
/// opens. Each input triangle is clipped against every piece with
/// Sutherland-Hodgman and each result is fan-triangulated. UVs are
/// interpolated barycentrically.
#[derive(Debug, Default)]
pub struct SkeletonClipping {
    clip: Option<ActiveClip>,
    input: Vec<Point>,
    output: Vec<Point>,
}

impl SkeletonClipping {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active clip polygon in world space, if any.
    pub fn polygon(&self) -> Option<&[Point]> {
        self.clip.as_ref().map(|c| c.polygon.as_slice())
    }
}

impl Clipper for SkeletonClipping {
    fn is_clipping(&self) -> bool {
        self.clip.is_some()
    }

    fn clip_start(&mut self, skeleton: &Skeleton, slot: &Slot, clip: &ClippingAttachment) {
        if self.clip.is_some() {
            return;
        }
        let flat = clip.world_polygon(skeleton.bones(), slot);
        let mut polygon: Vec<Point> = flat.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
        ensure_counter_clockwise(&mut polygon);
        let pieces = convex_pieces(&polygon);
        log::debug!(
            "Clip region '{}' opened at slot {} ({} points, {} convex pieces)",
            clip.name,
            slot.index(),
            polygon.len(),
            pieces.len()
        );
        self.clip = Some(ActiveClip {
            end_slot: clip.end_slot(),
            polygon,
            pieces,
        });
    }

    fn clip_triangles(
        &mut self,
        vertices: &[f32],
        triangles: &[u16],
        uvs: &[f32],
        light: Color,
        dark: Color,
        two_color_tint: bool,
    ) -> ClippedGeometry {
        let mut result = ClippedGeometry::default();
        let Some(clip) = &self.clip else {
            return result;
        };
        let layout = VertexLayout::new(two_color_tint);
        let light = light.to_array();
        let dark = dark.to_array();

        'triangles: for triangle in triangles.chunks_exact(3) {
            let corners = [
                usize::from(triangle[0]),
                usize::from(triangle[1]),
                usize::from(triangle[2]),
            ];
            let p = corners.map(|i| [vertices[i * 2], vertices[i * 2 + 1]]);
            let t = corners.map(|i| [uvs[i * 2], uvs[i * 2 + 1]]);

            // Barycentric basis of the source triangle.
            let d0 = p[1][1] - p[2][1];
            let d1 = p[2][0] - p[1][0];
            let d2 = p[0][0] - p[2][0];
            let d3 = p[2][1] - p[0][1];
            let det = d0 * d2 + d1 * (p[0][1] - p[2][1]);
            // Zero-area triangles cover nothing.
            if det == 0.0 {
                continue;
            }
            let inv_det = 1.0 / det;

            for piece in &clip.pieces {
                self.input.clear();
                self.input.extend_from_slice(&p);
                clip_polygon(piece, &mut self.input, &mut self.output);
                if self.output.len() < 3 {
                    continue;
                }

                let base = result.vertices.len() / layout.floats_per_vertex();
                if base + self.output.len() > MAX_CLIPPED_VERTICES {
                    log::warn!(
                        "Clipped geometry exceeds u16 index range; dropping remaining triangles"
                    );
                    break 'triangles;
                }
                let base = base as u16;

                for &[x, y] in &self.output {
                    let a = (d0 * (x - p[2][0]) + d1 * (y - p[2][1])) * inv_det;
                    let b = (d3 * (x - p[2][0]) + d2 * (y - p[2][1])) * inv_det;
                    let c = 1.0 - a - b;
                    let u = t[0][0] * a + t[1][0] * b + t[2][0] * c;
                    let v = t[0][1] * a + t[1][1] * b + t[2][1] * c;

                    result.vertices.extend_from_slice(&[x, y]);
                    result.vertices.extend_from_slice(&light);
                    result.vertices.extend_from_slice(&[u, v]);
                    if layout.has_dark_color() {
                        result.vertices.extend_from_slice(&dark);
                    }
                }

                for k in 1..(self.output.len() as u16 - 1) {
                    result.indices.extend_from_slice(&[base, base + k, base + k + 1]);
                }
            }
        }

        result
    }

    fn clip_end_with_slot(&mut self, slot: &Slot) {
        let ends_here = self
            .clip
            .as_ref()
            .is_some_and(|clip| clip.end_slot == Some(slot.index()));
        if ends_here {
            self.clip_end();
        }
    }

    fn clip_end(&mut self) {
        if self.clip.take().is_some() {
            log::debug!("Clip region closed");
        }
    }
}
