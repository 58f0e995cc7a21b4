//! Interleaved vertex layouts and the attribute packer.
//!
//! Vertices are packed into flat `f32` buffers. The two `#[repr(C)]` structs
//! below describe the same memory for GPU upload and for typed inspection.

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::color::Color;

/// Position, tint and texture coordinates: 8 floats.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SimpleVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

/// [`SimpleVertex`] plus a secondary "dark" tint: 12 floats.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TwoColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub uv: [f32; 2],
    pub dark_color: [f32; 4],
}

const SIMPLE_ATTRIBUTES: [VertexAttribute; 3] = [
    // position
    VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: VertexFormat::Float32x2,
    },
    // color
    VertexAttribute {
        offset: 8,
        shader_location: 1,
        format: VertexFormat::Float32x4,
    },
    // uv
    VertexAttribute {
        offset: 24,
        shader_location: 2,
        format: VertexFormat::Float32x2,
    },
];

const TWO_COLOR_ATTRIBUTES: [VertexAttribute; 4] = [
    SIMPLE_ATTRIBUTES[0],
    SIMPLE_ATTRIBUTES[1],
    SIMPLE_ATTRIBUTES[2],
    // dark_color
    VertexAttribute {
        offset: 32,
        shader_location: 3,
        format: VertexFormat::Float32x4,
    },
];

/// Per-vertex layout, fixed for the lifetime of a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLayout {
    /// `[x, y, r, g, b, a, u, v]`
    Simple,
    /// `[x, y, r, g, b, a, u, v, dr, dg, db, da]`
    TwoColor,
}

impl VertexLayout {
    pub fn new(two_color_tint: bool) -> Self {
        if two_color_tint {
            Self::TwoColor
        } else {
            Self::Simple
        }
    }

    /// Stride in floats.
    pub const fn floats_per_vertex(self) -> usize {
        match self {
            Self::Simple => 8,
            Self::TwoColor => 12,
        }
    }

    pub fn has_dark_color(self) -> bool {
        self == Self::TwoColor
    }

    pub fn desc(self) -> VertexBufferLayout<'static> {
        match self {
            Self::Simple => VertexBufferLayout {
                array_stride: std::mem::size_of::<SimpleVertex>() as u64,
                step_mode: VertexStepMode::Vertex,
                attributes: &SIMPLE_ATTRIBUTES,
            },
            Self::TwoColor => VertexBufferLayout {
                array_stride: std::mem::size_of::<TwoColorVertex>() as u64,
                step_mode: VertexStepMode::Vertex,
                attributes: &TWO_COLOR_ATTRIBUTES,
            },
        }
    }
}

/// Fill color, UV and (for [`VertexLayout::TwoColor`]) dark color of every
/// vertex in `vertices`, leaving the positions already written at the start
/// of each stride untouched.
///
/// `vertices` must be exactly `vertex_count * stride` floats and `uvs` must
/// hold two floats per vertex.
pub fn pack_attributes(
    vertices: &mut [f32],
    layout: VertexLayout,
    uvs: &[f32],
    light: Color,
    dark: Color,
) {
    let light = light.to_array();
    let stride = layout.floats_per_vertex();
    match layout {
        VertexLayout::Simple => {
            for (vertex, uv) in vertices.chunks_exact_mut(stride).zip(uvs.chunks_exact(2)) {
                vertex[2..6].copy_from_slice(&light);
                vertex[6..8].copy_from_slice(uv);
            }
        }
        VertexLayout::TwoColor => {
            let dark = dark.to_array();
            for (vertex, uv) in vertices.chunks_exact_mut(stride).zip(uvs.chunks_exact(2)) {
                vertex[2..6].copy_from_slice(&light);
                vertex[6..8].copy_from_slice(uv);
                vertex[8..12].copy_from_slice(&dark);
            }
        }
    }
}
