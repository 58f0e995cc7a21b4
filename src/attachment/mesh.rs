use super::texture::{TextureId, TextureRegion};
use super::vertices::MeshVertices;
use crate::color::Color;
use crate::error::AttachmentError;
use crate::skeleton::{Bone, Slot};

/// An arbitrary triangulated, textured shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAttachment {
    pub name: String,
    vertices: MeshVertices,
    /// UVs in `0..1` region space, two per vertex.
    region_uvs: Vec<f32>,
    /// UVs mapped into the atlas page of `region`.
    uvs: Vec<f32>,
    triangles: Vec<u16>,
    color: Color,
    region: Option<TextureRegion>,
}

impl MeshAttachment {
    pub fn new(
        name: impl Into<String>,
        vertices: MeshVertices,
        region_uvs: Vec<f32>,
        triangles: Vec<u16>,
    ) -> Result<Self, AttachmentError> {
        let vertex_count = vertices.vertex_count();
        if vertex_count > usize::from(u16::MAX) + 1 {
            return Err(AttachmentError::TooManyVertices(vertex_count));
        }
        if region_uvs.len() != vertex_count * 2 {
            return Err(AttachmentError::UvLengthMismatch {
                expected: vertex_count * 2,
                actual: region_uvs.len(),
            });
        }
        if triangles.len() % 3 != 0 {
            return Err(AttachmentError::TriangleCount(triangles.len()));
        }
        if let Some(&index) = triangles
            .iter()
            .find(|&&index| usize::from(index) >= vertex_count)
        {
            return Err(AttachmentError::TriangleIndexOutOfRange {
                index,
                vertex_count,
            });
        }

        let uvs = region_uvs.clone();
        Ok(Self {
            name: name.into(),
            vertices,
            region_uvs,
            uvs,
            triangles,
            color: Color::WHITE,
            region: None,
        })
    }

    pub fn with_region(mut self, region: TextureRegion) -> Self {
        self.set_region(Some(region));
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Assign (or clear) the atlas region and remap UVs into it.
    pub fn set_region(&mut self, region: Option<TextureRegion>) {
        self.region = region;
        self.update_uvs();
    }

    fn update_uvs(&mut self) {
        let Some(region) = &self.region else {
            self.uvs.copy_from_slice(&self.region_uvs);
            return;
        };
        let width = region.u2 - region.u;
        let height = region.v2 - region.v;
        for (uv, src) in self
            .uvs
            .chunks_exact_mut(2)
            .zip(self.region_uvs.chunks_exact(2))
        {
            if region.rotate {
                uv[0] = region.u + src[1] * width;
                uv[1] = region.v + height - src[0] * height;
            } else {
                uv[0] = region.u + src[0] * width;
                uv[1] = region.v + src[1] * height;
            }
        }
    }

    pub fn vertices(&self) -> &MeshVertices {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.vertex_count()
    }

    /// Floats needed to hold every vertex position at stride 2.
    pub fn world_vertices_length(&self) -> usize {
        self.vertices.world_vertices_length()
    }

    pub fn triangles(&self) -> &[u16] {
        &self.triangles
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn region(&self) -> Option<&TextureRegion> {
        self.region.as_ref()
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.region.map(|r| r.texture)
    }

    /// Write world positions for vertices `start / 2 .. (start + count) / 2`
    /// into `out`, honouring the slot's deform.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_world_vertices(
        &self,
        bones: &[Bone],
        slot: &Slot,
        start: usize,
        count: usize,
        out: &mut [f32],
        offset: usize,
        stride: usize,
    ) {
        let Some(slot_bone) = bones.get(slot.data().bone()) else {
            return;
        };
        self.vertices.compute_world_vertices(
            bones,
            slot_bone,
            &slot.deform,
            start,
            count,
            out,
            offset,
            stride,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> MeshVertices {
        MeshVertices::from_flat(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0]).unwrap()
    }

    #[test]
    fn test_validation() {
        let uvs = vec![0.0; 8];
        assert_eq!(
            MeshAttachment::new("m", quad_vertices(), vec![0.0; 6], vec![]).unwrap_err(),
            AttachmentError::UvLengthMismatch {
                expected: 8,
                actual: 6
            }
        );
        assert_eq!(
            MeshAttachment::new("m", quad_vertices(), uvs.clone(), vec![0, 1]).unwrap_err(),
            AttachmentError::TriangleCount(2)
        );
        assert_eq!(
            MeshAttachment::new("m", quad_vertices(), uvs, vec![0, 1, 4]).unwrap_err(),
            AttachmentError::TriangleIndexOutOfRange {
                index: 4,
                vertex_count: 4
            }
        );
    }

    #[test]
    fn test_uvs_map_into_region() {
        let mesh = MeshAttachment::new(
            "m",
            quad_vertices(),
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            vec![0, 1, 2, 2, 3, 0],
        )
        .unwrap()
        .with_region(TextureRegion::sub(TextureId(1), 0.5, 0.0, 1.0, 0.5, 4.0, 4.0));
        assert_eq!(
            mesh.uvs(),
            &[0.5, 0.0, 0.5, 0.5, 1.0, 0.5, 1.0, 0.0]
        );
        assert_eq!(mesh.texture(), Some(TextureId(1)));
        assert_eq!(mesh.world_vertices_length(), 8);
    }

    #[test]
    fn test_rotated_region_uvs() {
        let mesh = MeshAttachment::new(
            "m",
            quad_vertices(),
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            vec![],
        )
        .unwrap()
        .with_region(TextureRegion::whole(TextureId(1), 1.0, 1.0).rotated(true));
        assert_eq!(mesh.uvs(), &[0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
    }
}
