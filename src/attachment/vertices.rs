//! Bone-bound vertex data shared by mesh and clipping attachments.

use crate::error::AttachmentError;
use crate::skeleton::Bone;

/// One bone's influence on a weighted vertex, with the vertex position
/// expressed in that bone's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneWeight {
    pub bone: usize,
    pub x: f32,
    pub y: f32,
    pub weight: f32,
}

impl BoneWeight {
    pub fn new(bone: usize, x: f32, y: f32, weight: f32) -> Self {
        Self { bone, x, y, weight }
    }
}

/// Local vertex positions of an attachment.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshVertices {
    /// Positions in the slot bone's local space.
    Unweighted(Vec<[f32; 2]>),
    /// Per vertex, the list of bones influencing it.
    Weighted(Vec<Vec<BoneWeight>>),
}

impl MeshVertices {
    /// Build unweighted vertices from a flat `[x0, y0, x1, y1, ...]` list.
    pub fn from_flat(coords: &[f32]) -> Result<Self, AttachmentError> {
        if coords.len() % 2 != 0 {
            return Err(AttachmentError::OddCoordinateCount(coords.len()));
        }
        Ok(Self::Unweighted(
            coords.chunks_exact(2).map(|p| [p[0], p[1]]).collect(),
        ))
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Unweighted(v) => v.len(),
            Self::Weighted(v) => v.len(),
        }
    }

    /// Number of floats written when every vertex is computed at stride 2.
    pub fn world_vertices_length(&self) -> usize {
        self.vertex_count() * 2
    }

    pub fn validate_bones(&self, bone_count: usize) -> Result<(), AttachmentError> {
        if let Self::Weighted(vertices) = self {
            for weight in vertices.iter().flatten() {
                if weight.bone >= bone_count {
                    return Err(AttachmentError::WeightBoneOutOfRange {
                        bone: weight.bone,
                        bone_count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Transform `count` floats worth of vertices, starting at float `start`,
    /// into world space.
    ///
    /// Positions land in `out` at `offset`, `offset + stride`, ... leaving the
    /// floats in between untouched. `deform` holds absolute local positions
    /// for unweighted vertices and per-weight offsets for weighted ones; it is
    /// ignored when empty. `out` must hold `offset + (count / 2) * stride`
    /// floats.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_world_vertices(
        &self,
        bones: &[Bone],
        slot_bone: &Bone,
        deform: &[f32],
        start: usize,
        count: usize,
        out: &mut [f32],
        offset: usize,
        stride: usize,
    ) {
        let start_vertex = start / 2;
        let vertex_count = count / 2;

        match self {
            Self::Unweighted(vertices) => {
                let use_deform = !deform.is_empty() && deform.len() >= vertices.len() * 2;
                let end = (start_vertex + vertex_count).min(vertices.len());
                for (i, vi) in (start_vertex..end).enumerate() {
                    let (vx, vy) = if use_deform {
                        (deform[vi * 2], deform[vi * 2 + 1])
                    } else {
                        (vertices[vi][0], vertices[vi][1])
                    };
                    let (wx, wy) = slot_bone.local_to_world(vx, vy);
                    let w = offset + i * stride;
                    out[w] = wx;
                    out[w + 1] = wy;
                }
            }
            Self::Weighted(vertices) => {
                let skipped: usize = vertices.iter().take(start_vertex).map(Vec::len).sum();
                let mut f = skipped * 2;
                let end = (start_vertex + vertex_count).min(vertices.len());
                for (i, weights) in vertices[start_vertex.min(end)..end].iter().enumerate() {
                    let mut wx = 0.0;
                    let mut wy = 0.0;
                    for weight in weights {
                        let (mut vx, mut vy) = (weight.x, weight.y);
                        if let (Some(dx), Some(dy)) = (deform.get(f), deform.get(f + 1)) {
                            vx += dx;
                            vy += dy;
                        }
                        f += 2;
                        let Some(bone) = bones.get(weight.bone) else {
                            continue;
                        };
                        let (bx, by) = bone.local_to_world(vx, vy);
                        wx += bx * weight.weight;
                        wy += by * weight.weight;
                    }
                    let w = offset + i * stride;
                    out[w] = wx;
                    out[w + 1] = wy;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_from_flat_rejects_odd_length() {
        assert_eq!(
            MeshVertices::from_flat(&[1.0, 2.0, 3.0]),
            Err(AttachmentError::OddCoordinateCount(3))
        );
    }

    #[test]
    fn test_unweighted_respects_stride_and_offset() {
        let bone = Bone::new("b", Transform::translate(10.0, 20.0));
        let vertices = MeshVertices::from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut out = [-1.0; 9];
        vertices.compute_world_vertices(&[], &bone, &[], 0, 4, &mut out, 1, 4);
        assert_eq!(out, [-1.0, 11.0, 22.0, -1.0, -1.0, 13.0, 24.0, -1.0, -1.0]);
    }

    #[test]
    fn test_unweighted_deform_replaces_positions() {
        let bone = Bone::new("b", Transform::IDENTITY);
        let vertices = MeshVertices::from_flat(&[1.0, 2.0]).unwrap();
        let mut out = [0.0; 2];
        vertices.compute_world_vertices(&[], &bone, &[5.0, 6.0], 0, 2, &mut out, 0, 2);
        assert_eq!(out, [5.0, 6.0]);
    }

    #[test]
    fn test_weighted_blends_bones() {
        let bones = [
            Bone::new("left", Transform::translate(-10.0, 0.0)),
            Bone::new("right", Transform::translate(10.0, 4.0)),
        ];
        let vertices = MeshVertices::Weighted(vec![
            vec![BoneWeight::new(0, 1.0, 1.0, 1.0)],
            vec![
                BoneWeight::new(0, 0.0, 0.0, 0.5),
                BoneWeight::new(1, 0.0, 0.0, 0.5),
            ],
        ]);
        let mut out = [0.0; 4];
        vertices.compute_world_vertices(&bones, &bones[0], &[], 2, 2, &mut out, 0, 2);
        // Only the second vertex was requested.
        assert!(approx_eq(out[0], 0.0));
        assert!(approx_eq(out[1], 2.0));
    }

    #[test]
    fn test_weighted_deform_offsets_skip_earlier_weights() {
        let bones = [Bone::new("root", Transform::IDENTITY)];
        let vertices = MeshVertices::Weighted(vec![
            vec![BoneWeight::new(0, 0.0, 0.0, 1.0)],
            vec![BoneWeight::new(0, 1.0, 1.0, 1.0)],
        ]);
        let deform = [100.0, 100.0, 0.5, -0.5];
        let mut out = [0.0; 2];
        vertices.compute_world_vertices(&bones, &bones[0], &deform, 2, 2, &mut out, 0, 2);
        assert_eq!(out, [1.5, 0.5]);
    }

    #[test]
    fn test_validate_bones() {
        let vertices = MeshVertices::Weighted(vec![vec![BoneWeight::new(2, 0.0, 0.0, 1.0)]]);
        assert_eq!(
            vertices.validate_bones(2),
            Err(AttachmentError::WeightBoneOutOfRange {
                bone: 2,
                bone_count: 2
            })
        );
        assert!(vertices.validate_bones(3).is_ok());
    }
}
