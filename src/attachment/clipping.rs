use super::vertices::MeshVertices;
use crate::skeleton::{Bone, Slot};

/// A polygon that clips the slots drawn after it, up to and including
/// `end_slot` (or to the end of the draw order when unset).
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingAttachment {
    pub name: String,
    vertices: MeshVertices,
    end_slot: Option<usize>,
}

impl ClippingAttachment {
    pub fn new(name: impl Into<String>, vertices: MeshVertices) -> Self {
        Self {
            name: name.into(),
            vertices,
            end_slot: None,
        }
    }

    /// Close the clip region after the slot with this index is drawn.
    pub fn with_end_slot(mut self, slot: usize) -> Self {
        self.end_slot = Some(slot);
        self
    }

    pub fn end_slot(&self) -> Option<usize> {
        self.end_slot
    }

    pub fn vertices(&self) -> &MeshVertices {
        &self.vertices
    }

    pub fn world_vertices_length(&self) -> usize {
        self.vertices.world_vertices_length()
    }

    /// World-space polygon as a flat `[x0, y0, x1, y1, ...]` list.
    pub fn world_polygon(&self, bones: &[Bone], slot: &Slot) -> Vec<f32> {
        let mut out = vec![0.0; self.world_vertices_length()];
        if let Some(slot_bone) = bones.get(slot.data().bone()) {
            self.vertices.compute_world_vertices(
                bones,
                slot_bone,
                &slot.deform,
                0,
                out.len(),
                &mut out,
                0,
                2,
            );
        }
        out
    }
}
