//! Attachment variants a slot can hold.
//!
//! The set is closed: the renderer matches exhaustively over [`Attachment`],
//! and anything it does not draw (bounding boxes, paths, points) arrives as
//! [`Attachment::Unsupported`].

mod clipping;
mod mesh;
mod region;
mod texture;
mod vertices;

pub use clipping::ClippingAttachment;
pub use mesh::MeshAttachment;
pub use region::RegionAttachment;
pub use texture::{TextureId, TextureRegion};
pub use vertices::{BoneWeight, MeshVertices};

use crate::error::AttachmentError;

#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Region(RegionAttachment),
    Mesh(MeshAttachment),
    Clipping(ClippingAttachment),
    /// A variant this renderer does not draw.
    Unsupported { name: String },
}

impl Attachment {
    pub fn name(&self) -> &str {
        match self {
            Self::Region(a) => &a.name,
            Self::Mesh(a) => &a.name,
            Self::Clipping(a) => &a.name,
            Self::Unsupported { name } => name,
        }
    }

    /// Check bone weights against a skeleton with `bone_count` bones.
    pub fn validate_bones(&self, bone_count: usize) -> Result<(), AttachmentError> {
        match self {
            Self::Mesh(mesh) => mesh.vertices().validate_bones(bone_count),
            Self::Clipping(clip) => clip.vertices().validate_bones(bone_count),
            Self::Region(_) | Self::Unsupported { .. } => Ok(()),
        }
    }
}

impl From<RegionAttachment> for Attachment {
    fn from(attachment: RegionAttachment) -> Self {
        Self::Region(attachment)
    }
}

impl From<MeshAttachment> for Attachment {
    fn from(attachment: MeshAttachment) -> Self {
        Self::Mesh(attachment)
    }
}

impl From<ClippingAttachment> for Attachment {
    fn from(attachment: ClippingAttachment) -> Self {
        Self::Clipping(attachment)
    }
}
