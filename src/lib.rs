pub mod attachment;
pub mod batcher;
pub mod clipping;
pub mod color;
pub mod error;
pub mod renderer;
pub mod skeleton;
pub mod transform;

// Only populated with the `render-stats` feature
pub mod render_stats;

pub use error::{AttachmentError, SkeletonError};
pub use renderer::{RendererConfig, SkeletonRenderer};

pub mod prelude {
    pub use crate::attachment::{
        Attachment, BoneWeight, ClippingAttachment, MeshAttachment, MeshVertices,
        RegionAttachment, TextureId, TextureRegion,
    };
    pub use crate::batcher::{Batch, Batcher, PolygonBatcher};
    pub use crate::clipping::{ClippedGeometry, Clipper, SkeletonClipping};
    pub use crate::color::Color;
    pub use crate::renderer::blend::BlendFactors;
    pub use crate::renderer::vertex::VertexLayout;
    pub use crate::renderer::{QUAD_TRIANGLES, RendererConfig, SkeletonRenderer};
    pub use crate::skeleton::{BlendMode, Bone, Skeleton, Slot, SlotData};
    pub use crate::transform::Transform;
    pub use crate::{AttachmentError, SkeletonError};
}
