//! Construction-time validation errors.
//!
//! The per-frame draw path never fails; malformed data is rejected when
//! skeletons and attachments are built.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkeletonError {
    #[error("Slot {slot} references bone {bone}, but the skeleton has {bone_count} bones")]
    BoneOutOfRange {
        slot: usize,
        bone: usize,
        bone_count: usize,
    },
    #[error("Slot at position {position} has index {index}; indices must match positions")]
    SlotIndexMismatch { position: usize, index: usize },
    #[error("No slot with index {0}")]
    SlotOutOfRange(usize),
    #[error("Draw order has {len} entries, expected one per slot ({slot_count})")]
    DrawOrderLength { len: usize, slot_count: usize },
    #[error("Draw order entry {0} is out of range or repeated")]
    DrawOrderEntry(usize),
    #[error("Invalid attachment on slot {slot}: {source}")]
    Attachment {
        slot: usize,
        #[source]
        source: AttachmentError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttachmentError {
    #[error("Coordinate array has odd length {0}")]
    OddCoordinateCount(usize),
    #[error("Expected {expected} UV floats, got {actual}")]
    UvLengthMismatch { expected: usize, actual: usize },
    #[error("Triangle list length {0} is not a multiple of 3")]
    TriangleCount(usize),
    #[error("Triangle index {index} is out of range for {vertex_count} vertices")]
    TriangleIndexOutOfRange { index: u16, vertex_count: usize },
    #[error("Mesh has {0} vertices, more than a u16 index can address")]
    TooManyVertices(usize),
    #[error("Bone weight references bone {bone}, but only {bone_count} bones exist")]
    WeightBoneOutOfRange { bone: usize, bone_count: usize },
}
