//! Resolved texture handles and atlas regions.

/// Opaque handle to a GPU texture owned by the application.
///
/// The renderer never dereferences it; it is only handed to the batcher,
/// which uses it to group draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// A packed rectangle inside a texture atlas page.
///
/// UVs are normalized to the page. `rotate` means the region was packed
/// rotated 90 degrees. The original size and offsets describe whitespace
/// stripped by the packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    pub texture: TextureId,
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
    pub rotate: bool,
    /// Packed size in pixels.
    pub width: f32,
    pub height: f32,
    /// Size before whitespace stripping.
    pub original_width: f32,
    pub original_height: f32,
    /// Stripped whitespace at the left and bottom edges.
    pub offset_x: f32,
    pub offset_y: f32,
}

impl TextureRegion {
    /// A region covering a whole `width` x `height` texture.
    pub fn whole(texture: TextureId, width: f32, height: f32) -> Self {
        Self {
            texture,
            u: 0.0,
            v: 0.0,
            u2: 1.0,
            v2: 1.0,
            rotate: false,
            width,
            height,
            original_width: width,
            original_height: height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// A sub-rectangle of a page, given in normalized page coordinates.
    pub fn sub(
        texture: TextureId,
        u: f32,
        v: f32,
        u2: f32,
        v2: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            u,
            v,
            u2,
            v2,
            ..Self::whole(texture, width, height)
        }
    }

    pub fn rotated(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }
}
