use super::texture::{TextureId, TextureRegion};
use crate::color::Color;
use crate::skeleton::Bone;

// Corner order used by offsets and UVs: bottom-left, top-left, top-right,
// bottom-right. QUAD_TRIANGLES in the renderer depends on it.
const BL: usize = 0;
const TL: usize = 2;
const TR: usize = 4;
const BR: usize = 6;

/// A textured quad placed relative to its slot's bone.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAttachment {
    pub name: String,
    x: f32,
    y: f32,
    rotation: f32,
    scale_x: f32,
    scale_y: f32,
    width: f32,
    height: f32,
    color: Color,
    region: Option<TextureRegion>,
    /// Bone-local corner positions.
    offset: [f32; 8],
    uvs: [f32; 8],
}

impl RegionAttachment {
    /// A `width` x `height` quad centred on its bone, without a texture.
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        let mut attachment = Self {
            name: name.into(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            width,
            height,
            color: Color::WHITE,
            region: None,
            offset: [0.0; 8],
            uvs: [0.0; 8],
        };
        attachment.update_offset();
        attachment
    }

    pub fn with_region(mut self, region: TextureRegion) -> Self {
        self.set_region(Some(region));
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self.update_offset();
        self
    }

    /// Rotation in degrees, counter-clockwise.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self.update_offset();
        self
    }

    pub fn with_scale(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self.update_offset();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Assign (or clear) the atlas region, refreshing UVs and corner offsets.
    pub fn set_region(&mut self, region: Option<TextureRegion>) {
        self.region = region;
        self.uvs = match &self.region {
            Some(region) => region_uvs(region),
            None => [0.0; 8],
        };
        self.update_offset();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn region(&self) -> Option<&TextureRegion> {
        self.region.as_ref()
    }

    /// The resolved texture, if the region has been assigned.
    pub fn texture(&self) -> Option<TextureId> {
        self.region.map(|r| r.texture)
    }

    pub fn uvs(&self) -> &[f32; 8] {
        &self.uvs
    }

    pub fn offset(&self) -> &[f32; 8] {
        &self.offset
    }

    /// Recompute the bone-local corners from placement and region packing.
    fn update_offset(&mut self) {
        let (packed_w, packed_h, original_w, original_h, pad_x, pad_y) = match &self.region {
            Some(r) => (
                r.width,
                r.height,
                r.original_width,
                r.original_height,
                r.offset_x,
                r.offset_y,
            ),
            None => (self.width, self.height, self.width, self.height, 0.0, 0.0),
        };
        let region_scale_x = if original_w != 0.0 {
            self.width / original_w * self.scale_x
        } else {
            0.0
        };
        let region_scale_y = if original_h != 0.0 {
            self.height / original_h * self.scale_y
        } else {
            0.0
        };

        let local_x = -self.width / 2.0 * self.scale_x + pad_x * region_scale_x;
        let local_y = -self.height / 2.0 * self.scale_y + pad_y * region_scale_y;
        let local_x2 = local_x + packed_w * region_scale_x;
        let local_y2 = local_y + packed_h * region_scale_y;

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let corner = |lx: f32, ly: f32| {
            (
                lx * cos - ly * sin + self.x,
                lx * sin + ly * cos + self.y,
            )
        };

        let corners = [
            (BL, corner(local_x, local_y)),
            (TL, corner(local_x, local_y2)),
            (TR, corner(local_x2, local_y2)),
            (BR, corner(local_x2, local_y)),
        ];
        for (i, (x, y)) in corners {
            self.offset[i] = x;
            self.offset[i + 1] = y;
        }
    }

    /// Write the four world-space corners into `out` starting at `offset`,
    /// one every `stride` floats.
    pub fn compute_world_vertices(
        &self,
        bone: &Bone,
        out: &mut [f32],
        offset: usize,
        stride: usize,
    ) {
        for (i, corner) in self.offset.chunks_exact(2).enumerate() {
            let (x, y) = bone.local_to_world(corner[0], corner[1]);
            let w = offset + i * stride;
            out[w] = x;
            out[w + 1] = y;
        }
    }
}

fn region_uvs(region: &TextureRegion) -> [f32; 8] {
    let mut uvs = [0.0; 8];
    let corners = if region.rotate {
        [
            (BL, region.u2, region.v2),
            (TL, region.u, region.v2),
            (TR, region.u, region.v),
            (BR, region.u2, region.v),
        ]
    } else {
        [
            (BL, region.u, region.v2),
            (TL, region.u, region.v),
            (TR, region.u2, region.v),
            (BR, region.u2, region.v2),
        ]
    };
    for (i, u, v) in corners {
        uvs[i] = u;
        uvs[i + 1] = v;
    }
    uvs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_unrotated_corners() {
        let region = RegionAttachment::new("r", 4.0, 2.0);
        assert_eq!(
            region.offset(),
            &[-2.0, -1.0, -2.0, 1.0, 2.0, 1.0, 2.0, -1.0]
        );
    }

    #[test]
    fn test_position_and_rotation() {
        let region = RegionAttachment::new("r", 2.0, 2.0)
            .with_rotation(90.0)
            .with_position(10.0, 0.0);
        let o = region.offset();
        // bottom-left (-1,-1) rotated 90 degrees is (1,-1), then moved.
        assert!(approx_eq(o[0], 11.0));
        assert!(approx_eq(o[1], -1.0));
    }

    #[test]
    fn test_uvs_follow_region() {
        let texture = TextureId(7);
        let region = RegionAttachment::new("r", 2.0, 2.0).with_region(TextureRegion::sub(
            texture, 0.25, 0.5, 0.75, 1.0, 2.0, 2.0,
        ));
        assert_eq!(region.texture(), Some(texture));
        assert_eq!(region.uvs(), &[0.25, 1.0, 0.25, 0.5, 0.75, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_rotated_region_uvs() {
        let region = RegionAttachment::new("r", 2.0, 2.0)
            .with_region(TextureRegion::whole(TextureId(1), 2.0, 2.0).rotated(true));
        assert_eq!(region.uvs(), &[1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_whitespace_offsets_shrink_quad() {
        let mut packed = TextureRegion::whole(TextureId(1), 2.0, 2.0);
        packed.original_width = 4.0;
        packed.original_height = 4.0;
        packed.offset_x = 1.0;
        packed.offset_y = 1.0;
        let region = RegionAttachment::new("r", 4.0, 4.0).with_region(packed);
        assert_eq!(region.offset(), &[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_world_vertices_at_stride() {
        let bone = Bone::new("b", Transform::translate(5.0, 5.0));
        let region = RegionAttachment::new("r", 2.0, 2.0);
        let mut out = [0.0; 8];
        region.compute_world_vertices(&bone, &mut out, 0, 2);
        assert_eq!(out, [4.0, 4.0, 4.0, 6.0, 6.0, 6.0, 6.0, 4.0]);
    }
}
