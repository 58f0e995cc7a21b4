use crate::transform::Transform;

/// A posed bone. Only the world transform matters to rendering; computing it
/// from the local pose is the animation layer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub world: Transform,
}

impl Bone {
    pub fn new(name: impl Into<String>, world: Transform) -> Self {
        Self {
            name: name.into(),
            world,
        }
    }

    #[inline]
    pub fn a(&self) -> f32 {
        self.world.a
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.world.b
    }

    #[inline]
    pub fn c(&self) -> f32 {
        self.world.c
    }

    #[inline]
    pub fn d(&self) -> f32 {
        self.world.d
    }

    #[inline]
    pub fn world_x(&self) -> f32 {
        self.world.tx
    }

    #[inline]
    pub fn world_y(&self) -> f32 {
        self.world.ty
    }

    /// Map a point from bone-local space to world space.
    #[inline]
    pub fn local_to_world(&self, x: f32, y: f32) -> (f32, f32) {
        self.world.transform_point(x, y)
    }
}
