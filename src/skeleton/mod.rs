//! Posed skeleton data consumed by the renderer.
//!
//! A [`Skeleton`] owns its bones and slots and a draw order: the sequence in
//! which slots are rendered. The draw order is independent of the bone
//! hierarchy and is supplied by the animation layer, never computed here.

mod bone;
mod slot;

pub use bone::Bone;
pub use slot::{BlendMode, Slot, SlotData};

use crate::attachment::Attachment;
use crate::color::Color;
use crate::error::SkeletonError;

#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
    slots: Vec<Slot>,
    draw_order: Vec<usize>,
    /// Global tint applied to every slot.
    pub color: Color,
}

impl Skeleton {
    /// Build a skeleton, checking that every slot sits at its own index and
    /// references an existing bone. The draw order starts as slot order.
    pub fn new(bones: Vec<Bone>, slots: Vec<Slot>) -> Result<Self, SkeletonError> {
        for (position, slot) in slots.iter().enumerate() {
            if slot.index() != position {
                return Err(SkeletonError::SlotIndexMismatch {
                    position,
                    index: slot.index(),
                });
            }
            if slot.data().bone() >= bones.len() {
                return Err(SkeletonError::BoneOutOfRange {
                    slot: position,
                    bone: slot.data().bone(),
                    bone_count: bones.len(),
                });
            }
            if let Some(attachment) = slot.attachment() {
                attachment
                    .validate_bones(bones.len())
                    .map_err(|source| SkeletonError::Attachment {
                        slot: position,
                        source,
                    })?;
            }
        }

        let draw_order = (0..slots.len()).collect();
        Ok(Self {
            bones,
            slots,
            draw_order,
            color: Color::WHITE,
        })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bones_mut(&mut self) -> &mut [Bone] {
        &mut self.bones
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// The bone a slot is attached to.
    ///
    /// Slots are validated against the bone list on construction, so every
    /// slot of this skeleton resolves.
    pub fn bone_of(&self, slot: &Slot) -> &Bone {
        &self.bones[slot.data().bone()]
    }

    /// Replace a slot's attachment, validating any bone weights it carries.
    pub fn set_attachment(
        &mut self,
        slot: usize,
        attachment: Option<Attachment>,
    ) -> Result<(), SkeletonError> {
        if let Some(attachment) = &attachment {
            attachment
                .validate_bones(self.bones.len())
                .map_err(|source| SkeletonError::Attachment { slot, source })?;
        }
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(SkeletonError::SlotOutOfRange(slot))?;
        target.replace_attachment(attachment);
        Ok(())
    }

    /// Indices of the slots in render order.
    pub fn draw_order_indices(&self) -> &[usize] {
        &self.draw_order
    }

    /// Set a new draw order. It must name every slot exactly once.
    pub fn set_draw_order(&mut self, order: Vec<usize>) -> Result<(), SkeletonError> {
        if order.len() != self.slots.len() {
            return Err(SkeletonError::DrawOrderLength {
                len: order.len(),
                slot_count: self.slots.len(),
            });
        }
        let mut seen = vec![false; self.slots.len()];
        for &index in &order {
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(SkeletonError::DrawOrderEntry(index)),
            }
        }
        self.draw_order = order;
        Ok(())
    }

    /// Slots in render order.
    pub fn draw_order(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.draw_order.iter().map(move |&index| &self.slots[index])
    }
}
