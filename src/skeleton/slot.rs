use crate::attachment::Attachment;
use crate::color::Color;

/// How a slot's pixels combine with what is already in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Additive,
    Multiply,
    Screen,
}

/// Static, setup-pose data of a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotData {
    index: usize,
    pub name: String,
    bone: usize,
    pub blend_mode: BlendMode,
}

impl SlotData {
    /// `index` is the slot's position in the skeleton's slot list, `bone`
    /// the index of the bone it is attached to.
    pub fn new(index: usize, name: impl Into<String>, bone: usize) -> Self {
        Self {
            index,
            name: name.into(),
            bone,
            blend_mode: BlendMode::Normal,
        }
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bone(&self) -> usize {
        self.bone
    }
}

/// Per-frame state of a slot.
#[derive(Debug, Clone)]
pub struct Slot {
    data: SlotData,
    pub color: Color,
    /// Secondary tint. `None` renders as opaque black.
    pub dark_color: Option<Color>,
    attachment: Option<Attachment>,
    /// Deformed vertex positions for the current mesh attachment, or empty.
    pub deform: Vec<f32>,
}

impl Slot {
    pub fn new(data: SlotData) -> Self {
        Self {
            data,
            color: Color::WHITE,
            dark_color: None,
            attachment: None,
            deform: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_dark_color(mut self, dark_color: Color) -> Self {
        self.dark_color = Some(dark_color);
        self
    }

    pub fn with_attachment(mut self, attachment: impl Into<Attachment>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn data(&self) -> &SlotData {
        &self.data
    }

    pub fn index(&self) -> usize {
        self.data.index
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.data.blend_mode
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Swapping attachments drops any deform that belonged to the old one.
    pub(crate) fn replace_attachment(&mut self, attachment: Option<Attachment>) {
        self.attachment = attachment;
        self.deform.clear();
    }
}
