//! Blend mode to GPU blend factor conversion and change tracking.

use wgpu::{BlendComponent, BlendFactor, BlendOperation, BlendState};

pub use crate::skeleton::BlendMode;

/// A `(source, destination)` blend function pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFactors {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFactors {
    pub fn for_mode(mode: BlendMode, premultiplied_alpha: bool) -> Self {
        Self {
            src: source_factor(mode, premultiplied_alpha),
            dst: dest_factor(mode),
        }
    }

    /// Same function for color and alpha, additive equation.
    pub fn blend_state(self) -> BlendState {
        let component = BlendComponent {
            src_factor: self.src,
            dst_factor: self.dst,
            operation: BlendOperation::Add,
        };
        BlendState {
            color: component,
            alpha: component,
        }
    }
}

impl Default for BlendFactors {
    fn default() -> Self {
        Self::for_mode(BlendMode::Normal, false)
    }
}

pub fn source_factor(mode: BlendMode, premultiplied_alpha: bool) -> BlendFactor {
    match mode {
        BlendMode::Normal | BlendMode::Additive => {
            if premultiplied_alpha {
                BlendFactor::One
            } else {
                BlendFactor::SrcAlpha
            }
        }
        BlendMode::Multiply => BlendFactor::Dst,
        BlendMode::Screen => BlendFactor::One,
    }
}

pub fn dest_factor(mode: BlendMode) -> BlendFactor {
    match mode {
        BlendMode::Additive => BlendFactor::One,
        BlendMode::Normal | BlendMode::Multiply | BlendMode::Screen => {
            BlendFactor::OneMinusSrcAlpha
        }
    }
}

/// Remembers the blend mode of the last emitting slot within one draw call.
#[derive(Debug, Default)]
pub struct BlendTracker {
    current: Option<BlendMode>,
}

impl BlendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<BlendMode> {
        self.current
    }

    /// Returns the factors to switch to when `mode` differs from the current
    /// mode, or `None` when no state change is needed.
    pub fn transition(
        &mut self,
        mode: BlendMode,
        premultiplied_alpha: bool,
    ) -> Option<BlendFactors> {
        if self.current == Some(mode) {
            return None;
        }
        self.current = Some(mode);
        Some(BlendFactors::for_mode(mode, premultiplied_alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_table() {
        assert_eq!(
            BlendFactors::for_mode(BlendMode::Normal, false),
            BlendFactors {
                src: BlendFactor::SrcAlpha,
                dst: BlendFactor::OneMinusSrcAlpha
            }
        );
        assert_eq!(
            BlendFactors::for_mode(BlendMode::Normal, true).src,
            BlendFactor::One
        );
        assert_eq!(
            BlendFactors::for_mode(BlendMode::Additive, true),
            BlendFactors {
                src: BlendFactor::One,
                dst: BlendFactor::One
            }
        );
        assert_eq!(
            BlendFactors::for_mode(BlendMode::Multiply, true).src,
            BlendFactor::Dst
        );
        assert_eq!(
            BlendFactors::for_mode(BlendMode::Screen, false),
            BlendFactors {
                src: BlendFactor::One,
                dst: BlendFactor::OneMinusSrcAlpha
            }
        );
    }

    #[test]
    fn test_tracker_coalesces() {
        let mut tracker = BlendTracker::new();
        assert!(tracker.transition(BlendMode::Normal, false).is_some());
        assert!(tracker.transition(BlendMode::Normal, false).is_none());
        assert!(tracker.transition(BlendMode::Additive, false).is_some());
        assert!(tracker.transition(BlendMode::Normal, false).is_some());
        assert_eq!(tracker.current(), Some(BlendMode::Normal));
    }
}
