//! Per-slot color compositing.

use crate::color::Color;

/// Primary tint: skeleton, slot and attachment colors multiplied together,
/// with RGB then scaled by alpha when `premultiplied_alpha` is set.
pub fn light_color(
    skeleton: Color,
    slot: Color,
    attachment: Color,
    premultiplied_alpha: bool,
) -> Color {
    let color = skeleton * slot * attachment;
    if premultiplied_alpha {
        color.premultiplied()
    } else {
        color
    }
}

/// Secondary tint: the slot's dark color, or opaque black without one.
/// Never premultiplied.
pub fn dark_color(slot_dark: Option<Color>) -> Color {
    slot_dark.unwrap_or(Color::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_alpha() {
        let c = light_color(
            Color::WHITE,
            Color::rgba(1.0, 1.0, 1.0, 0.5),
            Color::WHITE,
            false,
        );
        assert_eq!(c, Color::rgba(1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn test_premultiplied_alpha() {
        let c = light_color(
            Color::WHITE,
            Color::rgba(1.0, 1.0, 1.0, 0.5),
            Color::WHITE,
            true,
        );
        assert_eq!(c, Color::rgba(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_three_sources_multiply() {
        let c = light_color(
            Color::rgba(0.5, 1.0, 1.0, 1.0),
            Color::rgba(1.0, 0.5, 1.0, 1.0),
            Color::rgba(1.0, 1.0, 0.5, 0.5),
            false,
        );
        assert_eq!(c, Color::rgba(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_dark_defaults_to_opaque_black() {
        assert_eq!(dark_color(None), Color::rgba(0.0, 0.0, 0.0, 1.0));
        let dark = Color::rgba(0.2, 0.4, 0.6, 0.5);
        assert_eq!(dark_color(Some(dark)), dark);
    }
}
