/// Construction-time renderer settings.
///
/// Both flags are fixed for the lifetime of a [`SkeletonRenderer`]; build a
/// new renderer to change them.
///
/// [`SkeletonRenderer`]: super::SkeletonRenderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererConfig {
    /// Textures store premultiplied alpha. Scales the primary tint's RGB by
    /// its alpha and selects `One` as the source factor for normal and
    /// additive blending.
    pub premultiplied_alpha: bool,
    /// Emit a secondary "dark" tint per vertex (12 floats per vertex instead
    /// of 8).
    pub two_color_tint: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            premultiplied_alpha: false,
            two_color_tint: true,
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn premultiplied_alpha(mut self, premultiplied_alpha: bool) -> Self {
        self.premultiplied_alpha = premultiplied_alpha;
        self
    }

    pub fn two_color_tint(mut self, two_color_tint: bool) -> Self {
        self.two_color_tint = two_color_tint;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert!(!config.premultiplied_alpha);
        assert!(config.two_color_tint);
    }

    #[test]
    fn test_builder() {
        let config = RendererConfig::new()
            .premultiplied_alpha(true)
            .two_color_tint(false);
        assert_eq!(
            config,
            RendererConfig {
                premultiplied_alpha: true,
                two_color_tint: false,
            }
        );
    }
}
