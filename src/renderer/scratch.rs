//! Grow-only vertex scratch buffer.

/// Flat `f32` buffer reused for every slot and every frame.
///
/// Its length is its capacity: [`VertexScratch::ensure_capacity`] replaces
/// the buffer with one of exactly the requested size when it is too small,
/// and never shrinks it.
#[derive(Debug, Clone)]
pub struct VertexScratch {
    data: Vec<f32>,
}

impl VertexScratch {
    pub fn new(initial_floats: usize) -> Self {
        Self {
            data: vec![0.0; initial_floats],
        }
    }

    /// Capacity in floats.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Make room for `floats` floats. Returns `true` when the buffer grew.
    pub fn ensure_capacity(&mut self, floats: usize) -> bool {
        if self.data.len() >= floats {
            return false;
        }
        log::debug!(
            "Growing vertex scratch buffer from {} to {} floats",
            self.data.len(),
            floats
        );
        self.data = vec![0.0; floats];
        true
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grows_to_exact_size() {
        let mut scratch = VertexScratch::new(16);
        assert!(scratch.ensure_capacity(40));
        assert_eq!(scratch.capacity(), 40);
    }

    #[test]
    fn test_never_shrinks() {
        let mut scratch = VertexScratch::new(16);
        scratch.ensure_capacity(40);
        assert!(!scratch.ensure_capacity(8));
        assert!(!scratch.ensure_capacity(40));
        assert_eq!(scratch.capacity(), 40);
    }
}
