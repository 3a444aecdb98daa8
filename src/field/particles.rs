use crate::foundation::error::{BackdropError, BackdropResult};

/// Largest particle count a set may hold.
pub const MAX_PARTICLES: usize = 1_000_000;

/// Check `count` against [`MAX_PARTICLES`] and return the length of a 3-component buffer.
pub fn component_len(count: usize) -> BackdropResult<usize> {
    if count > MAX_PARTICLES {
        return Err(BackdropError::validation(format!(
            "particleCount must be <= {MAX_PARTICLES}, got {count}"
        )));
    }
    count
        .checked_mul(3)
        .ok_or_else(|| BackdropError::validation("particleCount overflows buffer length"))
}

/// Fixed-size, index-aligned particle attribute buffers.
///
/// Particle `i` owns `positions[3i..3i+3]`, `colors[3i..3i+3]`, `sizes[i]` and
/// `opacities[i]`. The count is fixed at construction; a different count means a new set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleSet {
    pub(crate) positions: Vec<f32>,
    pub(crate) colors: Vec<f32>,
    pub(crate) sizes: Vec<f32>,
    pub(crate) opacities: Vec<f32>,
}

impl ParticleSet {
    /// Allocate a zeroed set of `count` particles with full opacity.
    pub fn zeroed(count: usize) -> BackdropResult<Self> {
        let len = component_len(count)?;
        Ok(Self {
            positions: vec![0.0; len],
            colors: vec![0.0; len],
            sizes: vec![0.0; count],
            opacities: vec![1.0; count],
        })
    }

    /// Assemble a set from prebuilt buffers, checking the alignment invariant.
    pub fn from_parts(
        positions: Vec<f32>,
        colors: Vec<f32>,
        sizes: Vec<f32>,
        opacities: Vec<f32>,
    ) -> BackdropResult<Self> {
        let n = sizes.len();
        if positions.len() != n * 3 || colors.len() != n * 3 || opacities.len() != n {
            return Err(BackdropError::validation(format!(
                "misaligned particle buffers: positions={}, colors={}, sizes={}, opacities={}",
                positions.len(),
                colors.len(),
                sizes.len(),
                opacities.len()
            )));
        }
        Ok(Self {
            positions,
            colors,
            sizes,
            opacities,
        })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// `true` when the set holds no particles.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Flat xyz positions, `3 * len()` entries.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat rgb colors, `3 * len()` entries.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Point sizes, `len()` entries.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Per-particle base opacity, `len()` entries.
    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Position of particle `i`.
    pub fn position(&self, i: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(i * 3..i * 3 + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Color of particle `i`.
    pub fn color(&self, i: usize) -> Option<[f32; 3]> {
        let c = self.colors.get(i * 3..i * 3 + 3)?;
        Some([c[0], c[1], c[2]])
    }

    /// Write a grayscale intensity into all three color channels of particle `i`.
    pub(crate) fn set_gray(&mut self, i: usize, v: f32) {
        if let Some(c) = self.colors.get_mut(i * 3..i * 3 + 3) {
            c.fill(v);
        }
    }

    /// Check the alignment invariant.
    pub fn is_aligned(&self) -> bool {
        let n = self.sizes.len();
        self.positions.len() == n * 3 && self.colors.len() == n * 3 && self.opacities.len() == n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/particles.rs"]
mod tests;
