//! Volumetric preset: a uniform cube of stars, animated later by the vertex program.

use rand::Rng;

use crate::field::particles::{ParticleSet, component_len};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::centered;
use crate::viewport::scale::ViewportScale;

/// Unscaled star-field distribution parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarParams {
    /// Side length of the cube the stars are spread in.
    pub density: f32,
    /// Base point size.
    pub particle_size: f32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            density: 100.0,
            particle_size: 1.2,
        }
    }
}

impl StarParams {
    /// `density` must be finite and `>= 0`, `particle_size` finite and `> 0`.
    pub fn validate(&self) -> BackdropResult<()> {
        if !self.density.is_finite() || self.density < 0.0 {
            return Err(BackdropError::validation(format!(
                "density must be finite and >= 0 (got {})",
                self.density
            )));
        }
        if !self.particle_size.is_finite() || self.particle_size <= 0.0 {
            return Err(BackdropError::validation(format!(
                "particleSize must be finite and > 0 (got {})",
                self.particle_size
            )));
        }
        Ok(())
    }
}

/// Sample `count` stars uniformly inside a cube of side `density * scale`.
///
/// Colors are white; sizes fall in `[0.2, 1.0) * particle_size` and opacities in
/// `[0.2, 1.0)`.
#[tracing::instrument(skip(rng))]
pub fn sample_stars<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    params: StarParams,
    scale: ViewportScale,
) -> BackdropResult<ParticleSet> {
    params.validate()?;
    let len = component_len(count)?;
    let spread = scale.apply(params.density);
    let ps = params.particle_size;

    let mut positions = Vec::with_capacity(len);
    let mut sizes = Vec::with_capacity(count);
    let mut opacities = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push(centered(rng) * spread);
        positions.push(centered(rng) * spread);
        positions.push(centered(rng) * spread);
        sizes.push(rng.r#gen::<f32>() * ps * 0.8 + ps * 0.2);
        opacities.push(rng.r#gen::<f32>() * 0.8 + 0.2);
    }

    ParticleSet::from_parts(positions, vec![1.0; len], sizes, opacities)
}

#[cfg(test)]
#[path = "../../tests/unit/field/stars.rs"]
mod tests;
