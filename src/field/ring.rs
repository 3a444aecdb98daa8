//! Ring preset: a bright, tight ring with a soft exponentially fading halo.

use std::f32::consts::TAU;

use rand::Rng;

use crate::animation::interp::{AnimationState, color_factor, size_factor};
use crate::field::particles::{ParticleSet, component_len};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::centered;
use crate::viewport::scale::ViewportScale;

/// Probability that a particle lands in the ring core.
pub const CORE_FRACTION: f32 = 0.15;
/// Probability, within the scatter population, of the near/medium exponential branch.
pub const NEAR_SCATTER_FRACTION: f32 = 0.7;
/// Radius of the compact pre-launch cluster at unit scale.
pub const INITIAL_CLUSTER_RADIUS: f32 = 25.0;
/// Floor applied to the scaled scatter intensity before it is used as a divisor.
pub const MIN_SCATTER: f32 = 1e-3;
/// Opacity of the ring point material.
pub const RING_OPACITY: f32 = 0.95;

const EXP_LAMBDA: f32 = 2.0;
const EXP_CLAMP: f32 = 4.0;
const NEAR_SPREAD: f32 = 0.8;
const FAR_SPREAD: f32 = 1.5;
const HALO_INTENSITY: f32 = 0.9;
const FADE_RATE: f32 = 2.5;
const FADE_PEAK: f32 = 0.7;
const FADE_FLOOR: f32 = 0.03;
const SIZE_FADE_RATE: f32 = 1.8;

/// Which branch of the distribution produced a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingBand {
    /// Ring core, full intensity.
    Core,
    /// Near/medium scatter (exponential draw).
    Near,
    /// Medium/far scatter (uniform draw).
    Far,
}

/// Unscaled ring distribution parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingParams {
    /// Radius of the ring core.
    pub inner_radius: f32,
    /// Spread of the halo.
    pub scatter_intensity: f32,
    /// Thickness of the ring core.
    pub ring_sharpness: f32,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            inner_radius: 150.0,
            scatter_intensity: 80.0,
            ring_sharpness: 4.0,
        }
    }
}

impl RingParams {
    /// Check that every parameter is finite and non-negative.
    pub fn validate(&self) -> BackdropResult<()> {
        for (name, v) in [
            ("innerRadius", self.inner_radius),
            ("scatterIntensity", self.scatter_intensity),
            ("ringSharpness", self.ring_sharpness),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(BackdropError::validation(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// Apply the viewport scale to every spatial parameter.
    pub fn scaled(&self, scale: ViewportScale) -> ScaledRingParams {
        ScaledRingParams {
            inner_radius: scale.apply(self.inner_radius),
            scatter_intensity: scale.apply(self.scatter_intensity).max(MIN_SCATTER),
            ring_sharpness: scale.apply(self.ring_sharpness),
            scale: scale.get(),
        }
    }
}

/// Ring parameters after viewport scaling; `scatter_intensity` is floored at [`MIN_SCATTER`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledRingParams {
    /// Scaled core radius.
    pub inner_radius: f32,
    /// Scaled, floored halo spread.
    pub scatter_intensity: f32,
    /// Scaled core thickness.
    pub ring_sharpness: f32,
    /// The scale factor itself, used for jitter and the initial cluster.
    pub scale: f32,
}

/// One sampled ring particle before progress scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSample {
    /// Distribution branch.
    pub band: RingBand,
    /// Radial distance from the center before jitter.
    pub distance: f32,
    /// Brightness derived from `distance`.
    pub intensity: f32,
    /// Post-launch position.
    pub final_position: [f32; 3],
    /// Pre-launch position inside the compact cluster.
    pub initial_position: [f32; 3],
    /// Grayscale color before progress scaling, in `[0, 1]`.
    pub base_color: f32,
    /// Point size before progress scaling, `> 0`.
    pub base_size: f32,
}

/// Draw the radial distance and its band.
fn sample_distance<R: Rng + ?Sized>(rng: &mut R, p: &ScaledRingParams) -> (RingBand, f32) {
    if rng.r#gen::<f32>() < CORE_FRACTION {
        let d = p.inner_radius + centered(rng) * p.ring_sharpness;
        return (RingBand::Core, d);
    }

    let base = p.inner_radius + p.ring_sharpness * 0.5;
    if rng.r#gen::<f32>() < NEAR_SCATTER_FRACTION {
        let u: f32 = rng.r#gen();
        let exp = -(1.0 - u).ln() / EXP_LAMBDA;
        let normalized = exp.min(EXP_CLAMP) / EXP_CLAMP;
        (
            RingBand::Near,
            base + normalized * p.scatter_intensity * NEAR_SPREAD,
        )
    } else {
        let extended = rng.r#gen::<f32>() * p.scatter_intensity * FAR_SPREAD;
        (RingBand::Far, base + extended)
    }
}

/// Intensity of a scatter particle at `distance`.
pub(crate) fn halo_intensity(distance: f32, p: &ScaledRingParams) -> f32 {
    let fade = distance - p.inner_radius;
    if fade <= p.ring_sharpness {
        return HALO_INTENSITY;
    }
    let relative = (fade - p.ring_sharpness) / p.scatter_intensity;
    ((-relative * FADE_RATE).exp() * FADE_PEAK).max(FADE_FLOOR)
}

fn base_size(distance: f32, intensity: f32, u: f32, p: &ScaledRingParams) -> f32 {
    let from_ring = (distance - p.inner_radius).abs();
    if from_ring <= p.ring_sharpness {
        (1.0 + u * 0.3) * intensity + 0.7
    } else {
        let relative = (from_ring - p.ring_sharpness) / p.scatter_intensity;
        (0.3 + u * 0.5) * intensity * (-relative * SIZE_FADE_RATE).exp() + 0.1
    }
}

/// Sample a single particle.
pub fn sample_particle<R: Rng + ?Sized>(rng: &mut R, p: &ScaledRingParams) -> RingSample {
    let angle = rng.r#gen::<f32>() * TAU;
    let (band, distance) = sample_distance(rng, p);
    let intensity = match band {
        RingBand::Core => 1.0,
        RingBand::Near | RingBand::Far => halo_intensity(distance, p),
    };

    let jitter_x = centered(rng) * p.scale;
    let jitter_y = centered(rng) * p.scale;
    let final_position = [
        angle.cos() * distance + jitter_x,
        angle.sin() * distance + jitter_y,
        centered(rng) * 2.0 * p.scale,
    ];

    let cluster = INITIAL_CLUSTER_RADIUS * p.scale;
    let initial_angle = rng.r#gen::<f32>() * TAU;
    let initial_distance = rng.r#gen::<f32>().sqrt() * cluster;
    let initial_position = [
        initial_angle.cos() * initial_distance,
        initial_angle.sin() * initial_distance,
        centered(rng) * 2.0 * p.scale,
    ];

    let base_color = (intensity * (0.95 + rng.r#gen::<f32>() * 0.05)).clamp(0.0, 1.0);
    let base_size = base_size(distance, intensity, rng.r#gen(), p);

    RingSample {
        band,
        distance,
        intensity,
        final_position,
        initial_position,
        base_color,
        base_size,
    }
}

/// Everything needed to replay the launch onto a [`ParticleSet`].
#[derive(Clone, Debug)]
pub struct RingLaunch {
    pub(crate) animation: AnimationState,
    pub(crate) base_colors: Vec<f32>,
    pub(crate) base_sizes: Vec<f32>,
}

impl RingLaunch {
    /// Launch animation state.
    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Current launch progress.
    pub fn progress(&self) -> f32 {
        self.animation.progress()
    }

    /// Blend positions and rescale color/size of `set` for `progress`.
    ///
    /// Returns `false` and leaves `set` untouched when the set's count does not match.
    pub fn apply(&mut self, progress: f32, set: &mut ParticleSet) -> bool {
        if set.len() != self.base_sizes.len() || !set.is_aligned() {
            return false;
        }
        self.animation.set_progress(progress);
        let p = self.animation.progress();
        self.animation.write_positions(&mut set.positions);

        let cf = color_factor(p);
        let sf = size_factor(p);
        for (i, (&c, &s)) in self.base_colors.iter().zip(&self.base_sizes).enumerate() {
            set.set_gray(i, c * cf);
            set.sizes[i] = s * sf;
        }
        true
    }
}

/// A sampled ring: live buffers plus the launch data and per-particle diagnostics.
#[derive(Clone, Debug)]
pub struct RingField {
    pub(crate) set: ParticleSet,
    pub(crate) launch: RingLaunch,
    pub(crate) distances: Vec<f32>,
    pub(crate) bands: Vec<RingBand>,
    pub(crate) params: ScaledRingParams,
}

impl RingField {
    /// Sample `count` particles and apply `progress` to the live buffers.
    #[tracing::instrument(skip(rng))]
    pub fn sample<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        params: RingParams,
        scale: ViewportScale,
        progress: f32,
    ) -> BackdropResult<Self> {
        params.validate()?;
        let len = component_len(count)?;
        let scaled = params.scaled(scale);

        let mut initial = Vec::with_capacity(len);
        let mut finals = Vec::with_capacity(len);
        let mut base_colors = Vec::with_capacity(count);
        let mut base_sizes = Vec::with_capacity(count);
        let mut distances = Vec::with_capacity(count);
        let mut bands = Vec::with_capacity(count);

        for _ in 0..count {
            let s = sample_particle(rng, &scaled);
            initial.extend_from_slice(&s.initial_position);
            finals.extend_from_slice(&s.final_position);
            base_colors.push(s.base_color);
            base_sizes.push(s.base_size);
            distances.push(s.distance);
            bands.push(s.band);
        }

        let mut set = ParticleSet::zeroed(count)?;
        set.opacities.fill(RING_OPACITY);
        let mut launch = RingLaunch {
            animation: AnimationState::new(initial, finals, progress)?,
            base_colors,
            base_sizes,
        };
        launch.apply(progress, &mut set);
        Ok(Self {
            set,
            launch,
            distances,
            bands,
            params: scaled,
        })
    }

    /// Blend positions and rescale color/size for `progress`.
    pub fn apply_progress(&mut self, progress: f32) {
        self.launch.apply(progress, &mut self.set);
    }

    /// Live particle buffers.
    pub fn particles(&self) -> &ParticleSet {
        &self.set
    }

    /// Launch data.
    pub fn launch(&self) -> &RingLaunch {
        &self.launch
    }

    /// Sampled radial distances (before jitter).
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Distribution band of every particle.
    pub fn bands(&self) -> &[RingBand] {
        &self.bands
    }

    /// Scaled parameters the field was sampled with.
    pub fn params(&self) -> ScaledRingParams {
        self.params
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// `true` when the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Split into the live buffers (handed to the render system) and the launch data.
    pub fn into_parts(self) -> (ParticleSet, RingLaunch) {
        (self.set, self.launch)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/ring.rs"]
mod tests;
