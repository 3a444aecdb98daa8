//! Per-frame updates, one strategy per preset.
//!
//! The ring mutates its color buffer on the host every frame. The star field only advances
//! scalars and forwards them as uniforms; its displacement runs in the vertex program.

use crate::animation::interp::color_factor;
use crate::foundation::core::Vec2;
use crate::frame::system::ParticleSystem;

/// Inputs shared by every updater for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Host time in seconds.
    pub time: f64,
    /// Last pointer position normalized to `[-1, 1]`, y up.
    pub pointer: Option<Vec2>,
    /// Launch progress in `[0, 1]`.
    pub progress: f32,
}

/// A per-frame mutation strategy for a [`ParticleSystem`].
pub trait FrameUpdater {
    /// Advance one frame. Must not fail: missing geometry skips the mutation.
    fn update(&mut self, system: &mut ParticleSystem, input: &FrameInput);
}

/// Ring brightness is floored here before and after the wave is added.
pub const WAVE_FLOOR: f32 = 0.02;
const WAVE_AMPLITUDE: f32 = 0.08;
const WAVE_SPEED: f64 = 1.5;
const WAVE_NUMBER: f32 = 0.008;
const NEAR_RING_MARGIN: f32 = 20.0;
const TILT: f32 = 0.1;
const CHANNEL_GAIN: f32 = 0.9;

/// Host-side ring updater: rotation, pointer tilt, and a travelling brightness wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingUpdater {
    /// Angular increment per frame about the ring's axis.
    pub rotation_speed: f32,
    /// Scaled ring radius.
    pub inner_radius: f32,
    /// Viewport scale factor.
    pub scale: f32,
    /// Whether the pointer tilts the ring.
    pub mouse_interaction: bool,
}

/// Time-varying brightness of a particle at radial `distance`, before the channel gain.
pub fn ring_brightness(distance: f32, inner_radius: f32, scale: f32, time: f64) -> f32 {
    let base = if distance <= inner_radius + NEAR_RING_MARGIN * scale {
        (-(distance - inner_radius).abs() * 0.1).exp() * 0.9
    } else {
        (-(distance - inner_radius) * 0.008).exp() * 0.7
    };
    let base = base.max(WAVE_FLOOR);
    let phase = time * WAVE_SPEED + f64::from(distance * WAVE_NUMBER);
    let wave = (phase.sin() as f32) * WAVE_AMPLITUDE;
    (base + wave).clamp(WAVE_FLOOR, 1.0)
}

impl FrameUpdater for RingUpdater {
    fn update(&mut self, system: &mut ParticleSystem, input: &FrameInput) {
        system.rotation.z += self.rotation_speed;
        if self.mouse_interaction
            && let Some(p) = input.pointer
        {
            system.rotation.x = p.y as f32 * TILT;
            system.rotation.y = p.x as f32 * TILT;
        }

        let Some(set) = system.geometry_mut() else {
            return;
        };
        let gain = CHANNEL_GAIN * color_factor(input.progress);
        for i in 0..set.len() {
            let Some([x, y, _]) = set.position(i) else {
                break;
            };
            let distance = (x * x + y * y).sqrt();
            let b = ring_brightness(distance, self.inner_radius, self.scale, input.time);
            set.set_gray(i, b * gain);
        }
    }
}

/// Time step added to the star-field clock every frame.
pub const STAR_TIME_STEP: f32 = 0.01;

/// Star-field updater: slow rotation plus uniform forwarding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarUpdater {
    /// Accumulated time forwarded to the vertex program.
    pub time: f32,
    /// Whether rotation and uniforms advance.
    pub enabled: bool,
    /// Point size multiplier.
    pub base_size: f32,
    /// Displacement strength.
    pub motion_strength: f32,
    /// Vortex strength.
    pub vortex_strength: f32,
}

impl FrameUpdater for StarUpdater {
    fn update(&mut self, system: &mut ParticleSystem, _input: &FrameInput) {
        self.time += STAR_TIME_STEP;
        if !self.enabled || system.geometry().is_none() {
            return;
        }
        system.rotation.y += 0.001;
        system.rotation.x += 0.0005;
        if let Some(u) = system.star_uniforms_mut() {
            u.time = self.time;
            u.base_size = self.base_size;
            u.motion_strength = self.motion_strength;
            u.vortex_strength = self.vortex_strength;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/updater.rs"]
mod tests;
