//! Construction-time options for both presets.
//!
//! JSON mirrors the option names (`particleCount`, `innerRadius`, ...). Missing fields take
//! the defaults below.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::field::particles::component_len;
use crate::field::ring::RingParams;
use crate::field::stars::StarParams;
use crate::foundation::core::ClearColor;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Ring preset options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RingConfig {
    /// Number of particles.
    pub particle_count: usize,
    /// Ring radius before scaling.
    pub inner_radius: f32,
    /// Halo spread before scaling.
    pub scatter_intensity: f32,
    /// Core thickness before scaling.
    pub ring_sharpness: f32,
    /// Angular increment per frame.
    pub rotation_speed: f32,
    /// Pointer-driven tilt.
    pub enable_mouse_interaction: bool,
    /// Run the launch tween; when off the ring starts fully formed.
    pub enable_big_bang_animation: bool,
    /// Tween duration in seconds.
    pub animation_duration: f32,
    /// Tween delay in seconds.
    pub animation_delay: f32,
    /// Packed `0xRRGGBB` clear color.
    pub background_color: u32,
    /// Clear opacity.
    pub opacity: f32,
    /// Bind the slider panel.
    pub enable_controls: bool,
    /// Fixed sampling seed.
    pub seed: Option<u64>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            particle_count: 8000,
            inner_radius: 150.0,
            scatter_intensity: 80.0,
            ring_sharpness: 4.0,
            rotation_speed: 0.001,
            enable_mouse_interaction: true,
            enable_big_bang_animation: true,
            animation_duration: 3.0,
            animation_delay: 0.5,
            background_color: 0x000000,
            opacity: 0.1,
            enable_controls: false,
            seed: None,
        }
    }
}

impl RingConfig {
    /// Check every numeric option.
    pub fn validate(&self) -> BackdropResult<()> {
        component_len(self.particle_count)?;
        self.params().validate()?;
        finite_non_negative("animationDuration", self.animation_duration)?;
        finite_non_negative("animationDelay", self.animation_delay)?;
        if !self.rotation_speed.is_finite() {
            return Err(BackdropError::validation("rotationSpeed must be finite"));
        }
        unit_interval("opacity", self.opacity)
    }

    /// Distribution parameters.
    pub fn params(&self) -> RingParams {
        RingParams {
            inner_radius: self.inner_radius,
            scatter_intensity: self.scatter_intensity,
            ring_sharpness: self.ring_sharpness,
        }
    }

    /// Clear color.
    pub fn clear_color(&self) -> ClearColor {
        ClearColor::new(self.background_color, self.opacity)
    }

    /// Read options from container data attributes (`particle-count`, `inner-radius`, ...).
    ///
    /// Absent keys keep the defaults; unparsable values are logged and ignored. A missing
    /// `enable-mouse-interaction` or `enable-big-bang-animation` therefore leaves the flag on;
    /// only an explicit `"false"` turns it off.
    pub fn from_data_attributes(data: &BTreeMap<String, String>) -> Self {
        let mut c = Self::default();
        read_int(data, "particle-count", &mut c.particle_count);
        read_int_f32(data, "inner-radius", &mut c.inner_radius);
        read_int_f32(data, "scatter-intensity", &mut c.scatter_intensity);
        read_int_f32(data, "ring-sharpness", &mut c.ring_sharpness);
        read_color(data, "background-color", &mut c.background_color);
        read(data, "opacity", &mut c.opacity);
        read(data, "rotation-speed", &mut c.rotation_speed);
        read_flag(data, "enable-mouse-interaction", &mut c.enable_mouse_interaction);
        read_flag(data, "enable-controls", &mut c.enable_controls);
        read_flag(data, "enable-big-bang-animation", &mut c.enable_big_bang_animation);
        read(data, "animation-duration", &mut c.animation_duration);
        read(data, "animation-delay", &mut c.animation_delay);
        read_opt(data, "seed", &mut c.seed);
        c
    }

    /// Apply a partial update and report whether the particles must be resampled.
    ///
    /// Any distribution field in the patch forces a resample, even if the value is unchanged.
    pub fn apply(&mut self, patch: &RingConfigPatch) -> bool {
        set(&mut self.particle_count, patch.particle_count);
        set(&mut self.inner_radius, patch.inner_radius);
        set(&mut self.scatter_intensity, patch.scatter_intensity);
        set(&mut self.ring_sharpness, patch.ring_sharpness);
        set(&mut self.rotation_speed, patch.rotation_speed);
        set(&mut self.enable_mouse_interaction, patch.enable_mouse_interaction);
        set(&mut self.background_color, patch.background_color);
        set(&mut self.opacity, patch.opacity);
        patch.particle_count.is_some()
            || patch.inner_radius.is_some()
            || patch.scatter_intensity.is_some()
            || patch.ring_sharpness.is_some()
    }
}

/// Partial [`RingConfig`] for reconfiguration; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RingConfigPatch {
    /// New particle count.
    pub particle_count: Option<usize>,
    /// New ring radius.
    pub inner_radius: Option<f32>,
    /// New halo spread.
    pub scatter_intensity: Option<f32>,
    /// New core thickness.
    pub ring_sharpness: Option<f32>,
    /// New rotation speed.
    pub rotation_speed: Option<f32>,
    /// Toggle pointer tilt.
    pub enable_mouse_interaction: Option<bool>,
    /// New clear color.
    pub background_color: Option<u32>,
    /// New clear opacity.
    pub opacity: Option<f32>,
}

/// Star-field preset options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarFieldConfig {
    /// Number of stars.
    pub particle_count: usize,
    /// Base point size.
    pub particle_size: f32,
    /// Side of the star cube before scaling.
    pub density: f32,
    /// Displacement strength.
    pub motion_strength: f32,
    /// Vortex strength; `1.0` is neutral.
    pub vortex_strength: f32,
    /// Rotate and forward uniforms every frame.
    pub enable_animation: bool,
    /// Pointer-driven camera pan.
    pub enable_mouse_interaction: bool,
    /// Camera pan distance at the viewport edge.
    pub mouse_movement_intensity: f32,
    /// Packed `0xRRGGBB` clear color.
    pub background_color: u32,
    /// Fixed sampling seed.
    pub seed: Option<u64>,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 8000,
            particle_size: 1.2,
            density: 100.0,
            motion_strength: 1.0,
            vortex_strength: 1.0,
            enable_animation: true,
            enable_mouse_interaction: true,
            mouse_movement_intensity: 3.0,
            background_color: 0x000000,
            seed: None,
        }
    }
}

impl StarFieldConfig {
    /// Check every numeric option.
    pub fn validate(&self) -> BackdropResult<()> {
        component_len(self.particle_count)?;
        self.params().validate()?;
        finite_non_negative("motionStrength", self.motion_strength)?;
        if !self.vortex_strength.is_finite() {
            return Err(BackdropError::validation("vortexStrength must be finite"));
        }
        finite_non_negative("mouseMovementIntensity", self.mouse_movement_intensity)
    }

    /// Distribution parameters.
    pub fn params(&self) -> StarParams {
        StarParams {
            density: self.density,
            particle_size: self.particle_size,
        }
    }

    /// Clear color; the star field always clears opaque.
    pub fn clear_color(&self) -> ClearColor {
        ClearColor::new(self.background_color, 1.0)
    }

    /// Read options from container data attributes (`particle-count`, `density`, ...).
    ///
    /// Absent keys keep the defaults; unparsable values are logged and ignored.
    pub fn from_data_attributes(data: &BTreeMap<String, String>) -> Self {
        let mut c = Self::default();
        read_int(data, "particle-count", &mut c.particle_count);
        read(data, "particle-size", &mut c.particle_size);
        read_int_f32(data, "density", &mut c.density);
        read(data, "motion-strength", &mut c.motion_strength);
        read(data, "vortex-strength", &mut c.vortex_strength);
        read_flag(data, "enable-animation", &mut c.enable_animation);
        read_flag(data, "enable-mouse-interaction", &mut c.enable_mouse_interaction);
        read(data, "mouse-movement-intensity", &mut c.mouse_movement_intensity);
        read_color(data, "background-color", &mut c.background_color);
        read_opt(data, "seed", &mut c.seed);
        c
    }
}

/// Partial [`StarFieldConfig`] for `update_options`; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarFieldPatch {
    /// New star count (rebuild).
    pub particle_count: Option<usize>,
    /// New base size (uniform only).
    pub particle_size: Option<f32>,
    /// New cube side (rebuild).
    pub density: Option<f32>,
    /// New displacement strength.
    pub motion_strength: Option<f32>,
    /// New vortex strength.
    pub vortex_strength: Option<f32>,
    /// Toggle animation.
    pub enable_animation: Option<bool>,
    /// New camera pan distance.
    pub mouse_movement_intensity: Option<f32>,
}

fn set<T>(dst: &mut T, v: Option<T>) {
    if let Some(v) = v {
        *dst = v;
    }
}

fn finite_non_negative(name: &str, v: f32) -> BackdropResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(BackdropError::validation(format!(
            "{name} must be finite and >= 0 (got {v})"
        )));
    }
    Ok(())
}

fn unit_interval(name: &str, v: f32) -> BackdropResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(BackdropError::validation(format!(
            "{name} must be within [0, 1] (got {v})"
        )));
    }
    Ok(())
}

fn warn_unparsable(key: &str, raw: &str) {
    tracing::warn!(key, raw, "ignoring unparsable data attribute");
}

fn read<T: FromStr>(data: &BTreeMap<String, String>, key: &str, dst: &mut T) {
    let Some(raw) = data.get(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(v) => *dst = v,
        Err(_) => warn_unparsable(key, raw),
    }
}

fn read_opt<T: FromStr>(data: &BTreeMap<String, String>, key: &str, dst: &mut Option<T>) {
    let Some(raw) = data.get(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(v) => *dst = Some(v),
        Err(_) => warn_unparsable(key, raw),
    }
}

/// Integer attribute: a fractional value is truncated.
pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}

fn read_int(data: &BTreeMap<String, String>, key: &str, dst: &mut usize) {
    let Some(raw) = data.get(key) else {
        return;
    };
    match parse_int(raw).and_then(|v| usize::try_from(v).ok()) {
        Some(v) => *dst = v,
        None => warn_unparsable(key, raw),
    }
}

fn read_int_f32(data: &BTreeMap<String, String>, key: &str, dst: &mut f32) {
    let Some(raw) = data.get(key) else {
        return;
    };
    match parse_int(raw) {
        Some(v) => *dst = v as f32,
        None => warn_unparsable(key, raw),
    }
}

fn read_color(data: &BTreeMap<String, String>, key: &str, dst: &mut u32) {
    let Some(raw) = data.get(key) else {
        return;
    };
    let t = raw.trim();
    let parsed = match t.strip_prefix("0x").or_else(|| t.strip_prefix('#')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => parse_int(t).and_then(|v| u32::try_from(v).ok()),
    };
    match parsed {
        Some(v) => *dst = v & 0x00FF_FFFF,
        None => warn_unparsable(key, raw),
    }
}

fn read_flag(data: &BTreeMap<String, String>, key: &str, dst: &mut bool) {
    let Some(raw) = data.get(key) else {
        return;
    };
    match raw.trim() {
        "true" | "" => *dst = true,
        "false" => *dst = false,
        _ => warn_unparsable(key, raw),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
