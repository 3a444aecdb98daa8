use crate::foundation::core::Viewport;

/// Width of the layout the effect proportions were tuned against.
pub const BASELINE_WIDTH: f32 = 1366.0;
/// Height of the layout the effect proportions were tuned against.
pub const BASELINE_HEIGHT: f32 = 768.0;

/// Uniform scale factor derived from the viewport size relative to the baseline.
///
/// The factor never drops below `1.0`: small screens keep the baseline density instead of
/// shrinking the effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportScale(f32);

impl ViewportScale {
    /// Unit scale (baseline viewport or smaller).
    pub const ONE: Self = Self(1.0);

    /// Compute `max(min(w / 1366, h / 768), 1.0)`.
    pub fn compute(viewport: Viewport) -> Self {
        let sx = viewport.width as f32 / BASELINE_WIDTH;
        let sy = viewport.height as f32 / BASELINE_HEIGHT;
        Self(sx.min(sy).max(1.0))
    }

    /// Raw factor, always `>= 1.0`.
    pub fn get(self) -> f32 {
        self.0
    }

    /// Scale a spatial distribution parameter.
    pub fn apply(self, value: f32) -> f32 {
        value * self.0
    }

    /// Camera distance that keeps the apparent framing constant: `base / scale`.
    pub fn camera_distance(self, base: f32) -> f32 {
        base / self.0
    }
}

impl Default for ViewportScale {
    fn default() -> Self {
        Self::ONE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/scale.rs"]
mod tests;
