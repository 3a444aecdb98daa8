use crate::animation::ease::Ease;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::lerp;

/// Ease applied to the positional blend (independent of the tween's own ease).
pub const POSITION_EASE: Ease = Ease::OutCubic;

/// `1 - (1 - progress)^3`.
pub fn eased_progress(progress: f32) -> f32 {
    POSITION_EASE.apply(progress)
}

/// Blend one coordinate from `start` to `end` by eased `progress`.
pub fn interpolate(start: f32, end: f32, progress: f32) -> f32 {
    let eased = eased_progress(progress);
    if eased >= 1.0 {
        return end;
    }
    lerp(start, end, eased)
}

/// Brightness multiplier for a launch `progress`; never fully dark.
pub fn color_factor(progress: f32) -> f32 {
    0.3 + 0.7 * progress.clamp(0.0, 1.0)
}

/// Point-size multiplier for a launch `progress`.
pub fn size_factor(progress: f32) -> f32 {
    0.2 + 0.8 * progress.clamp(0.0, 1.0)
}

/// The two precomputed position sets of a launch animation and its current progress.
///
/// Both buffers hold `3 * N` coordinates and are immutable once sampled; a rebuild replaces
/// the whole state.
#[derive(Clone, Debug)]
pub struct AnimationState {
    progress: f32,
    initial_positions: Vec<f32>,
    final_positions: Vec<f32>,
}

impl AnimationState {
    /// Pair an initial and a final position set.
    pub fn new(
        initial_positions: Vec<f32>,
        final_positions: Vec<f32>,
        progress: f32,
    ) -> BackdropResult<Self> {
        if initial_positions.len() != final_positions.len() {
            return Err(BackdropError::validation(
                "initial and final position sets must have the same length",
            ));
        }
        if initial_positions.len() % 3 != 0 {
            return Err(BackdropError::validation(
                "position sets must hold xyz triples",
            ));
        }
        Ok(Self {
            progress: progress.clamp(0.0, 1.0),
            initial_positions,
            final_positions,
        })
    }

    /// Current progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Overwrite the progress, clamped to `[0, 1]`.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Pre-animation positions (compact cluster).
    pub fn initial_positions(&self) -> &[f32] {
        &self.initial_positions
    }

    /// Post-animation positions (full distribution).
    pub fn final_positions(&self) -> &[f32] {
        &self.final_positions
    }

    /// Number of particles described by the state.
    pub fn len(&self) -> usize {
        self.final_positions.len() / 3
    }

    /// `true` when the state holds no particles.
    pub fn is_empty(&self) -> bool {
        self.final_positions.is_empty()
    }

    /// Write the blended positions for the current progress into `out`.
    ///
    /// Returns `false` without touching `out` when its length does not match.
    pub fn write_positions(&self, out: &mut [f32]) -> bool {
        if out.len() != self.final_positions.len() {
            return false;
        }
        let eased = eased_progress(self.progress);
        if eased >= 1.0 {
            out.copy_from_slice(&self.final_positions);
            return true;
        }
        for ((dst, &a), &b) in out
            .iter_mut()
            .zip(&self.initial_positions)
            .zip(&self.final_positions)
        {
            *dst = lerp(a, b, eased);
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
