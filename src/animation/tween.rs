use crate::animation::ease::Ease;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Lifecycle state of a [`Tween`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Waiting for the start delay to elapse.
    Delayed,
    /// Interpolating between `from` and `to`.
    Running,
    /// Reached `to`; no further updates are emitted.
    Completed,
    /// Cancelled; no further updates are emitted.
    Killed,
}

/// Time-driven scalar interpolation advanced cooperatively by the frame loop.
///
/// A tween owns no timer. The owner calls [`Tween::advance`] once per frame with the elapsed
/// time since the previous frame; the returned value is `Some` exactly when the tween produced
/// an update for that frame.
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    delay: f32,
    ease: Ease,
    elapsed: f32,
    state: TweenState,
}

impl Tween {
    /// Create a tween from `from` to `to` over `duration` seconds after `delay` seconds.
    pub fn new(from: f32, to: f32, duration: f32, delay: f32, ease: Ease) -> BackdropResult<Self> {
        if !from.is_finite() || !to.is_finite() {
            return Err(BackdropError::animation("tween endpoints must be finite"));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(BackdropError::animation(
                "tween duration must be finite and >= 0",
            ));
        }
        if !delay.is_finite() || delay < 0.0 {
            return Err(BackdropError::animation("tween delay must be finite and >= 0"));
        }
        Ok(Self {
            from,
            to,
            duration,
            delay,
            ease,
            elapsed: 0.0,
            state: if delay > 0.0 {
                TweenState::Delayed
            } else {
                TweenState::Running
            },
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TweenState {
        self.state
    }

    /// `true` while the tween may still emit updates.
    pub fn is_active(&self) -> bool {
        matches!(self.state, TweenState::Delayed | TweenState::Running)
    }

    /// Normalized time in `[0, 1]` (before easing).
    pub fn time_fraction(&self) -> f32 {
        if self.state == TweenState::Completed {
            return 1.0;
        }
        let active = (self.elapsed - self.delay).max(0.0);
        if self.duration <= 0.0 {
            return if active > 0.0 || self.state == TweenState::Running {
                1.0
            } else {
                0.0
            };
        }
        (active / self.duration).clamp(0.0, 1.0)
    }

    /// Current eased value.
    pub fn value(&self) -> f32 {
        let eased = self.ease.apply(self.time_fraction());
        self.from + (self.to - self.from) * eased
    }

    /// Advance by `dt` seconds and return the new value when an update was produced.
    ///
    /// Delayed frames, killed tweens and already completed tweens produce `None`.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.is_active() {
            return None;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;

        if self.elapsed < self.delay {
            return None;
        }
        self.state = TweenState::Running;
        if self.elapsed - self.delay >= self.duration {
            self.state = TweenState::Completed;
            return Some(self.to);
        }
        Some(self.value())
    }

    /// Stop the tween in place. Safe to call repeatedly and after completion.
    pub fn kill(&mut self) {
        if self.is_active() {
            self.state = TweenState::Killed;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
