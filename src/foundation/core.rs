use crate::foundation::error::{BackdropError, BackdropResult};

pub use kurbo::{Point, Vec2};

/// Absolute 0-based index of a rendered frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> BackdropResult<Self> {
        if den == 0 {
            return Err(BackdropError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BackdropError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Size of the hosting viewport in CSS-like pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a validated viewport with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> BackdropResult<Self> {
        if width == 0 || height == 0 {
            return Err(BackdropError::validation(
                "viewport dimensions must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width divided by height.
    pub fn aspect(self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Map a pointer position in viewport pixels to `[-1, 1]` on both axes, y pointing up.
    pub fn normalized_pointer(self, p: Point) -> Vec2 {
        let w = f64::from(self.width.max(1));
        let h = f64::from(self.height.max(1));
        Vec2::new((p.x / w) * 2.0 - 1.0, -(p.y / h) * 2.0 + 1.0)
    }
}

/// Straight-alpha clear color: a packed `0xRRGGBB` value plus an opacity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClearColor {
    /// Packed `0xRRGGBB`.
    pub rgb: u32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl ClearColor {
    /// Build a clear color from a packed RGB value and an opacity.
    pub fn new(rgb: u32, opacity: f32) -> Self {
        Self {
            rgb: rgb & 0x00FF_FFFF,
            opacity,
        }
    }

    /// Straight-alpha RGBA8 bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        let r = ((self.rgb >> 16) & 0xFF) as u8;
        let g = ((self.rgb >> 8) & 0xFF) as u8;
        let b = (self.rgb & 0xFF) as u8;
        let a = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        [r, g, b, a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
