use crate::foundation::core::{ClearColor, Viewport};
use crate::foundation::error::BackdropResult;
use crate::frame::system::ParticleSystem;
use crate::host::container::Container;
use crate::render::camera::PerspectiveCamera;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Rendering resources owned by one backdrop instance.
pub trait RenderSurface {
    /// Reallocate for a new viewport.
    fn resize(&mut self, viewport: Viewport) -> BackdropResult<()>;

    /// Clear to `clear` and draw `system` as seen through `camera`.
    fn render(
        &mut self,
        system: &ParticleSystem,
        camera: &PerspectiveCamera,
        clear: ClearColor,
    ) -> BackdropResult<()>;

    /// Most recent frame, if any was rendered.
    fn last_frame(&self) -> Option<&FrameRGBA>;

    /// Release all resources. Safe to call repeatedly.
    fn dispose(&mut self);

    /// `true` once [`RenderSurface::dispose`] ran.
    fn is_disposed(&self) -> bool;
}

/// Creates render surfaces attached to containers.
pub trait SurfaceFactory {
    /// Create a surface for `container` sized to `viewport`.
    fn create(
        &self,
        container: &Container,
        viewport: Viewport,
    ) -> BackdropResult<Box<dyn RenderSurface>>;
}
