use glam::Vec3;
use vello_cpu::kurbo::Shape;

use crate::foundation::core::{ClearColor, Viewport};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::mul_div255_u8;
use crate::frame::system::{Material, ParticleSystem};
use crate::host::container::Container;
use crate::render::backend::{FrameRGBA, RenderSurface, SurfaceFactory};
use crate::render::camera::{PerspectiveCamera, model_matrix};
use crate::render::vertex::{displace, star_alpha, star_point_size};

/// Smallest drawn sprite radius in pixels.
const MIN_RADIUS_PX: f64 = 0.5;
/// Concentric discs used to approximate the soft star sprite.
const STAR_FALLOFF_STEPS: usize = 3;
const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU point-sprite rasterizer.
///
/// Sprites are drawn with `vello_cpu` onto a transparent layer, which is then added onto the
/// cleared background. Both presets blend additively against the background.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: Option<vello_cpu::Pixmap>,
    last: Option<FrameRGBA>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("disposed", &self.pixmap.is_none())
            .finish()
    }
}

fn surface_dims(viewport: Viewport) -> BackdropResult<(u16, u16)> {
    let w: u16 = viewport
        .width
        .try_into()
        .map_err(|_| BackdropError::surface("surface width exceeds u16"))?;
    let h: u16 = viewport
        .height
        .try_into()
        .map_err(|_| BackdropError::surface("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(BackdropError::surface("surface dimensions must be non-zero"));
    }
    Ok((w, h))
}

impl CpuSurface {
    /// Allocate a surface for `viewport`.
    pub fn new(viewport: Viewport) -> BackdropResult<Self> {
        let (width, height) = surface_dims(viewport)?;
        Ok(Self {
            width,
            height,
            pixmap: Some(vello_cpu::Pixmap::new(width, height)),
            last: None,
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }
}

impl RenderSurface for CpuSurface {
    fn resize(&mut self, viewport: Viewport) -> BackdropResult<()> {
        if self.pixmap.is_none() {
            return Err(BackdropError::surface("resize on a disposed surface"));
        }
        let (width, height) = surface_dims(viewport)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = Some(vello_cpu::Pixmap::new(width, height));
            self.last = None;
        }
        Ok(())
    }

    fn render(
        &mut self,
        system: &ParticleSystem,
        camera: &PerspectiveCamera,
        clear: ClearColor,
    ) -> BackdropResult<()> {
        let viewport = self.viewport();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return Err(BackdropError::surface("render on a disposed surface"));
        };

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        draw_particles(&mut ctx, system, camera, viewport);

        clear_pixmap(pixmap, [0, 0, 0, 0]);
        ctx.flush();
        ctx.render_to_pixmap(pixmap);

        let [r, g, b, a] = clear.to_rgba8();
        let bg = premul_rgba8(r, g, b, a);
        let mut data = Vec::with_capacity(pixmap.data_as_u8_slice().len());
        for _ in 0..(usize::from(self.width) * usize::from(self.height)) {
            data.extend_from_slice(&bg);
        }
        add_in_place(&mut data, pixmap.data_as_u8_slice())?;

        self.last = Some(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        });
        Ok(())
    }

    fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last.as_ref()
    }

    fn dispose(&mut self) {
        self.pixmap = None;
        self.last = None;
    }

    fn is_disposed(&self) -> bool {
        self.pixmap.is_none()
    }
}

/// Factory producing [`CpuSurface`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuSurfaceFactory;

impl SurfaceFactory for CpuSurfaceFactory {
    fn create(
        &self,
        container: &Container,
        viewport: Viewport,
    ) -> BackdropResult<Box<dyn RenderSurface>> {
        tracing::debug!(container = %container.id, ?viewport, "creating cpu surface");
        Ok(Box::new(CpuSurface::new(viewport)?))
    }
}

fn draw_particles(
    ctx: &mut vello_cpu::RenderContext,
    system: &ParticleSystem,
    camera: &PerspectiveCamera,
    viewport: Viewport,
) {
    let Some(set) = system.geometry() else {
        return;
    };
    let projector = camera.projector(camera.view() * model_matrix(system.rotation), viewport);

    for i in 0..set.len() {
        let Some([x, y, z]) = set.position(i) else {
            break;
        };
        let size = set.sizes()[i];
        let opacity = set.opacities()[i];
        match system.material {
            Material::Points {
                point_scale,
                opacity: material_opacity,
            } => {
                let Some(p) = projector.project(Vec3::new(x, y, z)) else {
                    continue;
                };
                let Some(rgb) = set.color(i) else {
                    continue;
                };
                let radius = (f64::from(size * point_scale) * 0.5).max(MIN_RADIUS_PX);
                let alpha = (opacity * material_opacity).clamp(0.0, 1.0);
                fill_disc(ctx, f64::from(p.x), f64::from(p.y), radius, rgb, alpha);
            }
            Material::Stars(u) => {
                let pos = displace(Vec3::new(x, y, z), &u);
                let Some(p) = projector.project(pos) else {
                    continue;
                };
                let diameter = f64::from(star_point_size(size, &u, p.view_z));
                draw_star(ctx, f64::from(p.x), f64::from(p.y), diameter, opacity);
            }
        }
    }
}

fn draw_star(
    ctx: &mut vello_cpu::RenderContext,
    x: f64,
    y: f64,
    diameter: f64,
    opacity: f32,
) {
    let radius = (diameter * 0.5).max(MIN_RADIUS_PX);
    // Stacked discs from the rim inwards; each adds just enough coverage to reach the sprite
    // profile at its band midpoint.
    let mut reached = 0.0_f32;
    for k in 0..STAR_FALLOFF_STEPS {
        let outer = 1.0 - k as f32 / STAR_FALLOFF_STEPS as f32;
        let mid = outer - 0.5 / STAR_FALLOFF_STEPS as f32;
        let target = star_alpha(mid * 0.5, opacity);
        if target <= reached {
            continue;
        }
        let step = 1.0 - (1.0 - target) / (1.0 - reached).max(f32::EPSILON);
        fill_disc(ctx, x, y, radius * f64::from(outer), [1.0, 1.0, 1.0], step);
        reached = target;
    }
}

fn fill_disc(
    ctx: &mut vello_cpu::RenderContext,
    x: f64,
    y: f64,
    radius: f64,
    rgb: [f32; 3],
    alpha: f32,
) {
    if alpha <= 0.0 || !x.is_finite() || !y.is_finite() {
        return;
    }
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        channel(rgb[0]),
        channel(rgb[1]),
        channel(rgb[2]),
        channel(alpha),
    ));
    let circle = vello_cpu::kurbo::Circle::new((x, y), radius);
    ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

/// Saturating premultiplied add of `src` onto `dst`.
fn add_in_place(dst: &mut [u8], src: &[u8]) -> BackdropResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BackdropError::surface(
            "add_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.iter_mut().zip(src) {
        *d = d.saturating_add(*s);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
