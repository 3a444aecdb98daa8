//! Star-field instance: a static cube of stars animated entirely by the vertex program.

use rand::rngs::StdRng;

use crate::config::{StarFieldConfig, StarFieldPatch};
use crate::field::particles::ParticleSet;
use crate::field::stars::sample_stars;
use crate::foundation::core::Viewport;
use crate::foundation::error::BackdropResult;
use crate::foundation::math::seeded_rng;
use crate::frame::system::{Material, ParticleSystem, StarUniforms};
use crate::frame::updater::{FrameInput, FrameUpdater, StarUpdater};
use crate::host::container::Container;
use crate::host::event::{EventKind, HostEvent};
use crate::host::runtime::{FrameHandle, Host, ListenerHandle};
use crate::render::backend::{FrameRGBA, RenderSurface, SurfaceFactory};
use crate::render::camera::PerspectiveCamera;
use crate::viewport::scale::ViewportScale;

/// Camera distance of the star field.
pub const STAR_CAMERA_DISTANCE: f32 = 50.0;

/// A live star field bound to one container.
pub struct StarField {
    id: String,
    config: StarFieldConfig,
    scale: ViewportScale,
    camera: PerspectiveCamera,
    system: ParticleSystem,
    updater: StarUpdater,
    surface: Option<Box<dyn RenderSurface>>,
    frame: Option<FrameHandle>,
    resize_listener: Option<ListenerHandle>,
    pointer_listener: Option<ListenerHandle>,
    rng: StdRng,
    generation: u64,
    disposed: bool,
}

impl std::fmt::Debug for StarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarField")
            .field("id", &self.id)
            .field("particles", &self.system.len())
            .field("time", &self.updater.time)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl StarField {
    /// Sample the stars, create the surface, attach listeners and schedule the first frame.
    ///
    /// Nothing is registered with `host` when this fails.
    #[tracing::instrument(skip_all, fields(container = %container.id))]
    pub fn construct(
        host: &mut Host,
        container: &Container,
        config: StarFieldConfig,
        factory: &dyn SurfaceFactory,
    ) -> BackdropResult<Self> {
        config.validate()?;
        let viewport = host.viewport();
        let scale = ViewportScale::compute(viewport);
        let mut rng = seeded_rng(config.seed);
        let set = sample_stars(&mut rng, config.particle_count, config.params(), scale)?;

        let surface = factory.create(container, viewport)?;

        let resize_listener = Some(host.add_listener(EventKind::Resize));
        let pointer_listener = config
            .enable_mouse_interaction
            .then(|| host.add_listener(EventKind::PointerMove));
        let frame = Some(host.request_frame());

        tracing::info!(particles = set.len(), scale = scale.get(), "star field constructed");

        let uniforms = StarUniforms {
            time: 0.0,
            base_size: config.particle_size,
            motion_strength: config.motion_strength,
            vortex_strength: config.vortex_strength,
        };
        Ok(Self {
            id: container.id.clone(),
            scale,
            camera: PerspectiveCamera::on_axis(viewport, STAR_CAMERA_DISTANCE),
            system: ParticleSystem::new(set, Material::Stars(uniforms)),
            updater: StarUpdater {
                time: 0.0,
                enabled: config.enable_animation,
                base_size: config.particle_size,
                motion_strength: config.motion_strength,
                vortex_strength: config.vortex_strength,
            },
            surface: Some(surface),
            frame,
            resize_listener,
            pointer_listener,
            rng,
            generation: 0,
            disposed: false,
            config,
        })
    }

    /// Run one frame if due, then request the next one. Returns `true` when a frame ran.
    pub fn tick(&mut self, host: &mut Host, now: f64) -> bool {
        if self.disposed {
            return false;
        }
        let Some(frame) = self.frame else {
            return false;
        };
        if !host.take_frame(frame) {
            return false;
        }

        let input = FrameInput {
            time: now,
            pointer: None,
            progress: 1.0,
        };
        self.updater.update(&mut self.system, &input);

        if let Some(surface) = self.surface.as_mut()
            && let Err(err) = surface.render(&self.system, &self.camera, self.config.clear_color())
        {
            tracing::warn!(container = %self.id, %err, "star frame not rendered");
        }

        self.frame = Some(host.request_frame());
        true
    }

    /// React to a host event delivered to an attached listener.
    pub fn handle_event(&mut self, host: &mut Host, event: &HostEvent) {
        if self.disposed {
            return;
        }
        match event {
            HostEvent::Resize(viewport) => {
                if self
                    .resize_listener
                    .is_some_and(|h| host.is_listening(h, EventKind::Resize))
                {
                    self.resize(*viewport);
                }
            }
            HostEvent::PointerMove(p) => {
                if self
                    .pointer_listener
                    .is_some_and(|h| host.is_listening(h, EventKind::PointerMove))
                {
                    let n = host.viewport().normalized_pointer(*p);
                    let k = self.config.mouse_movement_intensity;
                    self.camera.pan_to(n.x as f32 * k, n.y as f32 * k);
                }
            }
            HostEvent::Input { .. } => {}
        }
    }

    /// Follow a viewport change: camera aspect, surface size, and a rebuild at the new scale.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        self.camera.set_viewport(viewport);
        if let Some(surface) = self.surface.as_mut()
            && let Err(err) = surface.resize(viewport)
        {
            tracing::warn!(container = %self.id, %err, "surface resize failed");
        }
        self.scale = ViewportScale::compute(viewport);
        if let Err(err) = self.rebuild() {
            tracing::warn!(container = %self.id, %err, "rebuild after resize failed");
        }
    }

    /// Apply a partial update.
    ///
    /// Count and density rebuild the stars; size only changes the uniform; the remaining
    /// options are plain field updates.
    pub fn update_options(&mut self, patch: &StarFieldPatch) -> BackdropResult<()> {
        let mut next = self.config.clone();
        if let Some(v) = patch.particle_count {
            next.particle_count = v;
        }
        if let Some(v) = patch.particle_size {
            next.particle_size = v;
        }
        if let Some(v) = patch.density {
            next.density = v;
        }
        if let Some(v) = patch.motion_strength {
            next.motion_strength = v;
        }
        if let Some(v) = patch.vortex_strength {
            next.vortex_strength = v;
        }
        if let Some(v) = patch.enable_animation {
            next.enable_animation = v;
        }
        if let Some(v) = patch.mouse_movement_intensity {
            next.mouse_movement_intensity = v;
        }
        next.validate()?;
        self.config = next;

        self.updater.enabled = self.config.enable_animation;
        self.updater.motion_strength = self.config.motion_strength;
        self.updater.vortex_strength = self.config.vortex_strength;
        self.updater.base_size = self.config.particle_size;
        if let Some(u) = self.system.star_uniforms_mut() {
            u.base_size = self.config.particle_size;
        }

        if !self.disposed && (patch.particle_count.is_some() || patch.density.is_some()) {
            self.rebuild()?;
        }
        Ok(())
    }

    fn rebuild(&mut self) -> BackdropResult<()> {
        let set = sample_stars(
            &mut self.rng,
            self.config.particle_count,
            self.config.params(),
            self.scale,
        )?;
        self.system.replace_geometry(set);
        self.generation += 1;
        tracing::debug!(
            container = %self.id,
            particles = self.system.len(),
            scale = self.scale.get(),
            generation = self.generation,
            "star field rebuilt"
        );
        Ok(())
    }

    /// Cancel the frame loop, release the surface and buffers, detach listeners. Idempotent.
    pub fn dispose(&mut self, host: &mut Host) {
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        for handle in [self.resize_listener.take(), self.pointer_listener.take()]
            .into_iter()
            .flatten()
        {
            host.remove_listener(handle);
        }
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
        }
        self.system.release();
        if !self.disposed {
            self.disposed = true;
            tracing::info!(container = %self.id, "star field disposed");
        }
    }

    /// Container id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Effective configuration.
    pub fn config(&self) -> &StarFieldConfig {
        &self.config
    }

    /// Accumulated animation time.
    pub fn time(&self) -> f32 {
        self.updater.time
    }

    /// Number of rebuilds since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Star buffers, `None` once disposed.
    pub fn particles(&self) -> Option<&ParticleSet> {
        self.system.geometry()
    }

    /// Render system (geometry, rotation, material).
    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Current camera.
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Last rendered frame.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.surface.as_ref().and_then(|s| s.last_frame())
    }

    /// `true` once disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/stars.rs"]
mod tests;
