//! Ring instance: owns the sampled field, its launch tween, the render surface, the frame loop
//! and the event listeners of one container.

use rand::rngs::StdRng;

use crate::animation::ease::Ease;
use crate::animation::tween::{Tween, TweenState};
use crate::component::controls::RingControls;
use crate::config::{RingConfig, RingConfigPatch};
use crate::field::particles::ParticleSet;
use crate::field::ring::{RING_OPACITY, RingField, RingLaunch};
use crate::foundation::core::{Vec2, Viewport};
use crate::foundation::error::BackdropResult;
use crate::foundation::math::seeded_rng;
use crate::frame::system::{Material, ParticleSystem};
use crate::frame::updater::{FrameInput, FrameUpdater, RingUpdater};
use crate::host::container::{Container, ControlPanel};
use crate::host::event::{EventKind, HostEvent};
use crate::host::runtime::{FrameHandle, Host, ListenerHandle};
use crate::render::backend::{FrameRGBA, RenderSurface, SurfaceFactory};
use crate::render::camera::PerspectiveCamera;
use crate::viewport::scale::ViewportScale;

/// Camera distance at scale 1.
pub const RING_CAMERA_DISTANCE: f32 = 500.0;
/// Ease of the launch tween driving progress.
pub const LAUNCH_EASE: Ease = Ease::OutCubic;

/// A live ring bound to one container.
pub struct ParticleRing {
    id: String,
    config: RingConfig,
    viewport: Viewport,
    scale: ViewportScale,
    camera: PerspectiveCamera,
    system: ParticleSystem,
    launch: Option<RingLaunch>,
    tween: Option<Tween>,
    progress: f32,
    updater: RingUpdater,
    surface: Option<Box<dyn RenderSurface>>,
    frame: Option<FrameHandle>,
    resize_listener: Option<ListenerHandle>,
    pointer_listener: Option<ListenerHandle>,
    controls: Option<RingControls>,
    rng: StdRng,
    generation: u64,
    pointer: Option<Vec2>,
    started_at: Option<f64>,
    last_tick: Option<f64>,
    disposed: bool,
}

impl std::fmt::Debug for ParticleRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleRing")
            .field("id", &self.id)
            .field("particles", &self.system.len())
            .field("progress", &self.progress)
            .field("generation", &self.generation)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl ParticleRing {
    /// Sample the ring, create its surface, attach listeners and schedule the first frame.
    ///
    /// Nothing is registered with `host` when this fails.
    #[tracing::instrument(skip_all, fields(container = %container.id))]
    pub fn construct(
        host: &mut Host,
        container: &Container,
        config: RingConfig,
        factory: &dyn SurfaceFactory,
    ) -> BackdropResult<Self> {
        config.validate()?;
        let viewport = host.viewport();
        let scale = ViewportScale::compute(viewport);

        let (tween, progress) = if config.enable_big_bang_animation {
            let tween = Tween::new(
                0.0,
                1.0,
                config.animation_duration,
                config.animation_delay,
                LAUNCH_EASE,
            )?;
            (Some(tween), 0.0)
        } else {
            (None, 1.0)
        };

        let mut rng = seeded_rng(config.seed);
        let field = RingField::sample(
            &mut rng,
            config.particle_count,
            config.params(),
            scale,
            progress,
        )?;
        let (set, launch) = field.into_parts();

        let surface = factory.create(container, viewport)?;

        let resize_listener = Some(host.add_listener(EventKind::Resize));
        let pointer_listener = config
            .enable_mouse_interaction
            .then(|| host.add_listener(EventKind::PointerMove));
        let controls = config
            .enable_controls
            .then(|| RingControls::bind(host, container.controls.clone()));
        let frame = Some(host.request_frame());

        tracing::info!(
            particles = set.len(),
            scale = scale.get(),
            animated = tween.is_some(),
            "particle ring constructed"
        );

        Ok(Self {
            id: container.id.clone(),
            viewport,
            scale,
            camera: PerspectiveCamera::on_axis(
                viewport,
                scale.camera_distance(RING_CAMERA_DISTANCE),
            ),
            system: ParticleSystem::new(
                set,
                Material::Points {
                    point_scale: scale.get(),
                    opacity: RING_OPACITY,
                },
            ),
            launch: Some(launch),
            tween,
            progress,
            updater: RingUpdater {
                rotation_speed: config.rotation_speed,
                inner_radius: scale.apply(config.inner_radius),
                scale: scale.get(),
                mouse_interaction: config.enable_mouse_interaction,
            },
            surface: Some(surface),
            frame,
            resize_listener,
            pointer_listener,
            controls,
            rng,
            generation: 0,
            pointer: None,
            started_at: None,
            last_tick: None,
            disposed: false,
            config,
        })
    }

    /// Run one frame if this instance's frame request is due, then request the next one.
    ///
    /// `now` is host time in seconds. Returns `true` when a frame ran.
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

        let dt = self.last_tick.map_or(0.0, |last| (now - last).max(0.0));
        self.last_tick = Some(now);
        let started = *self.started_at.get_or_insert(now);

        if let Some(tween) = self.tween.as_mut()
            && let Some(p) = tween.advance(dt as f32)
        {
            self.progress = p;
            if let (Some(launch), Some(set)) = (self.launch.as_mut(), self.system.geometry_mut()) {
                launch.apply(p, set);
            }
        }

        let input = FrameInput {
            time: now - started,
            pointer: self.pointer,
            progress: self.progress,
        };
        self.updater.update(&mut self.system, &input);

        if let Some(surface) = self.surface.as_mut()
            && let Err(err) = surface.render(&self.system, &self.camera, self.config.clear_color())
        {
            tracing::warn!(container = %self.id, %err, "ring frame not rendered");
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
                if self.listening(host, self.resize_listener, EventKind::Resize) {
                    self.resize(*viewport);
                }
            }
            HostEvent::PointerMove(p) => {
                if self.listening(host, self.pointer_listener, EventKind::PointerMove) {
                    self.pointer = Some(host.viewport().normalized_pointer(*p));
                }
            }
            HostEvent::Input { target, value } => self.handle_input(host, target, value),
        }
    }

    fn listening(&self, host: &Host, handle: Option<ListenerHandle>, kind: EventKind) -> bool {
        handle.is_some_and(|h| host.is_listening(h, kind))
    }

    fn handle_input(&mut self, host: &Host, target: &str, raw: &str) {
        let Some(controls) = self.controls.as_mut() else {
            return;
        };
        let Some((control, value)) = controls.resolve(host, target, raw) else {
            return;
        };
        let Some(patch) = control.patch(value) else {
            tracing::warn!(?control, value, "rejected slider value");
            return;
        };
        match self.reconfigure(&patch) {
            Ok(()) => {
                if let Some(controls) = self.controls.as_mut() {
                    controls.show(control, value);
                }
            }
            Err(err) => tracing::warn!(?control, value, %err, "rejected slider value"),
        }
    }

    /// Recompute the scale for `viewport`, resize the surface and resample everything.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        self.viewport = viewport;
        self.scale = ViewportScale::compute(viewport);
        self.camera = PerspectiveCamera::on_axis(
            viewport,
            self.scale.camera_distance(RING_CAMERA_DISTANCE),
        );
        if let Material::Points { point_scale, .. } = &mut self.system.material {
            *point_scale = self.scale.get();
        }
        if let Some(surface) = self.surface.as_mut()
            && let Err(err) = surface.resize(viewport)
        {
            tracing::warn!(container = %self.id, %err, "surface resize failed");
        }
        if let Err(err) = self.resample() {
            tracing::warn!(container = %self.id, %err, "resample after resize failed");
        }
    }

    /// Apply a partial configuration; distribution changes resample the whole set.
    ///
    /// The patch is validated before anything changes.
    pub fn reconfigure(&mut self, patch: &RingConfigPatch) -> BackdropResult<()> {
        let mut next = self.config.clone();
        let resample = next.apply(patch);
        next.validate()?;
        self.config = next;
        self.updater.rotation_speed = self.config.rotation_speed;
        self.updater.mouse_interaction = self.config.enable_mouse_interaction;
        if self.disposed || !resample {
            return Ok(());
        }
        self.resample()
    }

    /// Resample with a new particle count.
    pub fn update_particle_count(&mut self, count: usize) -> BackdropResult<()> {
        self.reconfigure(&RingConfigPatch {
            particle_count: Some(count),
            ..RingConfigPatch::default()
        })
    }

    /// Resample with a new ring radius.
    pub fn update_inner_radius(&mut self, radius: f32) -> BackdropResult<()> {
        self.reconfigure(&RingConfigPatch {
            inner_radius: Some(radius),
            ..RingConfigPatch::default()
        })
    }

    /// Resample with a new halo spread.
    pub fn update_scatter_intensity(&mut self, intensity: f32) -> BackdropResult<()> {
        self.reconfigure(&RingConfigPatch {
            scatter_intensity: Some(intensity),
            ..RingConfigPatch::default()
        })
    }

    /// Resample with a new core thickness.
    pub fn update_ring_sharpness(&mut self, sharpness: f32) -> BackdropResult<()> {
        self.reconfigure(&RingConfigPatch {
            ring_sharpness: Some(sharpness),
            ..RingConfigPatch::default()
        })
    }

    fn resample(&mut self) -> BackdropResult<()> {
        let field = RingField::sample(
            &mut self.rng,
            self.config.particle_count,
            self.config.params(),
            self.scale,
            self.progress,
        )?;
        let (set, launch) = field.into_parts();
        self.system.replace_geometry(set);
        self.launch = Some(launch);
        self.updater.inner_radius = self.scale.apply(self.config.inner_radius);
        self.updater.scale = self.scale.get();
        self.generation += 1;
        tracing::debug!(
            container = %self.id,
            particles = self.system.len(),
            scale = self.scale.get(),
            generation = self.generation,
            "ring resampled"
        );
        Ok(())
    }

    /// Cancel the frame loop, kill the tween, release the surface and buffers and detach every
    /// listener. Safe to call repeatedly.
    pub fn dispose(&mut self, host: &mut Host) {
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        if let Some(tween) = self.tween.as_mut() {
            tween.kill();
        }
        for handle in [self.resize_listener.take(), self.pointer_listener.take()]
            .into_iter()
            .flatten()
        {
            host.remove_listener(handle);
        }
        if let Some(controls) = self.controls.as_mut() {
            controls.unbind(host);
        }
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
        }
        self.system.release();
        self.launch = None;
        if !self.disposed {
            self.disposed = true;
            tracing::info!(container = %self.id, "particle ring disposed");
        }
    }

    /// Container id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Effective configuration.
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Launch progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// State of the launch tween, `None` when the launch is disabled.
    pub fn tween_state(&self) -> Option<TweenState> {
        self.tween.as_ref().map(Tween::state)
    }

    /// Number of resamples since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live particle buffers, `None` once disposed.
    pub fn particles(&self) -> Option<&ParticleSet> {
        self.system.geometry()
    }

    /// Launch data of the current set, `None` once disposed.
    pub fn launch(&self) -> Option<&RingLaunch> {
        self.launch.as_ref()
    }

    /// Render system (geometry, rotation, material).
    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Current viewport scale.
    pub fn scale(&self) -> ViewportScale {
        self.scale
    }

    /// Current camera.
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Bound control elements, when controls are enabled.
    pub fn controls(&self) -> Option<&ControlPanel> {
        self.controls.as_ref().map(RingControls::panel)
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
#[path = "../../tests/unit/component/ring.rs"]
mod tests;
