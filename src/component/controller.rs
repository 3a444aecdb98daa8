//! Page-level lifecycle service.
//!
//! One controller owns every backdrop instance on the current page, keyed by container id. It
//! is constructed explicitly and torn down with [`BackdropController::destroy`].

use std::collections::BTreeMap;

use crate::component::ring::ParticleRing;
use crate::component::stars::StarField;
use crate::config::{RingConfig, StarFieldConfig};
use crate::foundation::error::BackdropResult;
use crate::host::container::{Container, ContainerKind};
use crate::host::event::{HostEvent, PageSignal};
use crate::host::runtime::Host;
use crate::render::backend::{FrameRGBA, SurfaceFactory};

/// A constructed instance of either preset.
#[derive(Debug)]
pub enum Backdrop {
    /// Light ring.
    Ring(ParticleRing),
    /// Star field.
    Stars(StarField),
}

impl Backdrop {
    fn construct(
        host: &mut Host,
        container: &Container,
        factory: &dyn SurfaceFactory,
    ) -> BackdropResult<Self> {
        Ok(match container.kind {
            ContainerKind::Ring => {
                let config = RingConfig::from_data_attributes(&container.data);
                Self::Ring(ParticleRing::construct(host, container, config, factory)?)
            }
            ContainerKind::Stars => {
                let config = StarFieldConfig::from_data_attributes(&container.data);
                Self::Stars(StarField::construct(host, container, config, factory)?)
            }
        })
    }

    /// Container id.
    pub fn id(&self) -> &str {
        match self {
            Self::Ring(r) => r.id(),
            Self::Stars(s) => s.id(),
        }
    }

    /// Run a due frame.
    pub fn tick(&mut self, host: &mut Host, now: f64) -> bool {
        match self {
            Self::Ring(r) => r.tick(host, now),
            Self::Stars(s) => s.tick(host, now),
        }
    }

    /// Forward a host event.
    pub fn handle_event(&mut self, host: &mut Host, event: &HostEvent) {
        match self {
            Self::Ring(r) => r.handle_event(host, event),
            Self::Stars(s) => s.handle_event(host, event),
        }
    }

    /// Tear down. Idempotent.
    pub fn dispose(&mut self, host: &mut Host) {
        match self {
            Self::Ring(r) => r.dispose(host),
            Self::Stars(s) => s.dispose(host),
        }
    }

    /// Particle count, `0` once disposed.
    pub fn particle_count(&self) -> usize {
        match self {
            Self::Ring(r) => r.system().len(),
            Self::Stars(s) => s.system().len(),
        }
    }

    /// Last rendered frame.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        match self {
            Self::Ring(r) => r.last_frame(),
            Self::Stars(s) => s.last_frame(),
        }
    }

    /// The ring, if this is one.
    pub fn as_ring(&self) -> Option<&ParticleRing> {
        match self {
            Self::Ring(r) => Some(r),
            Self::Stars(_) => None,
        }
    }

    /// Mutable ring, if this is one.
    pub fn as_ring_mut(&mut self) -> Option<&mut ParticleRing> {
        match self {
            Self::Ring(r) => Some(r),
            Self::Stars(_) => None,
        }
    }

    /// The star field, if this is one.
    pub fn as_stars(&self) -> Option<&StarField> {
        match self {
            Self::Stars(s) => Some(s),
            Self::Ring(_) => None,
        }
    }

    /// Mutable star field, if this is one.
    pub fn as_stars_mut(&mut self) -> Option<&mut StarField> {
        match self {
            Self::Stars(s) => Some(s),
            Self::Ring(_) => None,
        }
    }
}

/// Owns the containers of the current page and one instance per initialized container.
pub struct BackdropController {
    factory: Box<dyn SurfaceFactory>,
    containers: Vec<Container>,
    instances: BTreeMap<String, Backdrop>,
}

impl std::fmt::Debug for BackdropController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackdropController")
            .field("containers", &self.containers.len())
            .field("instances", &self.instances.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BackdropController {
    /// Controller creating surfaces through `factory`.
    pub fn new(factory: Box<dyn SurfaceFactory>) -> Self {
        Self {
            factory,
            containers: Vec::new(),
            instances: BTreeMap::new(),
        }
    }

    /// Adopt `containers` and construct an instance for every one not yet initialized.
    ///
    /// A container whose construction fails is logged and left uninitialized; the page keeps
    /// running. Returns the number of instances constructed.
    pub fn init(&mut self, host: &mut Host, containers: Vec<Container>) -> usize {
        for c in containers {
            match self.containers.iter_mut().find(|known| known.id == c.id) {
                Some(known) if known.initialized => {}
                Some(known) => *known = c,
                None => self.containers.push(c),
            }
        }

        let mut constructed = 0;
        for container in &mut self.containers {
            if container.initialized {
                tracing::debug!(container = %container.id, "already initialized; skipping");
                continue;
            }
            if let Some(mut previous) = self.instances.remove(&container.id) {
                previous.dispose(host);
            }
            match Backdrop::construct(host, container, self.factory.as_ref()) {
                Ok(instance) => {
                    container.initialized = true;
                    self.instances.insert(container.id.clone(), instance);
                    constructed += 1;
                }
                Err(err) => {
                    tracing::error!(
                        container = %container.id,
                        %err,
                        "failed to initialize backdrop"
                    );
                }
            }
        }
        constructed
    }

    /// Map a page-transition signal onto dispose or construct.
    pub fn handle_page_signal(&mut self, host: &mut Host, signal: PageSignal) {
        match signal {
            PageSignal::WillReplaceContent => {
                tracing::info!(instances = self.instances.len(), "content will be replaced");
                self.dispose_all(host);
                self.containers.clear();
            }
            PageSignal::PageReady(containers) => {
                tracing::info!(containers = containers.len(), "page ready");
                self.init(host, containers);
            }
        }
    }

    /// Record `event` on the host and forward it to every instance.
    pub fn dispatch(&mut self, host: &mut Host, event: &HostEvent) {
        host.apply(event);
        for instance in self.instances.values_mut() {
            instance.handle_event(host, event);
        }
    }

    /// Run every due frame. Returns how many instances rendered.
    pub fn tick(&mut self, host: &mut Host, now: f64) -> usize {
        self.instances
            .values_mut()
            .map(|i| i.tick(host, now))
            .filter(|ran| *ran)
            .count()
    }

    /// Dispose every instance and forget the page.
    pub fn destroy(&mut self, host: &mut Host) {
        self.dispose_all(host);
        self.containers.clear();
    }

    fn dispose_all(&mut self, host: &mut Host) {
        for instance in self.instances.values_mut() {
            instance.dispose(host);
        }
        self.instances.clear();
        for c in &mut self.containers {
            c.initialized = false;
        }
    }

    /// Instance for a container id.
    pub fn instance(&self, id: &str) -> Option<&Backdrop> {
        self.instances.get(id)
    }

    /// Mutable instance for a container id.
    pub fn instance_mut(&mut self, id: &str) -> Option<&mut Backdrop> {
        self.instances.get_mut(id)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// `true` when no instance is live.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Containers of the current page.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/controller.rs"]
mod tests;
