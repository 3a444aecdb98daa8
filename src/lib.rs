//! Procedural particle backdrops.
//!
//! Two presets are provided:
//!
//! - a light ring: particles sampled around a radius with a bright core and a decaying halo,
//!   launched from a compact cluster by an eased tween and animated by a host-side brightness
//!   wave;
//! - a star field: a uniform cube of stars displaced every frame by a noise, vortex and wave
//!   vertex program.
//!
//! Instances are owned by a [`BackdropController`] that reacts to page lifecycle signals, host
//! events and frame callbacks delivered through a [`Host`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod field;
pub(crate) mod frame;
pub(crate) mod viewport;

/// Instance lifecycle: ring, star field, controls and the page controller.
pub mod component;
/// Construction-time options.
pub mod config;
/// Frame sinks.
pub mod encode;
/// Host environment: scheduler, listeners, events and containers.
pub mod host;
/// Camera, vertex program and render surfaces.
pub mod render;

pub use crate::foundation::core::{ClearColor, Fps, FrameIndex, Point, Vec2, Viewport};
pub use crate::foundation::error::{BackdropError, BackdropResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interp::{
    AnimationState, color_factor, eased_progress, interpolate, size_factor,
};
pub use crate::animation::tween::{Tween, TweenState};
pub use crate::field::particles::ParticleSet;
pub use crate::field::ring::{
    CORE_FRACTION, RingBand, RingField, RingLaunch, RingParams, ScaledRingParams,
};
pub use crate::field::stars::{StarParams, sample_stars};
pub use crate::frame::system::{Material, ParticleSystem, StarUniforms};
pub use crate::frame::updater::{FrameInput, FrameUpdater, RingUpdater, StarUpdater};
pub use crate::viewport::scale::{BASELINE_HEIGHT, BASELINE_WIDTH, ViewportScale};

pub use crate::component::controller::{Backdrop, BackdropController};
pub use crate::component::controls::RingControl;
pub use crate::component::ring::ParticleRing;
pub use crate::component::stars::StarField;
pub use crate::config::{RingConfig, RingConfigPatch, StarFieldConfig, StarFieldPatch};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::host::container::{Container, ContainerKind, ControlPanel};
pub use crate::host::event::{EventKind, HostEvent, PageSignal};
pub use crate::host::runtime::{FrameHandle, Host, ListenerHandle};
pub use crate::render::backend::{FrameRGBA, RenderSurface, SurfaceFactory};
pub use crate::render::camera::{PerspectiveCamera, Projected, Projector};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceFactory};
