/// Containers and their optional control elements.
pub mod container;
/// Host and page lifecycle events.
pub mod event;
/// Frame scheduler, listener registry and viewport.
pub mod runtime;
