/// Lifecycle service owning every instance on a page.
pub mod controller;
/// Slider bindings for the ring.
pub mod controls;
/// Ring instance.
pub mod ring;
/// Star-field instance.
pub mod stars;
