/// Render surface contracts and frame type.
pub mod backend;
/// Perspective camera and projection.
pub mod camera;
/// CPU raster surface powered by `vello_cpu`.
pub mod cpu;
/// Star-field vertex program.
pub mod vertex;
