use glam::Vec3;

use crate::field::particles::ParticleSet;

/// Uniform block of the star-field vertex program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarUniforms {
    /// Accumulated animation time.
    pub time: f32,
    /// Base point size multiplier.
    pub base_size: f32,
    /// Overall displacement strength.
    pub motion_strength: f32,
    /// Extra vortex strength; `1.0` is neutral.
    pub vortex_strength: f32,
}

/// How a particle system is shaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Fixed-size point sprites using per-particle color and size, blended additively.
    Points {
        /// Pixel size multiplier (the viewport scale).
        point_scale: f32,
        /// Material opacity multiplied into every particle.
        opacity: f32,
    },
    /// Vertex-program driven stars; displacement is evaluated by the renderer.
    Stars(StarUniforms),
}

/// Renderable particle system: geometry, whole-system rotation and material.
///
/// Geometry is optional so a disposed system can still be handed to the frame updater, which
/// then skips the frame.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    geometry: Option<ParticleSet>,
    /// Euler rotation (x, y, z) in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Shading.
    pub material: Material,
}

impl ParticleSystem {
    /// Wrap geometry with a material and zero rotation.
    pub fn new(geometry: ParticleSet, material: Material) -> Self {
        Self {
            geometry: Some(geometry),
            rotation: Vec3::ZERO,
            material,
        }
    }

    /// Current geometry, `None` once released.
    pub fn geometry(&self) -> Option<&ParticleSet> {
        self.geometry.as_ref()
    }

    /// Mutable geometry, `None` once released.
    pub fn geometry_mut(&mut self) -> Option<&mut ParticleSet> {
        self.geometry.as_mut()
    }

    /// Swap in a freshly sampled set and return the previous one.
    pub fn replace_geometry(&mut self, geometry: ParticleSet) -> Option<ParticleSet> {
        self.geometry.replace(geometry)
    }

    /// Release the geometry buffers.
    pub fn release(&mut self) -> Option<ParticleSet> {
        self.geometry.take()
    }

    /// Particle count, `0` once released.
    pub fn len(&self) -> usize {
        self.geometry.as_ref().map_or(0, ParticleSet::len)
    }

    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Star uniforms, when the material is the star vertex program.
    pub fn star_uniforms_mut(&mut self) -> Option<&mut StarUniforms> {
        match &mut self.material {
            Material::Stars(u) => Some(u),
            Material::Points { .. } => None,
        }
    }
}
