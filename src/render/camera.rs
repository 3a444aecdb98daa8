use glam::{EulerRot, Mat4, Vec3, Vec4};

use crate::foundation::core::Viewport;

/// Vertical field of view shared by both presets, in degrees.
pub const FOV_Y_DEG: f32 = 75.0;
/// Near clip plane.
pub const NEAR: f32 = 0.1;
/// Far clip plane.
pub const FAR: f32 = 1000.0;

/// Right-handed perspective camera looking at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Width over height.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
}

/// A particle projected to pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixel x, left to right.
    pub x: f32,
    /// Pixel y, top to bottom.
    pub y: f32,
    /// View-space depth; negative in front of the camera.
    pub view_z: f32,
}

impl PerspectiveCamera {
    /// Camera on the +z axis at `distance`, looking at the origin.
    pub fn on_axis(viewport: Viewport, distance: f32) -> Self {
        Self {
            fov_y_deg: FOV_Y_DEG,
            aspect: viewport.aspect(),
            near: NEAR,
            far: FAR,
            position: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
        }
    }

    /// Follow a viewport change.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Move the eye in the xy plane, keeping its distance along z, and look back at the origin.
    pub fn pan_to(&mut self, x: f32, y: f32) {
        self.position.x = x;
        self.position.y = y;
        self.target = Vec3::ZERO;
    }

    /// World to view transform.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// View to clip transform (OpenGL depth range).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Projector for one frame: `model_view` is combined with the projection once.
    pub fn projector(&self, model_view: Mat4, viewport: Viewport) -> Projector {
        Projector {
            clip_from_model: self.projection() * model_view,
            depth_row: model_view.row(2),
            width: viewport.width as f32,
            height: viewport.height as f32,
        }
    }
}

/// Model to pixel mapping fixed for the duration of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    clip_from_model: Mat4,
    depth_row: Vec4,
    width: f32,
    height: f32,
}

impl Projector {
    /// Project a model-space point, `None` when it falls outside the clip volume.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let v = p.extend(1.0);
        let clip = self.clip_from_model * v;
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Projected {
            x: (ndc.x + 1.0) * 0.5 * self.width,
            y: (1.0 - ndc.y) * 0.5 * self.height,
            view_z: self.depth_row.dot(v),
        })
    }
}

/// Model matrix for a system rotation in XYZ Euler order.
pub fn model_matrix(rotation: Vec3) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;
