use super::*;

fn vp() -> Viewport {
    Viewport::new(800, 600).unwrap()
}

fn project(cam: &PerspectiveCamera, p: Vec3) -> Option<Projected> {
    cam.projector(cam.view(), vp()).project(p)
}

#[test]
fn origin_projects_to_center() {
    let cam = PerspectiveCamera::on_axis(vp(), 500.0);
    let p = project(&cam, Vec3::ZERO).unwrap();
    assert!((p.x - 400.0).abs() < 1e-3);
    assert!((p.y - 300.0).abs() < 1e-3);
    assert!((p.view_z + 500.0).abs() < 1e-3);
}

#[test]
fn y_up_maps_to_screen_top() {
    let cam = PerspectiveCamera::on_axis(vp(), 50.0);
    let p = project(&cam, Vec3::new(0.0, 10.0, 0.0)).unwrap();
    assert!(p.y < 300.0);
    let q = project(&cam, Vec3::new(10.0, 0.0, 0.0)).unwrap();
    assert!(q.x > 400.0);
}

#[test]
fn points_behind_or_beyond_far_are_culled() {
    let cam = PerspectiveCamera::on_axis(vp(), 50.0);
    assert!(project(&cam, Vec3::new(0.0, 0.0, 60.0)).is_none());
    assert!(project(&cam, Vec3::new(0.0, 0.0, -2000.0)).is_none());
}

#[test]
fn screen_offset_follows_focal_length() {
    let cam = PerspectiveCamera::on_axis(vp(), 100.0);
    let f = 300.0 / (FOV_Y_DEG.to_radians() * 0.5).tan();
    let p = project(&cam, Vec3::new(0.0, 10.0, 0.0)).unwrap();
    assert!(((300.0 - p.y) - f * 10.0 / 100.0).abs() < 1e-2);
}

#[test]
fn pan_keeps_looking_at_origin() {
    let mut cam = PerspectiveCamera::on_axis(vp(), 50.0);
    cam.pan_to(3.0, -3.0);
    let p = project(&cam, Vec3::ZERO).unwrap();
    assert!((p.x - 400.0).abs() < 1e-2);
    assert!((p.y - 300.0).abs() < 1e-2);
}

#[test]
fn model_matrix_rotates_about_z() {
    let m = model_matrix(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
    let v = m.transform_point3(Vec3::X);
    assert!((v - Vec3::Y).length() < 1e-6);
}

#[test]
fn projector_depth_tracks_model_rotation() {
    let cam = PerspectiveCamera::on_axis(vp(), 50.0);
    let model = model_matrix(Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0));
    let p = cam.projector(cam.view() * model, vp()).project(Vec3::Y * 10.0).unwrap();
    assert!((p.view_z + 40.0).abs() < 1e-3);
    assert!((p.y - 300.0).abs() < 1e-2);
}
