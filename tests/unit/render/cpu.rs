use super::*;
use crate::field::particles::ParticleSet;
use crate::frame::system::StarUniforms;
use crate::host::container::ContainerKind;

fn vp(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h).unwrap()
}

fn single_point(material: Material, size: f32) -> ParticleSystem {
    let set = ParticleSet::from_parts(
        vec![0.0, 0.0, 0.0],
        vec![1.0, 1.0, 1.0],
        vec![size],
        vec![1.0],
    )
    .unwrap();
    ParticleSystem::new(set, material)
}

#[test]
fn empty_system_renders_background_only() {
    let mut s = CpuSurface::new(vp(16, 8)).unwrap();
    let mut sys = single_point(
        Material::Points {
            point_scale: 1.0,
            opacity: 1.0,
        },
        1.0,
    );
    sys.release();
    let cam = PerspectiveCamera::on_axis(vp(16, 8), 500.0);
    s.render(&sys, &cam, ClearColor::new(0x000000, 0.1)).unwrap();
    let f = s.last_frame().unwrap();
    assert_eq!((f.width, f.height), (16, 8));
    assert!(f.premultiplied);
    assert_eq!(f.data.len(), 16 * 8 * 4);
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 26]));
    assert_eq!(f.pixel(15, 7), Some([0, 0, 0, 26]));
}

#[test]
fn ring_point_lights_the_center() {
    let mut s = CpuSurface::new(vp(64, 64)).unwrap();
    let sys = single_point(
        Material::Points {
            point_scale: 1.0,
            opacity: 0.95,
        },
        10.0,
    );
    let cam = PerspectiveCamera::on_axis(vp(64, 64), 500.0);
    s.render(&sys, &cam, ClearColor::new(0x000000, 1.0)).unwrap();
    let f = s.last_frame().unwrap();
    let center = f.pixel(32, 32).unwrap();
    assert!(center[0] > 200, "center = {center:?}");
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn star_sprite_is_soft() {
    let mut s = CpuSurface::new(vp(64, 64)).unwrap();
    let sys = single_point(
        Material::Stars(StarUniforms {
            time: 0.0,
            base_size: 4.0,
            motion_strength: 0.0,
            vortex_strength: 1.0,
        }),
        1.0,
    );
    let cam = PerspectiveCamera::on_axis(vp(64, 64), 50.0);
    s.render(&sys, &cam, ClearColor::new(0x000000, 1.0)).unwrap();
    let f = s.last_frame().unwrap();
    let center = f.pixel(32, 32).unwrap()[0];
    let rim = f.pixel(32 + 10, 32).unwrap()[0];
    assert!(center > rim, "center={center} rim={rim}");
    assert!(center > 100);
}

#[test]
fn additive_blend_saturates() {
    let mut dst = vec![200, 10, 0, 255];
    add_in_place(&mut dst, &[100, 10, 0, 255]).unwrap();
    assert_eq!(dst, vec![255, 20, 0, 255]);
    assert!(add_in_place(&mut dst, &[0; 8]).is_err());
}

#[test]
fn resize_reallocates_and_dispose_is_final() {
    let mut s = CpuSurface::new(vp(8, 8)).unwrap();
    s.resize(vp(16, 4)).unwrap();
    let sys = single_point(
        Material::Points {
            point_scale: 1.0,
            opacity: 1.0,
        },
        1.0,
    );
    let cam = PerspectiveCamera::on_axis(vp(16, 4), 500.0);
    s.render(&sys, &cam, ClearColor::new(0, 1.0)).unwrap();
    assert_eq!(s.last_frame().unwrap().width, 16);

    s.dispose();
    s.dispose();
    assert!(s.is_disposed());
    assert!(s.last_frame().is_none());
    assert!(s.render(&sys, &cam, ClearColor::new(0, 1.0)).is_err());
    assert!(s.resize(vp(8, 8)).is_err());
}

#[test]
fn factory_rejects_oversized_viewports() {
    let c = Container::new("c", ContainerKind::Ring);
    assert!(CpuSurfaceFactory.create(&c, vp(70_000, 10)).is_err());
    assert!(CpuSurfaceFactory.create(&c, vp(10, 10)).is_ok());
}

#[test]
fn premultiply_scales_channels() {
    assert_eq!(premul_rgba8(255, 128, 0, 255), [255, 128, 0, 255]);
    assert_eq!(premul_rgba8(255, 255, 255, 0), [0, 0, 0, 0]);
    assert_eq!(premul_rgba8(255, 0, 0, 128)[0], 128);
}
