use super::*;
use crate::field::particles::ParticleSet;
use crate::frame::system::{Material, StarUniforms};

fn ring_system(points: &[[f32; 3]]) -> ParticleSystem {
    let mut positions = Vec::new();
    for p in points {
        positions.extend_from_slice(p);
    }
    let n = points.len();
    let set = ParticleSet::from_parts(positions, vec![0.0; n * 3], vec![1.0; n], vec![1.0; n])
        .unwrap();
    ParticleSystem::new(
        set,
        Material::Points {
            point_scale: 1.0,
            opacity: 0.95,
        },
    )
}

fn ring_updater() -> RingUpdater {
    RingUpdater {
        rotation_speed: 0.001,
        inner_radius: 150.0,
        scale: 1.0,
        mouse_interaction: true,
    }
}

fn input(time: f64) -> FrameInput {
    FrameInput {
        time,
        pointer: None,
        progress: 1.0,
    }
}

#[test]
fn brightness_is_clamped_everywhere() {
    for d in [0.0_f32, 50.0, 149.0, 150.0, 151.0, 170.0, 171.0, 400.0, 5000.0] {
        for t in [0.0, 0.3, 1.7, 1234.5] {
            let b = ring_brightness(d, 150.0, 1.0, t);
            assert!((WAVE_FLOOR..=1.0).contains(&b), "d={d} t={t} b={b}");
        }
    }
}

#[test]
fn brightness_peaks_on_the_ring() {
    // Pick a time where the wave term vanishes at the ring radius.
    let t = -(150.0_f64 * 0.008) / 1.5;
    let on = ring_brightness(150.0, 150.0, 1.0, t);
    assert!((on - 0.9).abs() < 1e-4);
    assert!(ring_brightness(160.0, 150.0, 1.0, t) < on);
    assert!(ring_brightness(140.0, 150.0, 1.0, t) < on);
}

#[test]
fn ring_update_rotates_and_recolors() {
    let mut sys = ring_system(&[[150.0, 0.0, 0.0], [0.0, 400.0, 0.0]]);
    let mut up = ring_updater();
    up.update(&mut sys, &input(0.0));
    assert!((sys.rotation.z - 0.001).abs() < 1e-9);

    let set = sys.geometry().unwrap();
    let near = set.color(0).unwrap()[0];
    let far = set.color(1).unwrap()[0];
    assert!(near > far);
    assert!(near <= 0.9 && far >= WAVE_FLOOR * 0.9);
    let c = set.color(0).unwrap();
    assert_eq!(c[0], c[1]);
    assert_eq!(c[1], c[2]);
}

#[test]
fn ring_colors_follow_progress_factor() {
    let mut a = ring_system(&[[150.0, 0.0, 0.0]]);
    let mut b = ring_system(&[[150.0, 0.0, 0.0]]);
    let mut up = ring_updater();
    up.update(&mut a, &input(2.0));
    up.update(
        &mut b,
        &FrameInput {
            progress: 0.0,
            ..input(2.0)
        },
    );
    let full = a.geometry().unwrap().color(0).unwrap()[0];
    let dim = b.geometry().unwrap().color(0).unwrap()[0];
    assert!((dim - full * 0.3).abs() < 1e-6);
}

#[test]
fn pointer_sets_tilt_only_when_enabled() {
    let mut sys = ring_system(&[[1.0, 1.0, 0.0]]);
    let mut up = ring_updater();
    let with_pointer = FrameInput {
        pointer: Some(Vec2::new(0.5, -1.0)),
        ..input(0.0)
    };
    up.update(&mut sys, &with_pointer);
    assert!((sys.rotation.y - 0.05).abs() < 1e-7);
    assert!((sys.rotation.x + 0.1).abs() < 1e-7);

    let mut sys = ring_system(&[[1.0, 1.0, 0.0]]);
    up.mouse_interaction = false;
    up.update(&mut sys, &with_pointer);
    assert_eq!(sys.rotation.x, 0.0);
    assert_eq!(sys.rotation.y, 0.0);
}

#[test]
fn released_geometry_skips_silently() {
    let mut sys = ring_system(&[[1.0, 1.0, 0.0]]);
    sys.release();
    let mut up = ring_updater();
    up.update(&mut sys, &input(1.0));
    assert!(sys.geometry().is_none());
    assert!(sys.is_empty());
}

fn star_system() -> ParticleSystem {
    ParticleSystem::new(
        ParticleSet::zeroed(4).unwrap(),
        Material::Stars(StarUniforms {
            time: 0.0,
            base_size: 1.2,
            motion_strength: 1.0,
            vortex_strength: 1.0,
        }),
    )
}

fn star_updater() -> StarUpdater {
    StarUpdater {
        time: 0.0,
        enabled: true,
        base_size: 1.2,
        motion_strength: 2.0,
        vortex_strength: 0.5,
    }
}

#[test]
fn star_update_forwards_uniforms_without_touching_buffers() {
    let mut sys = star_system();
    let before = sys.geometry().unwrap().clone();
    let mut up = star_updater();
    for _ in 0..10 {
        up.update(&mut sys, &input(0.0));
    }
    assert!((up.time - 0.1).abs() < 1e-5);
    let Material::Stars(u) = sys.material else {
        panic!("expected star material");
    };
    assert_eq!(u.time, up.time);
    assert_eq!(u.motion_strength, 2.0);
    assert_eq!(u.vortex_strength, 0.5);
    assert!((sys.rotation.y - 0.01).abs() < 1e-6);
    assert!((sys.rotation.x - 0.005).abs() < 1e-6);
    assert_eq!(sys.geometry().unwrap(), &before);
}

#[test]
fn disabled_stars_only_advance_the_clock() {
    let mut sys = star_system();
    let mut up = StarUpdater {
        enabled: false,
        ..star_updater()
    };
    up.update(&mut sys, &input(0.0));
    assert!(up.time > 0.0);
    assert_eq!(sys.rotation, glam::Vec3::ZERO);
    let Material::Stars(u) = sys.material else {
        panic!("expected star material");
    };
    assert_eq!(u.time, 0.0);
}
