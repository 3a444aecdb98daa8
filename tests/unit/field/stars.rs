use super::*;
use crate::foundation::math::seeded_rng;

#[test]
fn buffers_match_count() {
    let mut rng = seeded_rng(Some(1));
    for n in [0usize, 1, 64, 8000] {
        let set = sample_stars(&mut rng, n, StarParams::default(), ViewportScale::ONE).unwrap();
        assert_eq!(set.len(), n);
        assert!(set.is_aligned());
    }
}

#[test]
fn stars_stay_inside_the_cube() {
    let mut rng = seeded_rng(Some(2));
    let p = StarParams::default();
    let set = sample_stars(&mut rng, 5000, p, ViewportScale::ONE).unwrap();
    let half = p.density / 2.0;
    assert!(set.positions().iter().all(|v| v.abs() <= half));
    for (&s, &o) in set.sizes().iter().zip(set.opacities()) {
        assert!(s >= p.particle_size * 0.2 && s <= p.particle_size);
        assert!((0.2..=1.0).contains(&o));
    }
    assert!(set.colors().iter().all(|c| *c == 1.0));
}

#[test]
fn scale_grows_the_cube() {
    let mut a = seeded_rng(Some(4));
    let mut b = seeded_rng(Some(4));
    let unit = sample_stars(&mut a, 50, StarParams::default(), ViewportScale::ONE).unwrap();
    let scale = ViewportScale::compute(crate::foundation::core::Viewport::new(2732, 1536).unwrap());
    let big = sample_stars(&mut b, 50, StarParams::default(), scale).unwrap();
    for (u, g) in unit.positions().iter().zip(big.positions()) {
        assert!((g - 2.0 * u).abs() < 1e-4);
    }
}

#[test]
fn rejects_bad_params() {
    let mut rng = seeded_rng(Some(1));
    let bad = [
        StarParams {
            density: -1.0,
            ..StarParams::default()
        },
        StarParams {
            particle_size: 0.0,
            ..StarParams::default()
        },
    ];
    for p in bad {
        assert!(sample_stars(&mut rng, 4, p, ViewportScale::ONE).is_err());
    }
}
