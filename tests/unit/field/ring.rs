use super::*;
use crate::foundation::core::Viewport;
use crate::foundation::math::seeded_rng;

fn params() -> RingParams {
    RingParams::default()
}

#[test]
fn buffers_match_count() {
    let mut rng = seeded_rng(Some(1));
    for n in [0usize, 1, 13, 500] {
        let field = RingField::sample(&mut rng, n, params(), ViewportScale::ONE, 1.0).unwrap();
        let set = field.particles();
        assert_eq!(set.len(), n);
        assert_eq!(set.positions().len(), n * 3);
        assert_eq!(set.colors().len(), n * 3);
        assert_eq!(set.sizes().len(), n);
        assert_eq!(field.launch().animation().initial_positions().len(), n * 3);
        assert_eq!(field.launch().animation().final_positions().len(), n * 3);
        assert_eq!(field.distances().len(), n);
    }
}

#[test]
fn core_band_is_fifteen_percent() {
    let mut rng = seeded_rng(Some(42));
    let n = 100_000;
    let field = RingField::sample(&mut rng, n, params(), ViewportScale::ONE, 1.0).unwrap();
    let core = field.bands().iter().filter(|b| **b == RingBand::Core).count();
    let frac = core as f64 / n as f64;
    // 4 sigma of a binomial(100k, 0.15) is ~0.0045.
    assert!((frac - 0.15).abs() < 0.006, "core fraction {frac}");
}

#[test]
fn core_band_stays_within_half_sharpness() {
    let mut rng = seeded_rng(Some(5));
    let p = params();
    let field = RingField::sample(&mut rng, 5000, p, ViewportScale::ONE, 1.0).unwrap();
    for (d, b) in field.distances().iter().zip(field.bands()) {
        if *b == RingBand::Core {
            assert!((d - p.inner_radius).abs() <= p.ring_sharpness * 0.5 + 1e-4);
        } else {
            assert!(*d >= p.inner_radius + p.ring_sharpness * 0.5 - 1e-4);
        }
    }
}

#[test]
fn within_sharpness_fraction_matches_core_when_halo_is_wide() {
    // With a hair-thin core and a very wide halo, scatter particles almost never land within
    // `ringSharpness` of the radius, so the measured fraction isolates the core population.
    let p = RingParams {
        inner_radius: 150.0,
        scatter_intensity: 1000.0,
        ring_sharpness: 0.01,
    };
    let mut rng = seeded_rng(Some(9));
    let n = 100_000;
    let field = RingField::sample(&mut rng, n, p, ViewportScale::ONE, 1.0).unwrap();
    let near = field
        .distances()
        .iter()
        .filter(|d| (*d - p.inner_radius).abs() <= p.ring_sharpness)
        .count();
    let frac = near as f64 / n as f64;
    assert!((frac - 0.15).abs() < 0.006, "fraction {frac}");
}

#[test]
fn colors_and_sizes_stay_in_range_across_parameter_domain() {
    let mut rng = seeded_rng(Some(3));
    let grid = [0.0_f32, 0.5, 4.0, 80.0, 1000.0];
    for &inner in &grid {
        for &scatter in &grid {
            for &sharp in &grid {
                let p = RingParams {
                    inner_radius: inner,
                    scatter_intensity: scatter,
                    ring_sharpness: sharp,
                };
                for progress in [0.0, 0.4, 1.0] {
                    let field =
                        RingField::sample(&mut rng, 200, p, ViewportScale::ONE, progress).unwrap();
                    let set = field.particles();
                    for &c in set.colors() {
                        assert!(c.is_finite() && (0.0..=1.0).contains(&c), "{p:?} color {c}");
                    }
                    for &s in set.sizes() {
                        assert!(s.is_finite() && s > 0.0, "{p:?} size {s}");
                    }
                    assert!(set.positions().iter().all(|v| v.is_finite()));
                }
            }
        }
    }
}

#[test]
fn rejects_negative_or_non_finite_params() {
    let mut rng = seeded_rng(Some(3));
    for bad in [
        RingParams {
            inner_radius: -1.0,
            ..params()
        },
        RingParams {
            scatter_intensity: f32::NAN,
            ..params()
        },
        RingParams {
            ring_sharpness: f32::INFINITY,
            ..params()
        },
    ] {
        assert!(RingField::sample(&mut rng, 10, bad, ViewportScale::ONE, 1.0).is_err());
    }
}

#[test]
fn zero_scatter_is_floored() {
    let p = RingParams {
        scatter_intensity: 0.0,
        ..params()
    };
    assert_eq!(p.scaled(ViewportScale::ONE).scatter_intensity, MIN_SCATTER);
}

#[test]
fn progress_zero_starts_in_the_cluster() {
    let mut rng = seeded_rng(Some(11));
    let field = RingField::sample(&mut rng, 2000, params(), ViewportScale::ONE, 0.0).unwrap();
    let set = field.particles();
    for i in 0..set.len() {
        let [x, y, _] = set.position(i).unwrap();
        assert!((x * x + y * y).sqrt() <= INITIAL_CLUSTER_RADIUS + 1e-3);
    }
    assert_eq!(
        set.positions(),
        field.launch().animation().initial_positions()
    );
}

#[test]
fn progress_one_reaches_final_positions_and_base_attributes() {
    let mut rng = seeded_rng(Some(12));
    let mut field = RingField::sample(&mut rng, 300, params(), ViewportScale::ONE, 0.0).unwrap();
    let dim = field.particles().colors().to_vec();
    field.apply_progress(1.0);
    assert_eq!(
        field.particles().positions(),
        field.launch().animation().final_positions()
    );
    for (bright, dark) in field.particles().colors().iter().zip(&dim) {
        assert!((dark - bright * 0.3).abs() < 1e-5);
    }
}

#[test]
fn scale_widens_the_ring() {
    let big = ViewportScale::compute(Viewport::new(2732, 1536).unwrap());
    let mut a = seeded_rng(Some(21));
    let mut b = seeded_rng(Some(21));
    let unit = RingField::sample(&mut a, 100, params(), ViewportScale::ONE, 1.0).unwrap();
    let doubled = RingField::sample(&mut b, 100, params(), big, 1.0).unwrap();
    for (d1, d2) in unit.distances().iter().zip(doubled.distances()) {
        assert!((d2 - 2.0 * d1).abs() < 1e-3);
    }
    assert_eq!(doubled.params().inner_radius, 300.0);
}

#[test]
fn halo_intensity_decays_and_floors() {
    let p = params().scaled(ViewportScale::ONE);
    assert_eq!(halo_intensity(p.inner_radius + 1.0, &p), 0.9);
    let near = halo_intensity(p.inner_radius + 10.0, &p);
    let far = halo_intensity(p.inner_radius + 100.0, &p);
    assert!(near > far);
    assert_eq!(halo_intensity(p.inner_radius + 10_000.0, &p), 0.03);
}

#[test]
fn launch_refuses_mismatched_sets() {
    let mut rng = seeded_rng(Some(2));
    let field = RingField::sample(&mut rng, 10, params(), ViewportScale::ONE, 0.0).unwrap();
    let (_, mut launch) = field.into_parts();
    let mut other = ParticleSet::zeroed(11).unwrap();
    assert!(!launch.apply(1.0, &mut other));
    assert_eq!(other, ParticleSet::zeroed(11).unwrap());
}
