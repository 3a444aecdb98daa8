use super::*;

fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn ring_defaults_match_documented_values() {
    let c = RingConfig::default();
    assert_eq!(c.particle_count, 8000);
    assert_eq!(c.params(), RingParams::default());
    assert_eq!(c.rotation_speed, 0.001);
    assert!(c.enable_mouse_interaction && c.enable_big_bang_animation);
    assert_eq!((c.animation_duration, c.animation_delay), (3.0, 0.5));
    assert_eq!(c.clear_color(), ClearColor::new(0, 0.1));
    assert!(!c.enable_controls);
    c.validate().unwrap();
}

#[test]
fn ring_json_uses_camel_case_and_fills_defaults() {
    let c: RingConfig = serde_json::from_str(
        r#"{"particleCount":100,"innerRadius":10,"scatterIntensity":5,"ringSharpness":1,"enableBigBangAnimation":false}"#,
    )
    .unwrap();
    assert_eq!(c.particle_count, 100);
    assert_eq!(c.inner_radius, 10.0);
    assert!(!c.enable_big_bang_animation);
    assert_eq!(c.animation_duration, 3.0);
}

#[test]
fn ring_validation_rejects_bad_values() {
    let bad = [
        RingConfig {
            inner_radius: -1.0,
            ..RingConfig::default()
        },
        RingConfig {
            animation_duration: f32::NAN,
            ..RingConfig::default()
        },
        RingConfig {
            animation_delay: -0.1,
            ..RingConfig::default()
        },
        RingConfig {
            opacity: 1.5,
            ..RingConfig::default()
        },
    ];
    for c in bad {
        assert!(matches!(c.validate(), Err(BackdropError::Validation(_))), "{c:?}");
    }
}

#[test]
fn particle_counts_past_the_limit_are_rejected() {
    use crate::field::particles::MAX_PARTICLES;

    for n in [MAX_PARTICLES + 1, usize::MAX / 3 + 1, usize::MAX] {
        let ring = RingConfig {
            particle_count: n,
            ..RingConfig::default()
        };
        assert!(matches!(ring.validate(), Err(BackdropError::Validation(_))));
        let stars = StarFieldConfig {
            particle_count: n,
            ..StarFieldConfig::default()
        };
        assert!(matches!(stars.validate(), Err(BackdropError::Validation(_))));
    }
    let at_limit = RingConfig {
        particle_count: MAX_PARTICLES,
        ..RingConfig::default()
    };
    at_limit.validate().unwrap();
}

#[test]
fn missing_ring_flags_stay_on_and_false_turns_them_off() {
    let c = RingConfig::from_data_attributes(&attrs(&[]));
    assert!(c.enable_mouse_interaction && c.enable_big_bang_animation);
    let c = RingConfig::from_data_attributes(&attrs(&[
        ("enable-mouse-interaction", "false"),
        ("enable-big-bang-animation", "false"),
    ]));
    assert!(!c.enable_mouse_interaction && !c.enable_big_bang_animation);
}

#[test]
fn ring_data_attributes_parse_like_integers() {
    let c = RingConfig::from_data_attributes(&attrs(&[
        ("particle-count", "1200"),
        ("inner-radius", "99.9"),
        ("ring-sharpness", "2"),
        ("background-color", "0x112233"),
        ("opacity", "0.5"),
        ("enable-controls", "true"),
        ("enable-big-bang-animation", "false"),
        ("seed", "7"),
    ]));
    assert_eq!(c.particle_count, 1200);
    assert_eq!(c.inner_radius, 99.0);
    assert_eq!(c.ring_sharpness, 2.0);
    assert_eq!(c.scatter_intensity, 80.0);
    assert_eq!(c.background_color, 0x112233);
    assert_eq!(c.opacity, 0.5);
    assert!(c.enable_controls);
    assert!(!c.enable_big_bang_animation);
    assert!(c.enable_mouse_interaction);
    assert_eq!(c.seed, Some(7));
}

#[test]
fn unparsable_attributes_keep_defaults() {
    let c = RingConfig::from_data_attributes(&attrs(&[
        ("particle-count", "lots"),
        ("particle-count-extra", "1"),
        ("opacity", ""),
        ("enable-mouse-interaction", "maybe"),
        ("background-color", "0xZZ"),
    ]));
    assert_eq!(c, RingConfig::default());
}

#[test]
fn negative_counts_are_rejected_at_parse_time() {
    let c = RingConfig::from_data_attributes(&attrs(&[("particle-count", "-5")]));
    assert_eq!(c.particle_count, 8000);
}

#[test]
fn patch_reports_resample_for_distribution_fields() {
    let mut c = RingConfig::default();
    assert!(!c.apply(&RingConfigPatch {
        rotation_speed: Some(0.01),
        ..RingConfigPatch::default()
    }));
    assert_eq!(c.rotation_speed, 0.01);
    assert!(c.apply(&RingConfigPatch {
        inner_radius: Some(150.0),
        ..RingConfigPatch::default()
    }));
    assert!(c.apply(&RingConfigPatch {
        particle_count: Some(10),
        ..RingConfigPatch::default()
    }));
    assert_eq!(c.particle_count, 10);
}

#[test]
fn star_defaults_and_attributes() {
    let d = StarFieldConfig::default();
    assert_eq!(d.particle_count, 8000);
    assert_eq!(d.particle_size, 1.2);
    assert_eq!(d.density, 100.0);
    assert_eq!(d.mouse_movement_intensity, 3.0);
    assert_eq!(d.clear_color().to_rgba8(), [0, 0, 0, 255]);
    d.validate().unwrap();

    let c = StarFieldConfig::from_data_attributes(&attrs(&[
        ("particle-size", "2.5"),
        ("density", "50"),
        ("enable-animation", "false"),
        ("background-color", "#ff0000"),
    ]));
    assert_eq!(c.particle_size, 2.5);
    assert_eq!(c.density, 50.0);
    assert!(!c.enable_animation);
    assert_eq!(c.background_color, 0xff0000);
}

#[test]
fn star_validation_rejects_zero_size() {
    let c = StarFieldConfig {
        particle_size: 0.0,
        ..StarFieldConfig::default()
    };
    assert!(c.validate().is_err());
}
