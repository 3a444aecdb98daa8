use super::*;

fn launch() -> Tween {
    Tween::new(0.0, 1.0, 3.0, 0.5, Ease::OutCubic).unwrap()
}

#[test]
fn rejects_invalid_timing() {
    assert!(Tween::new(0.0, 1.0, -1.0, 0.0, Ease::Linear).is_err());
    assert!(Tween::new(0.0, 1.0, 1.0, f32::NAN, Ease::Linear).is_err());
    assert!(Tween::new(f32::INFINITY, 1.0, 1.0, 0.0, Ease::Linear).is_err());
}

#[test]
fn delay_holds_updates_back() {
    let mut t = launch();
    assert_eq!(t.state(), TweenState::Delayed);
    assert_eq!(t.advance(0.25), None);
    assert_eq!(t.value(), 0.0);
    let v = t.advance(0.25).unwrap();
    assert_eq!(v, 0.0);
    assert_eq!(t.state(), TweenState::Running);
}

#[test]
fn runs_to_completion_then_goes_quiet() {
    let mut t = launch();
    let mut last = 0.0;
    let mut updates = 0;
    for _ in 0..240 {
        if let Some(v) = t.advance(1.0 / 60.0) {
            assert!(v >= last);
            last = v;
            updates += 1;
        }
    }
    assert_eq!(t.state(), TweenState::Completed);
    assert_eq!(last, 1.0);
    assert!(updates > 150);
    assert_eq!(t.advance(1.0), None);
    assert_eq!(t.value(), 1.0);
}

#[test]
fn eased_midpoint_is_ahead_of_linear() {
    let mut t = Tween::new(0.0, 1.0, 2.0, 0.0, Ease::OutCubic).unwrap();
    let v = t.advance(1.0).unwrap();
    assert!((v - 0.875).abs() < 1e-6);
}

#[test]
fn kill_stops_updates_and_is_idempotent() {
    let mut t = launch();
    t.advance(1.0);
    let frozen = t.value();
    t.kill();
    t.kill();
    assert_eq!(t.state(), TweenState::Killed);
    assert!(!t.is_active());
    assert_eq!(t.advance(10.0), None);
    assert_eq!(t.value(), frozen);
}

#[test]
fn zero_duration_completes_on_first_update() {
    let mut t = Tween::new(0.0, 1.0, 0.0, 0.0, Ease::OutCubic).unwrap();
    assert_eq!(t.advance(0.0), Some(1.0));
    assert_eq!(t.state(), TweenState::Completed);
}
