use super::SmoothScroll;
use std::time::{Duration, Instant};

#[test]
fn test_sample_starts_at_origin_and_lands_on_target() {
    let t0 = Instant::now();
    let anim = SmoothScroll::new(10.0, 110.0, t0, Duration::from_millis(400));

    assert!((anim.sample(t0) - 10.0).abs() < f32::EPSILON);
    assert!(!anim.done(t0 + Duration::from_millis(399)));

    assert!((anim.sample(t0 + Duration::from_millis(400)) - 110.0).abs() < f32::EPSILON);
    assert!(anim.done(t0 + Duration::from_millis(400)));
}

#[test]
fn test_mid_flight_follows_ease_out_cubic() {
    let t0 = Instant::now();
    let anim = SmoothScroll::new(0.0, 100.0, t0, Duration::from_secs(1));

    // Halfway through, the eased fraction is 1 - (1 - 0.5)^3 = 0.875.
    let mid = anim.sample(t0 + Duration::from_millis(500));
    assert!((mid - 87.5).abs() < 1e-3);
}

#[test]
fn test_position_is_monotonic_toward_the_target() {
    let t0 = Instant::now();
    let anim = SmoothScroll::new(0.0, 100.0, t0, Duration::from_secs(1));

    let mut last = anim.sample(t0);
    for ms in (100..=1000).step_by(100) {
        let position = anim.sample(t0 + Duration::from_millis(ms));
        assert!(position >= last);
        last = position;
    }
    assert!((last - 100.0).abs() < f32::EPSILON);
}

#[test]
fn test_zero_duration_lands_immediately() {
    let t0 = Instant::now();
    let anim = SmoothScroll::new(0.0, 42.0, t0, Duration::ZERO);

    assert!((anim.sample(t0) - 42.0).abs() < f32::EPSILON);
    assert!(anim.done(t0));
    assert!((anim.target() - 42.0).abs() < f32::EPSILON);
}
