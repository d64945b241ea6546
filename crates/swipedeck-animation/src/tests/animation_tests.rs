use super::*;

use swipedeck_ui_graphics::Offset;

const FRAME_NANOS: u64 = 16_666_667; // ~60 FPS

fn run_frames<T: TwoWayConverter>(
    animatable: &mut Animatable<T>,
    max_frames: usize,
    mut on_value: impl FnMut(T),
) -> usize {
    let mut frame_time = 0u64;
    for frame in 0..max_frames {
        if !animatable.on_frame(frame_time) {
            return frame;
        }
        on_value(animatable.value());
        frame_time += FRAME_NANOS;
    }
    max_frames
}

#[test]
fn tween_interpolates_over_time() {
    let mut alpha = Animatable::new(0.0f32);
    alpha.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(100)));
    assert!(alpha.is_running());

    let mut samples = Vec::new();
    let frames = run_frames(&mut alpha, 32, |value| samples.push(value));

    assert!(frames < 32, "tween should finish");
    assert_eq!(samples[0], 0.0, "first frame anchors the start time");
    assert!(
        samples.iter().any(|value| *value > 0.0 && *value < 1.0),
        "animation should report intermediate values"
    );
    assert!((alpha.value() - 1.0).abs() < f32::EPSILON);
    assert!(!alpha.is_running());
}

#[test]
fn tween_honours_delay() {
    let mut value = Animatable::new(0.0f32);
    value.animate_to(
        10.0,
        AnimationType::Tween(AnimationSpec::linear(100).with_delay(50)),
    );
    value.on_frame(0);
    value.on_frame(40_000_000);
    assert_eq!(value.value(), 0.0);
    value.on_frame(100_000_000);
    assert!((value.value() - 5.0).abs() < 0.01);
    value.on_frame(150_000_000);
    assert_eq!(value.value(), 10.0);
    assert!(!value.is_running());
}

#[test]
fn critically_damped_spring_does_not_overshoot() {
    let mut position = Animatable::new(0.0f32);
    position.animate_to(100.0, AnimationType::Spring(SpringSpec::default()));

    let mut previous = 0.0f32;
    let frames = run_frames(&mut position, 240, |value| {
        assert!(value <= 100.0, "overshoot to {value}");
        assert!(value >= previous, "spring moved backwards: {previous} -> {value}");
        previous = value;
    });

    assert!(frames < 240, "spring should settle");
    assert_eq!(position.value(), 100.0);
}

#[test]
fn bouncy_spring_overshoots_then_settles() {
    let mut position = Animatable::new(0.0f32);
    position.animate_to(100.0, AnimationType::Spring(SpringSpec::new(
        SpringSpec::DAMPING_RATIO_MEDIUM_BOUNCY,
        SpringSpec::STIFFNESS_MEDIUM,
    )));

    let mut max_seen = 0.0f32;
    let frames = run_frames(&mut position, 600, |value| max_seen = max_seen.max(value));

    assert!(max_seen > 100.0, "under-damped spring should overshoot");
    assert!(frames < 600);
    assert_eq!(position.value(), 100.0);
}

#[test]
fn offset_spring_moves_both_axes() {
    let spec = SpringSpec::default().with_thresholds(0.5, 5.0);
    let mut offset = Animatable::new(Offset::ZERO);
    offset.animate_to(Offset::new(-300.0, 40.0), AnimationType::Spring(spec));

    offset.on_frame(0);
    offset.on_frame(FRAME_NANOS);
    let midway = offset.value();
    assert!(midway.x < 0.0 && midway.x > -300.0);
    assert!(midway.y > 0.0 && midway.y < 40.0);

    run_frames(&mut offset, 240, |_| {});
    assert_eq!(offset.value(), Offset::new(-300.0, 40.0));
}

#[test]
fn retargeting_spring_keeps_velocity() {
    let mut position = Animatable::new(0.0f32);
    let spring = AnimationType::Spring(SpringSpec::default());
    position.animate_to(100.0, spring);
    position.on_frame(0);
    position.on_frame(FRAME_NANOS);
    position.on_frame(2 * FRAME_NANOS);
    let velocity = position.velocity();
    assert!(velocity > 0.0);

    position.animate_to(200.0, spring);
    assert_eq!(position.velocity(), velocity);
}

#[test]
fn spring_retargeted_every_frame_keeps_moving() {
    let spring = AnimationType::Spring(SpringSpec::default().with_thresholds(0.5, 5.0));
    let mut offset = Animatable::new(Offset::ZERO);
    let mut previous = offset.value();
    for frame in 0..10u64 {
        offset.update_target(Offset::new(-10.0 * (frame + 1) as f32, 0.0), spring);
        offset.on_frame(frame * FRAME_NANOS);
        if frame > 0 {
            assert!(offset.value().x < previous.x, "frame {frame} did not advance");
        }
        previous = offset.value();
    }
}

#[test]
fn update_target_ignores_unchanged_target() {
    let mut position = Animatable::new(0.0f32);
    let spring = AnimationType::Spring(SpringSpec::default());
    assert!(position.update_target(10.0, spring));
    position.on_frame(0);
    position.on_frame(FRAME_NANOS);
    let value = position.value();
    assert!(!position.update_target(10.0, spring));
    assert_eq!(position.value(), value);
    assert!(position.is_running());
}

#[test]
fn animate_to_current_value_is_idle() {
    let mut scale = Animatable::new(1.0f32);
    scale.animate_to(1.0, AnimationType::Spring(SpringSpec::default()));
    assert!(!scale.is_running());
    assert!(!scale.on_frame(0));
}

#[test]
fn snap_to_stops_animation() {
    let mut position = Animatable::new(0.0f32);
    position.animate_to(100.0, AnimationType::Spring(SpringSpec::default()));
    position.on_frame(0);
    position.on_frame(FRAME_NANOS);
    position.snap_to(42.0);
    assert!(!position.is_running());
    assert_eq!(position.value(), 42.0);
    assert_eq!(position.target(), 42.0);
    assert_eq!(position.velocity(), 0.0);
}

#[test]
fn spring_step_is_frame_rate_independent() {
    let spec = SpringSpec::default();
    let (once, _) = spec.step(-100.0, 0.0, 0.032);
    let (half, half_velocity) = spec.step(-100.0, 0.0, 0.016);
    let (twice, _) = spec.step(half, half_velocity, 0.016);
    assert!((once - twice).abs() < 1e-3, "{once} vs {twice}");
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::LinearEasing,
        Easing::EaseInOut,
        Easing::FastOutSlowInEasing,
        Easing::LinearOutSlowInEasing,
    ];

    for easing in easings {
        let start = easing.transform(0.0);
        let end = easing.transform(1.0);
        assert!(
            (start - 0.0).abs() < 0.01,
            "Start should be ~0 for {:?}",
            easing
        );
        assert!(
            (end - 1.0).abs() < 0.01,
            "End should be ~1 for {:?}",
            easing
        );
    }
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowInEasing);
    assert_eq!(spec.delay_millis, 0);
}

#[test]
fn spring_spec_default_is_critically_damped() {
    let spec = SpringSpec::default();
    assert_eq!(spec.damping_ratio, 1.0);
    assert_eq!(spec.stiffness, SpringSpec::STIFFNESS_MEDIUM);
}

#[test]
fn easing_curves_are_monotonic() {
    for easing in [Easing::EaseInOut, Easing::FastOutSlowInEasing, Easing::LinearOutSlowInEasing] {
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = easing.transform(step as f32 / 20.0);
            assert!(value + 1e-4 >= previous, "{easing:?} dipped at step {step}");
            previous = value;
        }
    }
    // fast out: ahead of linear halfway through
    assert!(Easing::FastOutSlowInEasing.transform(0.5) > 0.5);
}
