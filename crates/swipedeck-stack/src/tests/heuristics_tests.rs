use super::*;

const CARD: Size = Size::new(300.0, 400.0);

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn direction_is_scale_invariant() {
    let small = classify_direction(Velocity::new(10.0, 1.0), Offset::new(5.0, 0.0));
    let large = classify_direction(Velocity::new(1000.0, 100.0), Offset::new(500.0, 0.0));
    assert_eq!(small, Some(SwipeDirection::Right));
    assert_eq!(small, large);

    for k in [0.5f32, 3.0, 40.0, 1000.0] {
        let velocity = Velocity::new(-300.0, 120.0) * k;
        let offset = Offset::new(-80.0, 10.0) * k;
        assert_eq!(
            classify_direction(velocity, offset),
            Some(SwipeDirection::Left),
            "scale {k}"
        );
    }
}

#[test]
fn direction_requires_sign_agreement() {
    assert_eq!(
        classify_direction(Velocity::new(500.0, 0.0), Offset::new(-20.0, 0.0)),
        None
    );
    assert_eq!(
        classify_direction(Velocity::new(0.0, -600.0), Offset::new(0.0, -30.0)),
        Some(SwipeDirection::Up)
    );
    assert_eq!(
        classify_direction(Velocity::new(0.0, 600.0), Offset::new(0.0, 30.0)),
        Some(SwipeDirection::Down)
    );
}

#[test]
fn velocity_tie_prefers_vertical() {
    assert_eq!(
        classify_direction(Velocity::new(200.0, 200.0), Offset::new(10.0, 10.0)),
        Some(SwipeDirection::Down)
    );
}

#[test]
fn still_release_uses_offset() {
    assert_eq!(
        classify_direction(Velocity::ZERO, Offset::new(-60.0, 5.0)),
        Some(SwipeDirection::Left)
    );
    assert_eq!(classify_direction(Velocity::ZERO, Offset::new(0.1, -0.2)), None);
    assert_eq!(classify_direction(Velocity::ZERO, Offset::ZERO), None);
}

#[test]
fn non_finite_velocity_does_not_classify() {
    let velocity = Velocity::new(f32::NAN, f32::INFINITY);
    assert_eq!(classify_direction(velocity, Offset::ZERO), None);
}

#[test]
fn velocity_commit_checks_either_axis() {
    assert!(is_velocity_commit(Velocity::new(-151.0, 0.0), 150.0));
    assert!(is_velocity_commit(Velocity::new(0.0, 151.0), 150.0));
    assert!(!is_velocity_commit(Velocity::new(150.0, -150.0), 150.0));
}

#[test]
fn distance_commit_is_direction_specific() {
    assert!(is_distance_commit(SwipeDirection::Left, Offset::new(-46.0, 0.0), CARD));
    assert!(!is_distance_commit(SwipeDirection::Left, Offset::new(-44.0, 0.0), CARD));
    assert!(is_distance_commit(SwipeDirection::Right, Offset::new(46.0, 0.0), CARD));
    assert!(is_distance_commit(SwipeDirection::Up, Offset::new(0.0, -101.0), CARD));
    assert!(!is_distance_commit(SwipeDirection::Up, Offset::new(0.0, -99.0), CARD));
    assert!(is_distance_commit(SwipeDirection::Down, Offset::new(0.0, 101.0), CARD));
    assert!(!is_distance_commit(SwipeDirection::Down, Offset::new(0.0, -500.0), CARD));
}

#[test]
fn release_commits_once_as_offset_grows() {
    let mut flips = 0;
    let mut previous = DismissDecision::Reset;
    for step in 0..=400 {
        let offset = Offset::new(step as f32 * 0.5, 0.0);
        let decision = evaluate_release(Velocity::ZERO, offset, CARD, 150.0);
        if decision != previous {
            flips += 1;
            assert_eq!(decision, DismissDecision::Commit(SwipeDirection::Right));
        }
        previous = decision;
    }
    assert_eq!(flips, 1);
}

#[test]
fn fast_flick_commits_on_velocity() {
    let decision = evaluate_release(
        Velocity::new(-900.0, 0.0),
        Offset::new(-180.0, 0.0),
        CARD,
        150.0,
    );
    assert_eq!(decision, DismissDecision::Commit(SwipeDirection::Left));

    let short_flick = evaluate_release(
        Velocity::new(-900.0, 0.0),
        Offset::new(-10.0, 0.0),
        CARD,
        150.0,
    );
    assert_eq!(short_flick, DismissDecision::Commit(SwipeDirection::Left));
}

#[test]
fn short_slow_drag_resets() {
    let decision = evaluate_release(
        Velocity::new(20.0, 0.0),
        Offset::new(40.0, 0.0),
        CARD,
        150.0,
    );
    assert_eq!(decision, DismissDecision::Reset);
}

#[test]
fn horizontal_exit_keeps_vertical_offset() {
    let current = Offset::new(-50.0, 12.0);
    assert_eq!(
        target_offset(SwipeDirection::Left, CARD, current, CardAlignment::Bottom),
        Offset::new(-450.0, 12.0)
    );
    assert_eq!(
        target_offset(SwipeDirection::Right, CARD, current, CardAlignment::Top),
        Offset::new(450.0, 12.0)
    );
}

#[test]
fn vertical_exit_clears_the_anchor() {
    let dragged_down = Offset::new(4.0, 30.0);
    assert_eq!(
        target_offset(SwipeDirection::Up, CARD, dragged_down, CardAlignment::Bottom),
        Offset::new(4.0, -600.0)
    );
    let dragged_up = Offset::new(0.0, -80.0);
    assert_eq!(
        target_offset(SwipeDirection::Up, CARD, dragged_up, CardAlignment::BottomEnd),
        Offset::new(0.0, -680.0)
    );
    assert_eq!(
        target_offset(SwipeDirection::Up, CARD, dragged_up, CardAlignment::Top),
        Offset::new(0.0, -600.0)
    );
    assert_eq!(
        target_offset(SwipeDirection::Down, CARD, Offset::new(0.0, 90.0), CardAlignment::TopStart),
        Offset::new(0.0, 690.0)
    );
    assert_eq!(
        target_offset(SwipeDirection::Down, CARD, Offset::new(0.0, 90.0), CardAlignment::Bottom),
        Offset::new(0.0, 600.0)
    );
}

#[test]
fn progress_is_bounded() {
    let offsets = [
        Offset::new(1e6, 0.0),
        Offset::new(-1e6, 3.0),
        Offset::new(0.0, -1e9),
        Offset::new(f32::MAX, f32::MIN),
        Offset::new(75.0, 0.0),
    ];
    for offset in offsets {
        for threshold in [0.0f32, 1e-30, 1.0, 150.0, f32::MAX, -5.0, f32::NAN] {
            let progress = swipe_progress(offset, threshold);
            assert!(
                (-1.0..=1.0).contains(&progress),
                "{offset:?} / {threshold} -> {progress}"
            );
        }
    }
    assert!(approx(swipe_progress(Offset::new(75.0, 0.0), 150.0), 0.5));
}

#[test]
fn zero_threshold_uses_sign() {
    assert_eq!(swipe_progress(Offset::new(-3.0, 1.0), 0.0), -1.0);
    assert_eq!(swipe_progress(Offset::new(3.0, 1.0), 0.0), 1.0);
    assert_eq!(swipe_progress(Offset::ZERO, 0.0), 0.0);
}

#[test]
fn upward_drag_is_positive_progress() {
    assert!(approx(swipe_progress(Offset::new(0.0, -60.0), 120.0), 0.5));
    assert!(approx(swipe_progress(Offset::new(10.0, 60.0), 120.0), -0.5));
}

#[test]
fn scale_at_index_two_is_capped() {
    let scale = card_scale(2, 4, 1.0);
    assert!((0.90..=0.95).contains(&scale), "{scale}");
    assert!(approx(scale, 0.95));
    assert!(approx(card_scale(2, 4, 0.0), 0.90));
}

#[test]
fn scale_never_grows_past_card_in_front() {
    for total in 1..8usize {
        for step in -10..=10 {
            let progress = step as f32 / 10.0;
            for index in 0..total.saturating_sub(1) {
                let front = card_scale(index, total, progress);
                let behind = card_scale(index + 1, total, progress);
                assert!(front >= behind, "n={total} i={index} p={progress}");
            }
        }
    }
    assert_eq!(card_scale(0, 3, 1.0), 1.0);
}

#[test]
fn resting_offsets_fan_away_from_anchor() {
    let s = 10.0;
    assert_eq!(resting_offset(CardAlignment::Top, 2, s), Offset::new(0.0, 20.0));
    assert_eq!(resting_offset(CardAlignment::TopStart, 2, s), Offset::new(-20.0, 20.0));
    assert_eq!(resting_offset(CardAlignment::TopEnd, 2, s), Offset::new(20.0, 20.0));
    assert_eq!(resting_offset(CardAlignment::Bottom, 2, s), Offset::new(0.0, -20.0));
    assert_eq!(resting_offset(CardAlignment::BottomStart, 1, s), Offset::new(-10.0, -10.0));
    assert_eq!(resting_offset(CardAlignment::BottomEnd, 1, s), Offset::new(10.0, -10.0));
    assert_eq!(resting_offset(CardAlignment::Start, 3, s), Offset::new(-30.0, 0.0));
    assert_eq!(resting_offset(CardAlignment::End, 3, s), Offset::new(30.0, 0.0));
    assert_eq!(resting_offset(CardAlignment::End, 0, s), Offset::ZERO);
}

#[test]
fn smoothstep_has_flat_ends() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!(approx(smoothstep(0.5), 0.5));
    assert_eq!(smoothstep(2.0), 1.0);
    assert_eq!(smoothstep(f32::NAN), 0.0);
}

#[test]
fn sympathy_pulls_trailing_cards_forward() {
    assert_eq!(
        drag_sympathy_offset(1.0, 0, 12.0, 4, CardAlignment::Bottom),
        Offset::ZERO
    );

    // p = 1 * (1 - 1/4) = 0.75 -> smoothstep = 0.84375
    let pulled = drag_sympathy_offset(-1.0, 1, 12.0, 4, CardAlignment::Bottom);
    assert!(approx(pulled.x, 0.0));
    assert!(approx(pulled.y, 0.84375 * 12.0), "{pulled:?}");

    let top = drag_sympathy_offset(1.0, 1, 12.0, 4, CardAlignment::TopStart);
    assert!(top.x > 0.0 && top.y < 0.0);

    for alignment in CardAlignment::ALL {
        let resting = resting_offset(alignment, 2, 12.0);
        let pulled = resting + drag_sympathy_offset(1.0, 2, 12.0, 4, alignment);
        assert!(pulled.distance() < resting.distance(), "{alignment:?}");
    }
}

#[test]
fn sympathy_tolerates_degenerate_input() {
    assert_eq!(
        drag_sympathy_offset(f32::NAN, 2, 12.0, 4, CardAlignment::End),
        Offset::ZERO
    );
    assert_eq!(
        drag_sympathy_offset(1.0, 2, 12.0, 0, CardAlignment::End),
        Offset::ZERO
    );
}

#[test]
fn alignment_adjustment_moves_along_fan_out() {
    let size = Size::new(200.0, 100.0);
    let bottom = alignment_adjustment(CardAlignment::Bottom, 0.9, size);
    assert!(approx(bottom.x, 0.0) && approx(bottom.y, -5.0), "{bottom:?}");
    let adjusted = alignment_adjustment(CardAlignment::TopEnd, 0.9, size);
    assert!(approx(adjusted.x, 10.0) && approx(adjusted.y, 5.0), "{adjusted:?}");
    let start = alignment_adjustment(CardAlignment::Start, 0.8, size);
    assert!(approx(start.x, -20.0) && approx(start.y, 0.0));
    assert_eq!(alignment_adjustment(CardAlignment::Top, 1.0, size), Offset::ZERO);
}
