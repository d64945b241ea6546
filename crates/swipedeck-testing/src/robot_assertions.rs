//! Assertion utilities for robot testing
//!
//! Helpers for checking card stack state with float tolerance and readable
//! failure messages.

use std::fmt::Debug;
use swipedeck_stack::CardVisual;
use swipedeck_ui_graphics::Offset;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that two offsets match on both axes.
pub fn assert_offset_approx_eq(actual: Offset, expected: Offset, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that the stack holds exactly `expected`, front first.
pub fn assert_keys<K: PartialEq + Debug>(actual: &[K], expected: &[K], msg: &str) {
    assert_eq!(actual, expected, "{}: unexpected stack contents", msg);
}

/// Assert that visuals are listed front first with strictly decreasing
/// z-order and never-increasing scale.
pub fn assert_stack_order<K: Debug>(visuals: &[CardVisual<K>], msg: &str) {
    for (index, visual) in visuals.iter().enumerate() {
        assert_eq!(visual.index, index, "{}: visual {:?} out of place", msg, visual);
        assert_eq!(
            visual.z_index,
            visuals.len() - index,
            "{}: wrong z-order for {:?}",
            msg,
            visual
        );
    }
    for pair in visuals.windows(2) {
        assert!(
            pair[0].scale + 1e-4 >= pair[1].scale,
            "{}: {:?} is smaller than the card behind it {:?}",
            msg,
            pair[0],
            pair[1]
        );
    }
}

/// Assert that a collection has an expected count.
pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}",
        msg,
        expected,
        items.len()
    );
}
