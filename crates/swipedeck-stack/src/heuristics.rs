//! Pure geometry for swipe decisions and per-card placement.
//!
//! Nothing here holds state. The gesture controller calls into the release
//! decision functions; the animator calls the placement functions every frame
//! to compute its targets.

use crate::config::CardAlignment;
use swipedeck_foundation::gesture_constants::{STILL_OFFSET, STILL_VELOCITY};
use swipedeck_ui_graphics::{Offset, Size, Velocity};

/// Horizontal drag distance, as a fraction of card width, that commits a swipe.
pub const HORIZONTAL_COMMIT_FRACTION: f32 = 0.15;

/// Vertical drag distance, as a fraction of card height, that commits a swipe.
pub const VERTICAL_COMMIT_FRACTION: f32 = 0.25;

/// How far past the card's own size a dismissed card travels.
pub const EXIT_DISTANCE_FACTOR: f32 = 1.5;

/// Scale lost per position in the stack.
pub const SCALE_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }
}

/// Outcome of a released drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissDecision {
    Reset,
    Commit(SwipeDirection),
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn direction_on_axis(horizontal: bool, sign: f32) -> SwipeDirection {
    match (horizontal, sign < 0.0) {
        (true, true) => SwipeDirection::Left,
        (true, false) => SwipeDirection::Right,
        (false, true) => SwipeDirection::Up,
        (false, false) => SwipeDirection::Down,
    }
}

/// Classify the intended swipe direction of a gesture.
///
/// The dominant axis is the one with the larger velocity magnitude (ties
/// pick vertical) and the offset on that axis must share the velocity's sign.
/// A gesture that has all but stopped is classified by its dominant offset
/// axis instead. Returns `None` when nothing moved or the signs disagree.
pub fn classify_direction(velocity: Velocity, offset: Offset) -> Option<SwipeDirection> {
    let (vx, vy) = (finite_or_zero(velocity.x), finite_or_zero(velocity.y));
    let (ox, oy) = (finite_or_zero(offset.x), finite_or_zero(offset.y));

    if vx.abs() < STILL_VELOCITY && vy.abs() < STILL_VELOCITY {
        if ox.abs() < STILL_OFFSET && oy.abs() < STILL_OFFSET {
            return None;
        }
        let horizontal = ox.abs() > oy.abs();
        let sign = if horizontal { ox } else { oy };
        return Some(direction_on_axis(horizontal, sign));
    }

    let horizontal = vx.abs() > vy.abs();
    let (v, o) = if horizontal { (vx, ox) } else { (vy, oy) };
    if v * o > 0.0 {
        Some(direction_on_axis(horizontal, v))
    } else {
        None
    }
}

/// True when either velocity component exceeds `threshold_px` (px/s).
pub fn is_velocity_commit(velocity: Velocity, threshold_px: f32) -> bool {
    velocity.x.abs() > threshold_px || velocity.y.abs() > threshold_px
}

/// True when the offset has travelled far enough in `direction` to commit
/// on distance alone.
pub fn is_distance_commit(direction: SwipeDirection, offset: Offset, card_size: Size) -> bool {
    let horizontal_limit = HORIZONTAL_COMMIT_FRACTION * card_size.width;
    let vertical_limit = VERTICAL_COMMIT_FRACTION * card_size.height;
    match direction {
        SwipeDirection::Left => offset.x < -horizontal_limit,
        SwipeDirection::Right => offset.x > horizontal_limit,
        SwipeDirection::Up => offset.y < -vertical_limit,
        SwipeDirection::Down => offset.y > vertical_limit,
    }
}

/// Where a committed card flies to.
///
/// Vertical exits away from the anchor start from the anchor line so a card
/// dragged slightly the other way still clears the stack.
pub fn target_offset(
    direction: SwipeDirection,
    card_size: Size,
    current: Offset,
    alignment: CardAlignment,
) -> Offset {
    let exit_x = EXIT_DISTANCE_FACTOR * card_size.width;
    let exit_y = EXIT_DISTANCE_FACTOR * card_size.height;
    match direction {
        SwipeDirection::Left => Offset::new(-exit_x, current.y),
        SwipeDirection::Right => Offset::new(exit_x, current.y),
        SwipeDirection::Up if alignment.is_bottom_anchored() => {
            Offset::new(current.x, current.y.min(0.0) - exit_y)
        }
        SwipeDirection::Up => Offset::new(current.x, -exit_y),
        SwipeDirection::Down if alignment.is_top_anchored() => {
            Offset::new(current.x, current.y.max(0.0) + exit_y)
        }
        SwipeDirection::Down => Offset::new(current.x, exit_y),
    }
}

fn sign_or_zero(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Normalized drag progress in `[-1, 1]`.
///
/// Uses the axis with the larger offset. Horizontal progress follows the sign
/// of x; vertical progress is positive for upward drags. A zero or invalid
/// threshold yields the sign of the offset.
pub fn swipe_progress(offset: Offset, threshold_px: f32) -> f32 {
    let (x, y) = (finite_or_zero(offset.x), finite_or_zero(offset.y));
    let signed = if x.abs() >= y.abs() { x } else { -y };

    if !threshold_px.is_finite() || threshold_px <= 0.0 {
        return sign_or_zero(signed);
    }

    (signed / threshold_px).clamp(-1.0, 1.0)
}

/// Scale of the card at `index` given the front card's drag progress.
///
/// Trailing cards grow toward the next slot while the front card is dragged,
/// never by more than one step, so a card never outgrows the one in front.
pub fn card_scale(index: usize, total_count: usize, stack_progress: f32) -> f32 {
    let base = resting_scale(index);
    if index == 0 {
        return base;
    }
    let progress = finite_or_zero(stack_progress).abs().min(1.0);
    let behind = total_count.saturating_sub(index + 1) as f32;
    (base + (SCALE_STEP * progress * behind).min(SCALE_STEP)).min(resting_scale(index - 1))
}

fn resting_scale(index: usize) -> f32 {
    1.0 - SCALE_STEP * index as f32
}

/// Resting translation of the card at `index`, fanned out away from the anchor.
pub fn resting_offset(alignment: CardAlignment, index: usize, spacing_px: f32) -> Offset {
    alignment.fan_out_direction() * (spacing_px * index as f32)
}

/// Hermite smoothstep on `[0, 1]`.
pub fn smoothstep(p: f32) -> f32 {
    let p = finite_or_zero(p).clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

/// Extra translation that pulls a trailing card toward the front while the
/// front card is dragged.
pub fn drag_sympathy_offset(
    stack_progress: f32,
    index: usize,
    spacing_px: f32,
    total_count: usize,
    alignment: CardAlignment,
) -> Offset {
    if index == 0 || total_count == 0 {
        return Offset::ZERO;
    }
    let depth = 1.0 - index as f32 / total_count as f32;
    let eased = smoothstep(finite_or_zero(stack_progress).abs() * depth);
    -(alignment.fan_out_direction() * (eased * spacing_px))
}

/// Shift applied to a card scaled about its centre so its peeking edge stays
/// where an unscaled card's edge would be.
pub fn alignment_adjustment(alignment: CardAlignment, scale: f32, card_size: Size) -> Offset {
    let shrink = 1.0 - finite_or_zero(scale);
    let direction = alignment.fan_out_direction();
    Offset::new(
        direction.x * card_size.width * shrink / 2.0,
        direction.y * card_size.height * shrink / 2.0,
    )
}

/// Decide a released drag: commit when a direction is clear and either the
/// release velocity or the travelled distance is past its threshold.
pub fn evaluate_release(
    velocity: Velocity,
    offset: Offset,
    card_size: Size,
    threshold_px: f32,
) -> DismissDecision {
    match classify_direction(velocity, offset) {
        Some(direction)
            if is_velocity_commit(velocity, threshold_px)
                || is_distance_commit(direction, offset, card_size) =>
        {
            DismissDecision::Commit(direction)
        }
        _ => DismissDecision::Reset,
    }
}

#[cfg(test)]
#[path = "tests/heuristics_tests.rs"]
mod tests;
