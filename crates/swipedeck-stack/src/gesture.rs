//! Drag state machine for the front card.
//!
//! The controller turns a normalized pointer stream into an accumulated drag
//! offset, decides commit or reset on release, and then walks through timed
//! settle phases driven by frame ticks. Input arriving while a settle phase
//! plays is discarded, so at most one decision is in flight at a time.

use crate::config::{StackConfiguration, StackMetrics};
use crate::heuristics::{evaluate_release, swipe_progress, target_offset, DismissDecision, SwipeDirection};
use swipedeck_foundation::gesture_constants::MAX_FLING_VELOCITY;
use swipedeck_foundation::{PointerEvent, PointerEventKind, PointerId, VelocityTracker};
use swipedeck_ui_graphics::{Offset, Point, Velocity};

/// How long a committed card flies out before it is removed.
pub const EXIT_DURATION_MS: u64 = 150;

/// Pause after removal while the next card settles into the front slot.
pub const RECOVER_DURATION_MS: u64 = 150;

/// How long a reset card is given to return before input is accepted again.
pub const RETURN_DURATION_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettlePhase {
    /// The committed card travels to its exit position.
    Exiting(SwipeDirection),
    /// The card has been removed; the stack catches up.
    Recovering,
    /// A reset card springs back to rest.
    Returning,
}

impl SettlePhase {
    fn duration_nanos(&self) -> u64 {
        let millis = match self {
            SettlePhase::Exiting(_) => EXIT_DURATION_MS,
            SettlePhase::Recovering => RECOVER_DURATION_MS,
            SettlePhase::Returning => RETURN_DURATION_MS,
        };
        millis * 1_000_000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Settling(SettlePhase),
}

/// Snapshot of the live drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub offset: Offset,
    pub settling: bool,
    /// Normalized drag progress in `[-1, 1]`.
    pub progress: f32,
}

/// Transitions reported by [`GestureController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    /// The exit finished; the owner removes the front card now.
    Finalize(SwipeDirection),
    /// Settling finished and the controller is idle again.
    Settled,
}

#[derive(Debug, Clone, Default)]
pub struct GestureController {
    phase: GesturePhase,
    pointer: Option<PointerId>,
    last_position: Point,
    offset: Offset,
    progress: f32,
    tracker: VelocityTracker,
    phase_started_nanos: Option<u64>,
    last_decision: Option<DismissDecision>,
    release_velocity: Velocity,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn state(&self) -> GestureState {
        GestureState {
            offset: self.offset,
            settling: self.is_settling(),
            progress: self.progress,
        }
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GesturePhase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, GesturePhase::Settling(_))
    }

    /// Pointer that owns the current drag, if any.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Decision produced by the most recent release.
    pub fn last_decision(&self) -> Option<DismissDecision> {
        self.last_decision
    }

    /// Velocity measured at the most recent release, in px/s.
    pub fn release_velocity(&self) -> Velocity {
        self.release_velocity
    }

    /// Whether the front card should be raised above its resting elevation.
    pub fn front_engaged(&self) -> bool {
        matches!(
            self.phase,
            GesturePhase::Dragging
                | GesturePhase::Settling(SettlePhase::Exiting(_))
                | GesturePhase::Settling(SettlePhase::Returning)
        )
    }

    /// Feed a pointer event. Returns true when the event was handled, in
    /// which case it is also marked consumed.
    pub fn on_pointer_event(
        &mut self,
        event: &PointerEvent,
        config: &StackConfiguration,
        metrics: &StackMetrics,
    ) -> bool {
        if event.is_consumed() {
            return false;
        }

        let handled = match event.kind {
            PointerEventKind::Down => self.pointer_down(event),
            PointerEventKind::Move => self.pointer_move(event, config, metrics),
            PointerEventKind::Up => self.release(event, config, metrics, false),
            PointerEventKind::Cancel => self.release(event, config, metrics, true),
        };
        if handled {
            event.consume();
        }
        handled
    }

    fn owns(&self, event: &PointerEvent) -> bool {
        self.is_dragging() && self.pointer == Some(event.id)
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        match self.phase {
            GesturePhase::Idle => {}
            GesturePhase::Dragging => return false,
            GesturePhase::Settling(phase) => {
                log::debug!("ignoring pointer {} down while settling ({phase:?})", event.id);
                return false;
            }
        }

        self.phase = GesturePhase::Dragging;
        self.pointer = Some(event.id);
        self.last_position = event.position;
        self.offset = Offset::ZERO;
        self.progress = 0.0;
        self.last_decision = None;
        self.release_velocity = Velocity::ZERO;
        self.tracker.reset();
        self.tracker.add_position(event.time_ms, Offset::ZERO);
        log::debug!("drag started by pointer {} at {:?}", event.id, event.position);
        true
    }

    fn pointer_move(
        &mut self,
        event: &PointerEvent,
        config: &StackConfiguration,
        metrics: &StackMetrics,
    ) -> bool {
        if !self.owns(event) {
            return false;
        }
        self.apply_position(event, config, metrics);
        true
    }

    fn apply_position(
        &mut self,
        event: &PointerEvent,
        config: &StackConfiguration,
        metrics: &StackMetrics,
    ) {
        let delta = config.drag_axis.constrain(event.position - self.last_position);
        self.last_position = event.position;
        if delta.is_finite() {
            self.offset += delta;
        }
        self.tracker.add_position(event.time_ms, self.offset);
        self.progress = swipe_progress(self.offset, metrics.velocity_threshold_px);
    }

    fn release(
        &mut self,
        event: &PointerEvent,
        config: &StackConfiguration,
        metrics: &StackMetrics,
        cancelled: bool,
    ) -> bool {
        if !self.owns(event) {
            return false;
        }

        let velocity = if cancelled {
            Velocity::ZERO
        } else {
            self.apply_position(event, config, metrics);
            self.tracker.calculate_velocity_with_max(MAX_FLING_VELOCITY)
        };
        let decision = evaluate_release(
            velocity,
            self.offset,
            metrics.card_size,
            metrics.velocity_threshold_px,
        );
        log::debug!(
            "drag released at {:?} with velocity {:?} (cancelled: {cancelled}): {decision:?}",
            self.offset,
            velocity
        );

        self.release_velocity = velocity;
        self.last_decision = Some(decision);
        self.pointer = None;
        self.tracker.reset();
        self.phase_started_nanos = None;

        match decision {
            DismissDecision::Commit(direction) => {
                self.offset = target_offset(
                    direction,
                    metrics.card_size,
                    self.offset,
                    config.alignment,
                );
                self.progress = swipe_progress(self.offset, metrics.velocity_threshold_px);
                self.phase = GesturePhase::Settling(SettlePhase::Exiting(direction));
            }
            DismissDecision::Reset => {
                self.offset = Offset::ZERO;
                self.progress = 0.0;
                self.phase = GesturePhase::Settling(SettlePhase::Returning);
            }
        }
        true
    }

    /// Step settle timers to `frame_time_nanos`.
    ///
    /// Each phase is timed from the first frame seen after it began. At most
    /// one transition happens per call.
    pub fn advance(&mut self, frame_time_nanos: u64) -> Option<GestureEvent> {
        let GesturePhase::Settling(phase) = self.phase else {
            return None;
        };

        let started = *self.phase_started_nanos.get_or_insert(frame_time_nanos);
        if frame_time_nanos.saturating_sub(started) < phase.duration_nanos() {
            return None;
        }

        match phase {
            SettlePhase::Exiting(direction) => {
                self.offset = Offset::ZERO;
                self.progress = 0.0;
                self.phase = GesturePhase::Settling(SettlePhase::Recovering);
                self.phase_started_nanos = Some(frame_time_nanos);
                Some(GestureEvent::Finalize(direction))
            }
            SettlePhase::Recovering | SettlePhase::Returning => {
                self.clear();
                Some(GestureEvent::Settled)
            }
        }
    }

    /// Drop any drag or settle state without producing a finalize event.
    ///
    /// Returns true if something was in flight.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.is_idle();
        if was_active {
            log::debug!("gesture cancelled in phase {:?}", self.phase);
        }
        self.clear();
        was_active
    }

    fn clear(&mut self) {
        self.phase = GesturePhase::Idle;
        self.pointer = None;
        self.offset = Offset::ZERO;
        self.progress = 0.0;
        self.tracker.reset();
        self.phase_started_nanos = None;
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
