//! Robot-style driver for card stacks
//!
//! The robot owns a [`CardStack`] and a virtual clock. Pointer interactions
//! are turned into timestamped [`PointerEvent`]s and every simulated step also
//! ticks a frame, so tests read like a user script:
//!
//! ```
//! use swipedeck_stack::{CardStack, StackConfiguration, StackItem};
//! use swipedeck_testing::StackRobot;
//! use swipedeck_ui_graphics::{Offset, Point, Size};
//!
//! let mut stack = CardStack::new(StackConfiguration::default(), Size::new(400.0, 800.0)).unwrap();
//! stack.set_items((0..3).map(|i| StackItem::new(i, ())));
//!
//! let mut robot = StackRobot::new(stack);
//! robot.swipe(Point::new(200.0, 400.0), Offset::new(-200.0, 0.0), 100);
//! robot.pump_until_idle();
//! assert_eq!(robot.stack().len(), 2);
//! ```

use std::hash::Hash;
use swipedeck_foundation::{PointerEvent, PointerId};
use swipedeck_stack::{CardStack, CardVisual};
use swipedeck_ui_graphics::{Offset, Point};

/// Spacing of simulated pointer moves.
pub const POINTER_STEP_MS: i64 = 10;

/// Frame interval used by [`StackRobot::advance_time`].
pub const FRAME_INTERVAL_MS: i64 = 16;

/// Upper bound on frames pumped by [`StackRobot::pump_until_idle`].
pub const MAX_IDLE_FRAMES: usize = 1_000;

/// Plain copy of the stack's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSnapshot<K> {
    pub keys: Vec<K>,
    pub visuals: Vec<CardVisual<K>>,
    pub progress: f32,
    pub settling: bool,
}

pub struct StackRobot<K, T> {
    stack: CardStack<K, T>,
    now_ms: i64,
    pointer: PointerId,
    cursor: Point,
    pressed: bool,
}

impl<K, T> StackRobot<K, T>
where
    K: Clone + Eq + Hash,
{
    pub fn new(stack: CardStack<K, T>) -> Self {
        Self {
            stack,
            now_ms: 0,
            pointer: 0,
            cursor: Point::ZERO,
            pressed: false,
        }
    }

    /// Use `pointer` as the id of subsequent interactions.
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn stack(&self) -> &CardStack<K, T> {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut CardStack<K, T> {
        &mut self.stack
    }

    pub fn into_stack(self) -> CardStack<K, T> {
        self.stack
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn frame_nanos(&self) -> u64 {
        self.now_ms.max(0) as u64 * 1_000_000
    }

    fn send(&mut self, event: PointerEvent) -> bool {
        self.stack.on_pointer_event(&event.with_id(self.pointer))
    }

    /// Press at `position`. Returns true if the stack took the press.
    pub fn press(&mut self, position: Point) -> bool {
        self.cursor = position;
        self.pressed = true;
        let handled = self.send(PointerEvent::down(position, self.now_ms));
        self.step();
        handled
    }

    /// Advance one pointer step and move to `position`.
    pub fn move_to(&mut self, position: Point) -> bool {
        self.now_ms += POINTER_STEP_MS;
        self.cursor = position;
        let handled = self.send(PointerEvent::moved(position, self.now_ms));
        self.step();
        handled
    }

    /// Release at the current cursor position without waiting.
    pub fn release(&mut self) -> bool {
        self.pressed = false;
        let handled = self.send(PointerEvent::up(self.cursor, self.now_ms));
        self.step();
        handled
    }

    /// Cancel the pointer at the current cursor position.
    pub fn cancel(&mut self) -> bool {
        self.pressed = false;
        let handled = self.send(PointerEvent::cancel(self.cursor, self.now_ms));
        self.step();
        handled
    }

    /// Press at `from` and move by `by` in even steps over `duration_ms`,
    /// leaving the pointer down.
    pub fn drag(&mut self, from: Point, by: Offset, duration_ms: i64) -> bool {
        let handled = self.press(from);
        let steps = (duration_ms / POINTER_STEP_MS).max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.move_to(from + by * fraction);
        }
        handled
    }

    /// [`drag`](Self::drag) followed by an immediate release.
    pub fn swipe(&mut self, from: Point, by: Offset, duration_ms: i64) -> bool {
        let handled = self.drag(from, by, duration_ms);
        self.release();
        handled
    }

    /// Tick a single frame at the current time.
    pub fn step(&mut self) -> bool {
        self.stack.advance(self.frame_nanos())
    }

    /// Let `millis` of virtual time pass in frame-sized steps.
    pub fn advance_time(&mut self, millis: i64) {
        let end = self.now_ms + millis.max(0);
        while self.now_ms < end {
            self.now_ms = (self.now_ms + FRAME_INTERVAL_MS).min(end);
            self.step();
        }
    }

    /// Tick frames until the stack reports it is idle.
    ///
    /// Returns the number of frames ticked, or `None` if the stack was still
    /// busy after [`MAX_IDLE_FRAMES`].
    pub fn pump_until_idle(&mut self) -> Option<usize> {
        for frame in 0..MAX_IDLE_FRAMES {
            if !self.step() {
                return Some(frame);
            }
            self.now_ms += FRAME_INTERVAL_MS;
        }
        log::warn!("stack still busy after {MAX_IDLE_FRAMES} frames");
        None
    }

    pub fn snapshot(&self) -> StackSnapshot<K> {
        let state = self.stack.gesture_state();
        StackSnapshot {
            keys: self.stack.items().iter().map(|item| item.key.clone()).collect(),
            visuals: self.stack.card_visuals().into_vec(),
            progress: state.progress,
            settling: state.settling,
        }
    }
}
