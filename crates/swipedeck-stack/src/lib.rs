//! Gesture and physics engine for swipeable card stacks
//!
//! A [`CardStack`] takes an ordered list of keyed items, a configuration and
//! a viewport. The host feeds it pointer events and frame timestamps, then
//! reads back one [`CardVisual`] per card. Swiping the front card left or
//! right removes it and invokes the matching callback.

pub mod animator;
pub mod card_stack;
pub mod collections;
pub mod config;
pub mod gesture;
pub mod heuristics;

pub use animator::{CardVisual, StackAnimator, StackFrame};
pub use card_stack::{CardStack, StackItem};
pub use config::{
    CardAlignment, ConfigError, ContentAnchor, DragAxis, StackConfiguration, StackMetrics,
};
pub use gesture::{GestureController, GestureEvent, GesturePhase, GestureState, SettlePhase};
pub use heuristics::{DismissDecision, SwipeDirection};

pub use swipedeck_foundation::{PointerEvent, PointerEventKind, PointerId, UptimeClock};
pub use swipedeck_ui_graphics::{Offset, Point, Size, Velocity};

pub mod prelude {
    pub use crate::card_stack::{CardStack, StackItem};
    pub use crate::config::{CardAlignment, DragAxis, StackConfiguration};
    pub use crate::heuristics::SwipeDirection;
    pub use swipedeck_foundation::{PointerEvent, UptimeClock};
    pub use swipedeck_ui_graphics::prelude::*;
}
