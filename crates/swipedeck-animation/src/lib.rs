//! Animation primitives for swipedeck
//!
//! Values are advanced explicitly by the host's frame ticks; nothing here
//! owns a clock or schedules callbacks on its own.

mod animation;

pub use animation::*;
