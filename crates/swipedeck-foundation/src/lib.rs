//! Foundation elements for swipedeck: pointer input, velocity tracking and timing

pub mod clock;
pub mod gesture_constants;
pub mod input;
pub mod velocity_tracker;

pub use clock::UptimeClock;
pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::{AxisVelocityTracker, VelocityTracker};

pub mod prelude {
    pub use crate::gesture_constants::*;
    pub use crate::input::prelude::*;
    pub use crate::velocity_tracker::VelocityTracker;
}
