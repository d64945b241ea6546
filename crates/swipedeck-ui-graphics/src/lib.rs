//! Pure math/data for swipedeck
//!
//! This crate contains the geometry primitives shared by the gesture,
//! animation and stack crates: positions, offsets, sizes and velocities.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Offset, Point, Size, Velocity};
}
