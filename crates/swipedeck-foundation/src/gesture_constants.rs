//! Shared gesture constants for consistent touch/pointer handling.
//!
//! # DPI Considerations
//!
//! These values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density. Release velocities are clamped to this before any swipe
/// decision is made.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Below this speed (px/s) on both axes a release is treated as a slow drag
/// and its direction is inferred from displacement alone.
pub const STILL_VELOCITY: f32 = 0.5;

/// Displacements (px) shorter than this on both axes carry no direction.
pub const STILL_OFFSET: f32 = 0.5;
