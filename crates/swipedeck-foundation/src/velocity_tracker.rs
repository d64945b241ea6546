//! Release velocity estimation.
//!
//! Uses the impulse strategy: each movement between two samples adds kinetic
//! energy to a unit mass, and the resulting speed is read back at the end.
//! Recent motion dominates, so a flick that slows just before lift-off still
//! reads as slow.

use swipedeck_ui_graphics::{Offset, Velocity};

/// Samples kept per axis.
const HISTORY_SIZE: usize = 20;

/// Samples older than this, relative to the newest one, are ignored.
pub const HORIZON_MS: i64 = 100;

/// A gap between consecutive samples longer than this means the pointer
/// stopped; everything before the gap is ignored.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct AxisSample {
    time_ms: i64,
    value: f32,
}

/// Velocity of a single coordinate.
///
/// ```
/// use swipedeck_foundation::AxisVelocityTracker;
///
/// let mut tracker = AxisVelocityTracker::new();
/// tracker.add_data_point(0, 0.0);
/// tracker.add_data_point(10, 100.0);
/// assert!(tracker.calculate_velocity() > 0.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AxisVelocityTracker {
    ring: [AxisSample; HISTORY_SIZE],
    /// Slot the next sample is written to.
    head: usize,
    len: usize,
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` observed at `time_ms`. The oldest sample is
    /// overwritten once the history is full.
    pub fn add_data_point(&mut self, time_ms: i64, value: f32) {
        self.ring[self.head] = AxisSample { time_ms, value };
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.len = (self.len + 1).min(HISTORY_SIZE);
    }

    /// Samples from newest to oldest.
    fn newest_first(&self) -> impl Iterator<Item = AxisSample> + '_ {
        (1..=self.len).map(move |back| self.ring[(self.head + HISTORY_SIZE - back) % HISTORY_SIZE])
    }

    /// Velocity in units per second, or 0.0 when fewer than two usable
    /// samples remain.
    pub fn calculate_velocity(&self) -> f32 {
        let mut samples = self.newest_first();
        let Some(newest) = samples.next() else {
            return 0.0;
        };

        let mut window = [newest; HISTORY_SIZE];
        let mut count = 1;
        let mut newer = newest;
        for sample in samples {
            let age = newest.time_ms - sample.time_ms;
            let gap = (newer.time_ms - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            window[count] = sample;
            count += 1;
            newer = sample;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&window[..count]) * 1000.0
    }

    /// [`calculate_velocity`](Self::calculate_velocity) clamped to
    /// `±max_velocity`. A non-positive or non-finite cap yields 0.0.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

/// Units per millisecond from samples ordered newest first.
fn impulse_velocity(newest_first: &[AxisSample]) -> f32 {
    let mut work = 0.0f32;
    // walk oldest pair to newest pair
    for (step, pair) in newest_first.windows(2).rev().enumerate() {
        let (newer, older) = (pair[0], pair[1]);
        let dt = (newer.time_ms - older.time_ms) as f32;
        if dt == 0.0 {
            continue;
        }
        let segment = (newer.value - older.value) / dt;
        work += (segment - energy_to_velocity(work)) * segment.abs();
        if step == 0 {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// Inverts `E = v² / 2` for a unit mass, keeping the sign of `energy`.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Tracks the drag offset on both axes.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: AxisVelocityTracker,
    y: AxisVelocityTracker,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Offset) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    /// Velocity in px/s on both axes.
    pub fn calculate_velocity(&self) -> Velocity {
        Velocity::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }

    /// Velocity in px/s with each axis clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> Velocity {
        Velocity::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
