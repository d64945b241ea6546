//! Monotonic uptime for stamping pointer events and frames.

use web_time::Instant;

/// Uptime measured from the moment the clock was created.
///
/// Hosts that already receive timestamps from their windowing layer should
/// pass those through instead; this exists for hosts that do not.
#[derive(Debug, Clone, Copy)]
pub struct UptimeClock {
    origin: Instant,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds since creation, for [`PointerEvent::time_ms`](crate::PointerEvent).
    pub fn uptime_millis(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }

    /// Nanoseconds since creation, for frame ticks.
    pub fn uptime_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}
