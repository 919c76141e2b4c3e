//! Microsecond timestamps for input events.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time expressed as microseconds on the realtime clock.
///
/// Kernel input events are stamped on this clock by default. The smoother
/// only subtracts and offsets timestamps, so a plain microsecond count is
/// all it needs; the host decides where "now" comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventTime(i64);

impl EventTime {
    /// The clock epoch.
    pub const ZERO: EventTime = EventTime(0);

    /// Build a timestamp from a raw microsecond count.
    pub fn from_micros(micros: i64) -> Self {
        EventTime(micros)
    }

    /// The raw microsecond count.
    pub fn as_micros(self) -> i64 {
        self.0
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }

    /// This timestamp shifted forward by `micros`.
    pub fn add_micros(self, micros: i64) -> Self {
        EventTime(self.0.saturating_add(micros))
    }

    /// Signed distance from `earlier` to `self`, in microseconds.
    ///
    /// Negative when `self` precedes `earlier`; callers working with
    /// possibly out-of-order input timestamps clamp the result at zero.
    pub fn micros_since(self, earlier: EventTime) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Duration from `earlier` to `self`, or zero if `self` is not later.
    pub fn saturating_duration_since(self, earlier: EventTime) -> Duration {
        Duration::from_micros(self.micros_since(earlier).max(0) as u64)
    }
}

impl From<SystemTime> for EventTime {
    fn from(t: SystemTime) -> Self {
        let micros = t
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0);
        EventTime(micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_roundtrip() {
        let t = EventTime::from_micros(1_234_567);
        assert_eq!(t.as_micros(), 1_234_567);
    }

    #[test]
    fn signed_distance() {
        let a = EventTime::from_micros(1_000);
        let b = EventTime::from_micros(4_500);
        assert_eq!(b.micros_since(a), 3_500);
        assert_eq!(a.micros_since(b), -3_500);
    }

    #[test]
    fn duration_saturates_at_zero() {
        let a = EventTime::from_micros(1_000);
        let b = EventTime::from_micros(4_500);
        assert_eq!(b.saturating_duration_since(a), Duration::from_micros(3_500));
        assert_eq!(a.saturating_duration_since(b), Duration::ZERO);
    }

    #[test]
    fn from_system_time() {
        let t = UNIX_EPOCH + Duration::from_micros(42);
        assert_eq!(EventTime::from(t).as_micros(), 42);

        // Pre-epoch timestamps collapse to the epoch rather than wrapping.
        let before = UNIX_EPOCH - Duration::from_secs(1);
        assert_eq!(EventTime::from(before), EventTime::ZERO);
    }
}
