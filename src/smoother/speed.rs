//! Sliding-window scroll speed estimation.

use std::collections::VecDeque;

/// Estimates the target scroll speed from recent inter-notch intervals.
///
/// The estimate counts how many full and partial notches fall within a
/// trailing window and divides by the wall time they span. Compared with
/// the reciprocal of a single interval, this reacts far less nervously to
/// the jitter between individual notches.
#[derive(Debug)]
pub(crate) struct SpeedEstimator {
    window_us: i64,
    speed_factor: f64,
    intervals: VecDeque<i64>,
}

impl SpeedEstimator {
    pub fn new(window_us: i64, speed_factor: f64) -> Self {
        SpeedEstimator {
            window_us,
            speed_factor,
            intervals: VecDeque::new(),
        }
    }

    /// Forget the history. Called when a gesture starts over.
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Record an interval without producing an estimate.
    ///
    /// Used while suppressed notches accumulate during braking dejitter,
    /// so the eventual relaunch sees the whole burst. Window-based
    /// eviction happens only in [`estimate`](Self::estimate).
    pub fn record(&mut self, interval_us: i64) {
        self.intervals.push_back(interval_us);
    }

    /// Fold a new interval into the window and return the estimated speed
    /// in wheel units per second.
    ///
    /// An interval longer than the window discards the history outright.
    /// Two notches with identical timestamps produce an infinite
    /// estimate; callers clamp the result.
    pub fn estimate(&mut self, interval_us: i64) -> f64 {
        let mut count = 1.0;
        let mut duration_us = interval_us;

        if interval_us > self.window_us {
            self.intervals.clear();
        } else {
            let mut contributing = self.intervals.len();
            for (walked, &past) in self.intervals.iter().rev().enumerate() {
                if past + duration_us > self.window_us {
                    count += (self.window_us - duration_us) as f64 / past as f64;
                    duration_us = self.window_us;
                    contributing = walked + 1;
                    break;
                }
                duration_us += past;
                count += 1.0;
            }
            // Entries past the window can never contribute again; newer
            // intervals only push them further out.
            while self.intervals.len() > contributing {
                self.intervals.pop_front();
            }
            self.intervals.push_back(interval_us);
        }

        self.speed_factor * count / (duration_us as f64 / 1e6)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.intervals.len()
    }
}
