//! Rolling rate statistics over the most recent clicks and key presses.

use crate::session::ring::RingBuffer;
use crate::util::round2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_WINDOW_CAPACITY: usize = 100;
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(10);

/// Limits shared by the two trailing windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLimits {
    /// Maximum timestamps kept per window.
    pub capacity: usize,
    /// How far back a timestamp still counts towards a rate.
    pub rate_window: Duration,
}

impl Default for WindowLimits {
    fn default() -> Self {
        WindowLimits {
            capacity: DEFAULT_WINDOW_CAPACITY,
            rate_window: DEFAULT_RATE_WINDOW,
        }
    }
}

/// Timestamps of the last `capacity` occurrences of one input category.
#[derive(Debug, Clone)]
pub struct TrailingWindow {
    times: RingBuffer<f64>,
}

impl TrailingWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        TrailingWindow {
            times: RingBuffer::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, timestamp: f64) {
        self.times.push(timestamp);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of timestamps with `now - t <= window`.
    pub fn count_within(&self, now: f64, window: f64) -> usize {
        self.times.iter().filter(|&&t| now - t <= window).count()
    }

    /// Events per second in the trailing window.
    ///
    /// The divisor is `min(window, elapsed)`, so a burst shortly after the
    /// session starts yields a rate larger than the raw count. Zero when
    /// nothing falls in the window or no time has elapsed.
    pub fn rate(&self, now: f64, session_start: f64, window: f64) -> f64 {
        let recent = self.count_within(now, window);
        let elapsed = now - session_start;
        if recent == 0 || elapsed <= 0.0 {
            return 0.0;
        }
        recent as f64 / window.min(elapsed)
    }

    /// Mean gap between consecutive timestamps, in milliseconds.
    pub fn mean_interval_ms(&self) -> f64 {
        if self.times.len() < 2 {
            return 0.0;
        }
        let mut iter = self.times.iter();
        let Some(&first) = iter.next() else {
            return 0.0;
        };
        let mut prev = first;
        let mut sum = 0.0;
        for &t in iter {
            sum += t - prev;
            prev = t;
        }
        sum / (self.times.len() - 1) as f64 * 1000.0
    }
}

/// Derived performance metrics at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceSnapshot {
    #[serde(rename = "cps")]
    pub clicks_per_second: f64,
    #[serde(rename = "kps")]
    pub keys_per_second: f64,
    pub avg_key_interval_ms: f64,
    pub total_events: usize,
    pub session_duration: f64,
}

impl PerformanceSnapshot {
    /// Copy with every float rounded to two decimals.
    #[must_use]
    pub fn rounded(&self) -> Self {
        PerformanceSnapshot {
            clicks_per_second: round2(self.clicks_per_second),
            keys_per_second: round2(self.keys_per_second),
            avg_key_interval_ms: round2(self.avg_key_interval_ms),
            total_events: self.total_events,
            session_duration: round2(self.session_duration),
        }
    }
}

/// The click and key windows of one session.
#[derive(Debug, Clone)]
pub struct RollingStats {
    limits: WindowLimits,
    clicks: TrailingWindow,
    keys: TrailingWindow,
}

impl Default for RollingStats {
    fn default() -> Self {
        RollingStats::new(WindowLimits::default())
    }
}

impl RollingStats {
    pub fn new(limits: WindowLimits) -> Self {
        RollingStats {
            limits,
            clicks: TrailingWindow::with_capacity(limits.capacity),
            keys: TrailingWindow::with_capacity(limits.capacity),
        }
    }

    pub fn record_click(&mut self, timestamp: f64) {
        self.clicks.push(timestamp);
    }

    pub fn record_key(&mut self, timestamp: f64) {
        self.keys.push(timestamp);
    }

    pub fn clicks(&self) -> &TrailingWindow {
        &self.clicks
    }

    pub fn keys(&self) -> &TrailingWindow {
        &self.keys
    }

    /// Full-precision snapshot at `now`.
    pub fn snapshot_at(&self, now: f64, session_start: f64, total_events: usize) -> PerformanceSnapshot {
        let window = self.limits.rate_window.as_secs_f64();
        PerformanceSnapshot {
            clicks_per_second: self.clicks.rate(now, session_start, window),
            keys_per_second: self.keys.rate(now, session_start, window),
            avg_key_interval_ms: self.keys.mean_interval_ms(),
            total_events,
            session_duration: now - session_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn empty_window_is_all_zero() {
        let stats = RollingStats::default();
        let snap = stats.snapshot_at(100.0, 100.0, 0);
        assert_eq!(snap, PerformanceSnapshot::default());
    }

    #[test]
    fn rate_uses_full_window_after_ten_seconds() {
        let mut w = TrailingWindow::with_capacity(100);
        // Two old clicks outside the window, five inside.
        for t in [1.0, 2.0, 21.0, 22.0, 23.0, 24.0, 25.0] {
            w.push(t);
        }
        let rate = w.rate(30.0, 0.0, 10.0);
        assert!((rate - 0.5).abs() < EPS, "rate was {rate}");
    }

    #[test]
    fn window_edge_is_inclusive() {
        let mut w = TrailingWindow::with_capacity(10);
        w.push(20.0);
        assert_eq!(w.count_within(30.0, 10.0), 1);
        assert_eq!(w.count_within(30.000_001, 10.0), 0);
    }

    #[test]
    fn sub_second_elapsed_inflates_rate() {
        // Known approximation: 3 keys in the first 0.5 s report 6 keys/s.
        let mut w = TrailingWindow::with_capacity(10);
        for t in [0.1, 0.2, 0.3] {
            w.push(t);
        }
        let rate = w.rate(0.5, 0.0, 10.0);
        assert!((rate - 6.0).abs() < EPS, "rate was {rate}");
        assert!(rate > 3.0);
    }

    #[test]
    fn zero_elapsed_guards_division() {
        let mut w = TrailingWindow::with_capacity(10);
        w.push(5.0);
        assert_eq!(w.rate(5.0, 5.0, 10.0), 0.0);
    }

    #[test]
    fn mean_interval_in_ms() {
        let mut w = TrailingWindow::with_capacity(10);
        assert_eq!(w.mean_interval_ms(), 0.0);
        w.push(1.0);
        assert_eq!(w.mean_interval_ms(), 0.0);
        w.push(1.1);
        w.push(1.4);
        assert!((w.mean_interval_ms() - 200.0).abs() < 1e-6);
    }

    #[test]
    fn interval_only_spans_retained_samples() {
        let mut w = TrailingWindow::with_capacity(2);
        for t in [0.0, 10.0, 10.5] {
            w.push(t);
        }
        assert!((w.mean_interval_ms() - 500.0).abs() < 1e-6);
    }

    #[test]
    fn rounded_snapshot() {
        let snap = PerformanceSnapshot {
            clicks_per_second: 1.0 / 3.0,
            keys_per_second: 2.0 / 3.0,
            avg_key_interval_ms: 123.456,
            total_events: 7,
            session_duration: 9.999,
        };
        let r = snap.rounded();
        assert_eq!(r.clicks_per_second, 0.33);
        assert_eq!(r.keys_per_second, 0.67);
        assert_eq!(r.avg_key_interval_ms, 123.46);
        assert_eq!(r.session_duration, 10.0);
        assert_eq!(r.total_events, 7);
    }

    #[test]
    fn snapshot_serializes_short_names() {
        let value = serde_json::to_value(PerformanceSnapshot::default()).unwrap();
        assert!(value.get("cps").is_some());
        assert!(value.get("kps").is_some());
        assert!(value.get("avg_key_interval_ms").is_some());
    }
}
