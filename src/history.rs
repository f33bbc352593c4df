/// Rolling sample windows for the dashboard charts.
///
/// Each chart line shows only the most recent samples; older points are
/// evicted as new ones arrive. The buffers are plain in-memory state;
/// there is no persistence and no historical query path.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Number of samples each chart line keeps by default.
pub const DEFAULT_SERIES_CAPACITY: usize = 10;

/// A fixed-capacity window of timestamped samples, oldest first.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    capacity: usize,
    samples: VecDeque<(DateTime<Utc>, f64)>,
}

impl SeriesBuffer {
    /// Creates an empty buffer holding at most `capacity` samples.
    /// A zero capacity is coerced to 1 so a push is never a no-op.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a sample, evicting the oldest one when the window is full.
    pub fn push(&mut self, at: DateTime<Utc>, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((at, value));
    }

    /// Samples in chronological order.
    pub fn samples(&self) -> impl Iterator<Item = &(DateTime<Utc>, f64)> {
        self.samples.iter()
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<&(DateTime<Utc>, f64)> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SERIES_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn t(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    #[test]
    fn test_push_under_capacity_keeps_all_samples() {
        let mut series = SeriesBuffer::new(10);
        for i in 0..5 {
            series.push(t(i), i as f64);
        }
        assert_eq!(series.len(), 5);
        assert_eq!(series.latest(), Some(&(t(4), 4.0)));
    }

    #[test]
    fn test_push_past_capacity_evicts_oldest() {
        let mut series = SeriesBuffer::new(3);
        for i in 0..5 {
            series.push(t(i), i as f64);
        }
        let values: Vec<f64> = series.samples().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0], "oldest samples should be evicted first");
        assert_eq!(series.len(), series.capacity());
    }

    #[test]
    fn test_samples_stay_in_chronological_order() {
        let mut series = SeriesBuffer::new(4);
        for i in 0..8 {
            series.push(t(i), i as f64);
        }
        let times: Vec<_> = series.samples().map(|(at, _)| *at).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
    }

    #[test]
    fn test_zero_capacity_is_coerced() {
        let mut series = SeriesBuffer::new(0);
        series.push(t(0), 1.0);
        assert_eq!(series.len(), 1);
    }
}
