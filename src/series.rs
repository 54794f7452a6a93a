//! Bounded per-channel history used to drive the charts.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::sensors::Sample;

/// Number of points kept per channel unless configured otherwise
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Fixed-capacity FIFO of the most recent samples, oldest first
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SeriesBuffer {
    /// Create an empty buffer. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one once the window is full
    pub fn append(&mut self, timestamp: DateTime<Local>, value: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample::new(timestamp, value));
    }

    /// Owned copy of the current window, oldest first
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
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

    /// Most recent sample, if any
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Clear history
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Min, max and average over the window
    pub fn stats(&self) -> Option<WindowStats> {
        if self.samples.is_empty() {
            return None;
        }

        let values = self.samples.iter().map(|s| s.value);
        let min = values.clone().fold(f64::INFINITY, f64::min);
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.sum::<f64>() / self.samples.len() as f64;

        Some(WindowStats { min, max, avg })
    }
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

/// Statistics for the visible window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}
