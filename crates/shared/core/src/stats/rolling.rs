//! Trailing-window aggregates over optional observations

use std::collections::VecDeque;

/// Fixed-length trailing window
///
/// Holds the last `window_size` observations. Aggregates are defined only
/// once the window is full and every observation in it is known. Storage
/// grows with the observations pushed, never with the configured size.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    /// Observations in arrival order
    values: VecDeque<Option<f64>>,
    /// Window size
    window_size: usize,
    /// Unknown observations currently held
    unknown: usize,
}

impl RollingWindow {
    /// Create a window; a size of zero is treated as one
    pub fn new(window_size: usize) -> Self {
        Self {
            values: VecDeque::new(),
            window_size: window_size.max(1),
            unknown: 0,
        }
    }

    /// Add an observation, evicting the oldest once full
    #[inline]
    pub fn push(&mut self, value: Option<f64>) {
        if self.values.len() >= self.window_size
            && let Some(None) = self.values.pop_front()
        {
            self.unknown -= 1;
        }
        if value.is_none() {
            self.unknown += 1;
        }
        self.values.push_back(value);
    }

    /// Whether the window is full of known observations
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.values.len() == self.window_size && self.unknown == 0
    }

    fn known(&self) -> Option<impl Iterator<Item = f64> + '_> {
        self.is_ready().then(|| self.values.iter().flatten().copied())
    }

    /// Sum of the window, oldest to newest
    pub fn sum(&self) -> Option<f64> {
        self.known().map(|it| it.sum())
    }

    /// Arithmetic mean of the window
    pub fn mean(&self) -> Option<f64> {
        self.sum().map(|s| s / self.window_size as f64)
    }

    /// Sum of squared observations (each value squared before summing)
    pub fn sum_of_squares(&self) -> Option<f64> {
        self.known().map(|it| it.map(|x| x * x).sum())
    }
}
