//! Exponential Moving Average without bias adjustment

/// EMA calculator: `alpha = 2 / (span + 1)`
///
/// The first observation seeds the average; each later one updates
/// `ema = alpha * value + (1 - alpha) * ema`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ema {
    /// Current EMA value
    value: f64,
    /// Smoothing factor
    alpha: f64,
    /// Whether the EMA has been seeded with at least one value
    initialized: bool,
}

impl Ema {
    /// Create EMA from a span (standard formula: alpha = 2 / (span + 1))
    pub fn from_span(span: usize) -> Self {
        Self::with_alpha(2.0 / (span as f64 + 1.0))
    }

    /// Create EMA with an explicit smoothing factor
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            value: 0.0,
            alpha,
            initialized: false,
        }
    }

    /// Update EMA with a new value and return the updated average
    #[inline]
    pub fn update(&mut self, value: f64) -> f64 {
        if !self.initialized {
            self.value = value;
            self.initialized = true;
        } else {
            self.value = self.alpha * value + (1.0 - self.alpha) * self.value;
        }
        self.value
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}
