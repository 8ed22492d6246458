//! One-step-ahead return label

use causal_core::stats::log_return;
use causal_core::{Result, Series};

/// Name of the training label column
pub const LABEL_COLUMN: &str = "future_ret";

/// Produces `future_ret[t] = ln(close[t+1] / close[t])` from unshifted closes
///
/// The label is genuinely future information. It is attached after the
/// causal shift and never passes through it; the last row is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelGenerator;

impl LabelGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, close: &Series) -> Result<Series> {
        let prices = close.values();
        let values = (0..prices.len())
            .map(|t| {
                let next = (*prices.get(t + 1)?)?;
                Some(log_return(prices[t]?, next))
            })
            .collect();
        Series::new(LABEL_COLUMN, close.index().clone(), values)
    }
}
