//! Exponential moving averages over configurable spans

use causal_core::stats::Ema;
use causal_core::{FeatureError, FeatureMatrix, Result, Series};

/// Computes `ema_w` for each span with `alpha = 2/(w+1)` and no adjustment
///
/// Seeded with `close[0]`, so every row is defined; there is no warm-up
/// region here, unlike the return and rolling-window blocks.
#[derive(Debug, Clone)]
pub struct EmaComputer {
    spans: Vec<usize>,
}

impl EmaComputer {
    /// Create a computer; every span must be positive
    pub fn new(spans: &[usize]) -> Result<Self> {
        let spans = spans
            .iter()
            .map(|&w| FeatureError::check_window("EMA span", w))
            .collect::<Result<_>>()?;
        Ok(Self { spans })
    }

    pub fn column_name(span: usize) -> String {
        format!("ema_{span}")
    }

    pub fn spans(&self) -> &[usize] {
        &self.spans
    }

    /// One `ema_w` column per span; the input must be fully known
    pub fn compute(&self, close: &Series) -> Result<FeatureMatrix> {
        let prices = close.require_known()?;
        let columns = self
            .spans
            .iter()
            .map(|&span| {
                let mut ema = Ema::from_span(span);
                let values = prices.iter().map(|&p| Some(ema.update(p))).collect();
                Series::new(Self::column_name(span), close.index().clone(), values)
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Computed {} EMA columns over {} rows", columns.len(), close.len());
        FeatureMatrix::from_columns(close.index().clone(), columns)
    }
}
