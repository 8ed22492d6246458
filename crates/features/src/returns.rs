//! Log returns over configurable lookback periods

use causal_core::stats::log_return;
use causal_core::{FeatureError, FeatureMatrix, Result, Series};

/// Computes `ret_n[t] = ln(close[t] / close[t-n])` for each period `n`
///
/// Rows `t < n` have no reference price and are unknown.
#[derive(Debug, Clone)]
pub struct ReturnComputer {
    periods: Vec<usize>,
}

impl ReturnComputer {
    /// Create a computer; every period must be positive
    pub fn new(periods: &[usize]) -> Result<Self> {
        let periods = periods
            .iter()
            .map(|&p| FeatureError::check_window("return period", p))
            .collect::<Result<_>>()?;
        Ok(Self { periods })
    }

    pub fn column_name(period: usize) -> String {
        format!("ret_{period}")
    }

    pub fn periods(&self) -> &[usize] {
        &self.periods
    }

    /// One `ret_n` column per period, in configured order
    pub fn compute(&self, close: &Series) -> Result<FeatureMatrix> {
        let columns = self
            .periods
            .iter()
            .map(|&n| Self::returns(close, n))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Computed {} return columns over {} rows", columns.len(), close.len());
        FeatureMatrix::from_columns(close.index().clone(), columns)
    }

    fn returns(close: &Series, period: usize) -> Result<Series> {
        let prices = close.values();
        let values = (0..prices.len())
            .map(|t| {
                let from = prices[t.checked_sub(period)?]?;
                let to = prices[t]?;
                Some(log_return(from, to))
            })
            .collect();
        Series::new(Self::column_name(period), close.index().clone(), values)
    }
}
