//! Rolling realized volatility

use causal_core::stats::RollingWindow;
use causal_core::{FeatureError, FeatureMatrix, Result, Series};

/// Computes `rv_w[t] = sqrt(sum of ret_1[k]^2 for k in t-w+1..=t)`
///
/// Unknown until the trailing window holds `w` known one-period returns.
#[derive(Debug, Clone)]
pub struct VolatilityComputer {
    windows: Vec<usize>,
}

impl VolatilityComputer {
    /// Create a computer; every window must be positive
    pub fn new(windows: &[usize]) -> Result<Self> {
        let windows = windows
            .iter()
            .map(|&w| FeatureError::check_window("volatility window", w))
            .collect::<Result<_>>()?;
        Ok(Self { windows })
    }

    pub fn column_name(window: usize) -> String {
        format!("rv_{window}")
    }

    /// One `rv_w` column per window, from the one-period return series
    pub fn compute(&self, ret_1: &Series) -> Result<FeatureMatrix> {
        let columns = self
            .windows
            .iter()
            .map(|&w| {
                let mut window = RollingWindow::new(w);
                let values = ret_1
                    .values()
                    .iter()
                    .map(|&r| {
                        window.push(r);
                        window.sum_of_squares().map(f64::sqrt)
                    })
                    .collect();
                Series::new(Self::column_name(w), ret_1.index().clone(), values)
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Computed {} realized volatility columns", columns.len());
        FeatureMatrix::from_columns(ret_1.index().clone(), columns)
    }
}
