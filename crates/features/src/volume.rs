//! Volume features: clamped log volume and average volume

use causal_core::stats::RollingWindow;
use causal_core::{FeatureError, FeatureMatrix, Result, Series};

pub const LOG_VOLUME: &str = "log_volume";

/// Computes `log_volume` and `adv_<window>` from raw volume
///
/// `log_volume[t] = ln(max(volume[t], 1))`: the clamp comes before the
/// logarithm so zero volume yields 0 rather than `-inf`.
/// `adv_w[t]` is the mean of the trailing `w` volumes, unknown for `t < w-1`.
#[derive(Debug, Clone)]
pub struct VolumeComputer {
    adv_window: usize,
}

impl VolumeComputer {
    /// Create a computer; the ADV window must be positive
    pub fn new(adv_window: usize) -> Result<Self> {
        Ok(Self {
            adv_window: FeatureError::check_window("ADV window", adv_window)?,
        })
    }

    pub fn adv_column_name(window: usize) -> String {
        format!("adv_{window}")
    }

    pub fn adv_window(&self) -> usize {
        self.adv_window
    }

    /// `log_volume` then `adv_w`; the input must be fully known
    pub fn compute(&self, volume: &Series) -> Result<FeatureMatrix> {
        let raw = volume.require_known()?;
        let index = volume.index().clone();

        let log_volume = raw.iter().map(|&v| Some(v.max(1.0).ln())).collect();

        let mut window = RollingWindow::new(self.adv_window);
        let adv = raw
            .iter()
            .map(|&v| {
                window.push(Some(v));
                window.mean()
            })
            .collect();

        log::debug!("Computed volume features over {} rows", raw.len());
        FeatureMatrix::from_columns(
            index.clone(),
            vec![
                Series::new(LOG_VOLUME, index.clone(), log_volume)?,
                Series::new(Self::adv_column_name(self.adv_window), index, adv)?,
            ],
        )
    }
}
