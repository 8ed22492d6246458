//! Feature configuration and its JSON loader

use std::path::Path;

use causal_core::{FeatureError, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_RETURN_PERIODS: [usize; 4] = [1, 3, 6, 12];
pub const DEFAULT_EMA_SPANS: [usize; 3] = [12, 24, 48];
pub const DEFAULT_VOLATILITY_WINDOWS: [usize; 2] = [24, 72];
pub const DEFAULT_ADV_WINDOW: usize = 30;

/// Every window, period and span used by one assembly run
///
/// Validated once at construction: each entry is a positive integer and
/// duplicates collapse to their first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureConfig", into = "RawFeatureConfig")]
pub struct FeatureConfig {
    return_periods: Vec<usize>,
    ema_spans: Vec<usize>,
    volatility_windows: Vec<usize>,
    adv_window: usize,
    parallel: bool,
}

/// Unvalidated wire form; signed so that negative entries reach validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawFeatureConfig {
    return_periods: Vec<i64>,
    ema_spans: Vec<i64>,
    volatility_windows: Vec<i64>,
    adv_window: i64,
    parallel: bool,
}

impl Default for RawFeatureConfig {
    fn default() -> Self {
        FeatureConfig::default().into()
    }
}

impl TryFrom<RawFeatureConfig> for FeatureConfig {
    type Error = FeatureError;

    fn try_from(raw: RawFeatureConfig) -> Result<Self> {
        Ok(FeatureConfig::new(
            &raw.return_periods,
            &raw.ema_spans,
            &raw.volatility_windows,
            raw.adv_window,
        )?
        .with_parallel(raw.parallel))
    }
}

impl From<FeatureConfig> for RawFeatureConfig {
    fn from(config: FeatureConfig) -> Self {
        let signed = |v: &[usize]| v.iter().map(|&x| x as i64).collect();
        Self {
            return_periods: signed(&config.return_periods),
            ema_spans: signed(&config.ema_spans),
            volatility_windows: signed(&config.volatility_windows),
            adv_window: config.adv_window as i64,
            parallel: config.parallel,
        }
    }
}

fn positive(name: &str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(FeatureError::InvalidWindow {
            name: name.to_string(),
            value,
        });
    }
    Ok(value as usize)
}

fn positive_set(name: &str, values: &[i64]) -> Result<Vec<usize>> {
    let mut out: Vec<usize> = Vec::with_capacity(values.len());
    for &value in values {
        let value = positive(name, value)?;
        if out.contains(&value) {
            log::debug!("Ignoring duplicate {name} {value}");
            continue;
        }
        out.push(value);
    }
    Ok(out)
}

impl FeatureConfig {
    /// Validate and build a configuration
    pub fn new(
        return_periods: &[i64],
        ema_spans: &[i64],
        volatility_windows: &[i64],
        adv_window: i64,
    ) -> Result<Self> {
        Ok(Self {
            return_periods: positive_set("return period", return_periods)?,
            ema_spans: positive_set("EMA span", ema_spans)?,
            volatility_windows: positive_set("volatility window", volatility_windows)?,
            adv_window: positive("ADV window", adv_window)?,
            parallel: true,
        })
    }

    /// Toggle concurrent computation of the independent blocks
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn return_periods(&self) -> &[usize] {
        &self.return_periods
    }

    pub fn ema_spans(&self) -> &[usize] {
        &self.ema_spans
    }

    pub fn volatility_windows(&self) -> &[usize] {
        &self.volatility_windows
    }

    pub fn adv_window(&self) -> usize {
        self.adv_window
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            return_periods: DEFAULT_RETURN_PERIODS.to_vec(),
            ema_spans: DEFAULT_EMA_SPANS.to_vec(),
            volatility_windows: DEFAULT_VOLATILITY_WINDOWS.to_vec(),
            adv_window: DEFAULT_ADV_WINDOW,
            parallel: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load feature configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> std::result::Result<FeatureConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> std::result::Result<FeatureConfig, ConfigError> {
    let config: FeatureConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> std::result::Result<FeatureConfig, ConfigError> {
    let default_config = include_str!("feature_config.json");
    load_config_from_str(default_config)
}
