//! Orchestrates the feature computers into one causal matrix

use causal_core::{CLOSE, FeatureMatrix, REQUIRED_COLUMNS, Result, Series, TimeSeriesFrame, VOLUME};
use causal_ports::MarketDataSource;

use crate::config::FeatureConfig;
use crate::ema::EmaComputer;
use crate::error::PipelineResult;
use crate::label::LabelGenerator;
use crate::ratio::PriceRatioComputer;
use crate::returns::ReturnComputer;
use crate::shift::CausalShifter;
use crate::volatility::VolatilityComputer;
use crate::volume::VolumeComputer;

/// Blocks computed straight from raw columns
struct BaseBlocks {
    returns: FeatureMatrix,
    emas: FeatureMatrix,
    volume: FeatureMatrix,
}

/// Builds the leakage-free feature matrix (and optional label) for a frame
///
/// ```text
/// close ──┬─► ReturnComputer ──► ret_1 ──► VolatilityComputer ─┐
///         ├─► EmaComputer ─────┬─────────► PriceRatioComputer ─┤
///         │                    └───────────────────────────────┤
/// volume ─┴─► VolumeComputer ──────────────────────────────────┤
///                                                              ▼
///                                concat (fixed order) ─► CausalShifter
///                                                              │
/// close (raw) ─► LabelGenerator ──────────── attach, unshifted ┘
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureSetAssembler {
    config: FeatureConfig,
}

impl FeatureSetAssembler {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Build the shifted feature matrix, with `future_ret` attached when
    /// `include_labels` is set
    pub fn build(&self, frame: &TimeSeriesFrame, include_labels: bool) -> Result<FeatureMatrix> {
        frame.require_columns(&REQUIRED_COLUMNS)?;

        let violations = frame.ohlc_violations()?;
        if !violations.is_empty() {
            log::warn!(
                "{} of {} bars have inconsistent OHLC values (first at row {})",
                violations.len(),
                frame.len(),
                violations[0]
            );
        }

        let close = frame.column(CLOSE)?;
        let volume = frame.column(VOLUME)?;

        let BaseBlocks {
            returns,
            emas,
            volume,
        } = self.base_blocks(&close, &volume)?;

        let ratios = PriceRatioComputer::new(self.config.ema_spans())?.compute(&close, &emas)?;
        let ret_1 = self.one_period_returns(&close, &returns)?;
        let volatility = VolatilityComputer::new(self.config.volatility_windows())?.compute(&ret_1)?;

        let features = FeatureMatrix::concat(
            frame.index(),
            [returns, emas, ratios, volatility, volume],
        )?;
        let mut output = CausalShifter::new().apply(&features)?;

        if include_labels {
            output.push(LabelGenerator::new().generate(&close)?)?;
        }

        log::info!(
            "Assembled {} feature columns over {} rows (labels: {})",
            features.width(),
            output.len(),
            include_labels
        );
        Ok(output)
    }

    /// Fetch a symbol from `source` and build its feature matrix
    pub fn build_from_source(
        &self,
        source: &dyn MarketDataSource,
        symbol: &str,
        include_labels: bool,
    ) -> PipelineResult<FeatureMatrix> {
        let frame = source.fetch(symbol)?;
        log::debug!("Fetched {} bars for {} from {}", frame.len(), symbol, source.name());
        Ok(self.build(&frame, include_labels)?)
    }

    /// Returns, EMAs and volume features have no dependency on each other
    fn base_blocks(&self, close: &Series, volume: &Series) -> Result<BaseBlocks> {
        let config = &self.config;
        let returns = || ReturnComputer::new(config.return_periods())?.compute(close);
        let emas = || EmaComputer::new(config.ema_spans())?.compute(close);
        let volumes = || VolumeComputer::new(config.adv_window())?.compute(volume);

        let (returns, emas, volume) = if config.parallel() {
            let ((returns, emas), volume) = rayon::join(|| rayon::join(returns, emas), volumes);
            (returns?, emas?, volume?)
        } else {
            (returns()?, emas()?, volumes()?)
        };
        Ok(BaseBlocks {
            returns,
            emas,
            volume,
        })
    }

    /// `ret_1` from the returns block, or computed privately when period 1
    /// is not configured as a feature
    fn one_period_returns(&self, close: &Series, returns: &FeatureMatrix) -> Result<Series> {
        if let Some(ret_1) = returns.get(&ReturnComputer::column_name(1)) {
            return Ok(ret_1.clone());
        }
        let block = ReturnComputer::new(&[1])?.compute(close)?;
        block.column(&ReturnComputer::column_name(1)).cloned()
    }
}
