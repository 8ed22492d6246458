use causal_core::TimeSeriesFrame;

use crate::error::SourceResult;

/// Port for OHLCV acquisition
///
/// Implementations are constructed explicitly by the caller and passed in;
/// the feature core never holds a global client. A source must only ever
/// return closed, final bars.
pub trait MarketDataSource: Send + Sync {
    /// Fetch the full closed-bar history for a symbol
    fn fetch(&self, symbol: &str) -> SourceResult<TimeSeriesFrame>;

    /// Get the source's name/identifier for debugging
    fn name(&self) -> &str {
        "MarketDataSource"
    }
}
