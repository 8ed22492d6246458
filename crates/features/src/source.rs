//! In-memory market data source

use std::collections::HashMap;

use causal_core::TimeSeriesFrame;
use causal_ports::{MarketDataSource, SourceError, SourceResult};

/// Serves pre-loaded frames by symbol
///
/// An unknown symbol and an empty frame are both reported as
/// `SourceError::NoData`, never as an empty success.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    frames: HashMap<String, TimeSeriesFrame>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the history for a symbol
    pub fn with_frame(mut self, symbol: impl Into<String>, frame: TimeSeriesFrame) -> Self {
        self.frames.insert(symbol.into(), frame);
        self
    }
}

impl MarketDataSource for InMemorySource {
    fn fetch(&self, symbol: &str) -> SourceResult<TimeSeriesFrame> {
        match self.frames.get(symbol) {
            Some(frame) if !frame.is_empty() => Ok(frame.clone()),
            _ => Err(SourceError::NoData(symbol.to_string())),
        }
    }

    fn name(&self) -> &str {
        "InMemorySource"
    }
}
