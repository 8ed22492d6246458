use causal_core::FeatureError;
use thiserror::Error;

/// Errors surfaced by a market data source
///
/// "Nothing to return" and "could not reach the source" are distinct
/// kinds, so callers never mistake an outage for an empty history.
/// `Unavailable` and `Frame` are raised by acquisition adapters living
/// outside this workspace; `Frame` carries validation failures of the bars
/// such an adapter assembled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("No data available for {0}")]
    NoData(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed frame from source: {0}")]
    Frame(#[from] FeatureError),
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
