//! Causal Ports
//!
//! Port definitions (traits) for the causal feature pipeline.
//! These define the boundary between the feature core and the
//! acquisition layer that supplies bars.

mod error;
mod market_data;

pub use error::{SourceError, SourceResult};
pub use market_data::MarketDataSource;
