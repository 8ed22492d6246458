//! Causal Core Domain
//!
//! Pure domain types for the causal feature pipeline.
//! This crate contains no threads, no I/O, and is 100% unit testable.
//!
//! ## Data model
//!
//! ```text
//! TimeSeriesFrame (raw OHLCV columns, all values known)
//!     │
//!     └── Series ──► FeatureMatrix (ordered blocks, Option<f64> cells)
//!                        │
//!                        └── every block shares one TimeIndex
//! ```

mod error;
mod frame;
mod matrix;
mod series;
pub mod stats;
pub mod values;

pub use error::{FeatureError, Result};
pub use frame::{Bar, TimeSeriesFrame};
pub use matrix::FeatureMatrix;
pub use series::Series;
pub use values::{TimeIndex, Timestamp};

/// Raw column names carried by a full OHLCV frame
pub const OPEN: &str = "open";
pub const HIGH: &str = "high";
pub const LOW: &str = "low";
pub const CLOSE: &str = "close";
pub const VOLUME: &str = "volume";

/// Columns every frame handed to the assembler must carry
pub const REQUIRED_COLUMNS: [&str; 5] = [OPEN, HIGH, LOW, CLOSE, VOLUME];
