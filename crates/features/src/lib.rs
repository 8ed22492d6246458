//! Causal Features
//!
//! Turns a time-ordered OHLCV frame into a leakage-free feature matrix,
//! plus an optional one-step-ahead training label.
//!
//! - **Computers**: returns, EMAs, price/EMA ratios, realized volatility,
//!   volume statistics. Each produces a block aligned to the frame's index.
//! - **CausalShifter**: one uniform lag over the concatenated blocks; the
//!   only place look-ahead is prevented.
//! - **LabelGenerator**: `future_ret`, attached after the shift, never lagged.
//! - **FeatureSetAssembler**: runs the above with a validated `FeatureConfig`.
//!
//! ## Usage
//!
//! ```ignore
//! use causal_features::{FeatureSetAssembler, load_default_config};
//!
//! let assembler = FeatureSetAssembler::new(load_default_config()?);
//! let training = assembler.build(&frame, true)?;   // features + future_ret
//! let serving = assembler.build(&frame, false)?;   // features only
//! ```

pub mod assembler;
pub mod config;
pub mod ema;
pub mod error;
pub mod label;
pub mod ratio;
pub mod returns;
pub mod shift;
pub mod source;
pub mod training;
pub mod volatility;
pub mod volume;

pub use assembler::FeatureSetAssembler;
pub use config::{ConfigError, FeatureConfig, load_config, load_config_from_str, load_default_config};
pub use ema::EmaComputer;
pub use error::{PipelineError, PipelineResult};
pub use label::{LABEL_COLUMN, LabelGenerator};
pub use ratio::PriceRatioComputer;
pub use returns::ReturnComputer;
pub use shift::{CAUSAL_LAG, CausalShifter};
pub use source::InMemorySource;
pub use training::TrainingSet;
pub use volatility::VolatilityComputer;
pub use volume::{LOG_VOLUME, VolumeComputer};

// Re-export the domain types callers need alongside the assembler
pub use causal_core::{Bar, FeatureError, FeatureMatrix, Series, TimeIndex, TimeSeriesFrame};
