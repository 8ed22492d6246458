use causal_core::FeatureError;
use causal_ports::SourceError;
use thiserror::Error;

/// Errors from the source-driven entry point
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
