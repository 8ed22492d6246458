//! The single causal lag applied to an assembled feature matrix

use causal_core::{FeatureMatrix, Result};

/// Rows every feature is delayed by before delivery
pub const CAUSAL_LAG: usize = 1;

/// Shifts every column of a matrix down by exactly one row
///
/// Pre-shift features at row `t` may use bars up to and including `t`; after
/// the shift, row `t` only holds values computed from bars before `t`. This
/// is the one place causality is enforced, so new feature blocks inherit the
/// lag by being concatenated before it runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CausalShifter;

impl CausalShifter {
    pub fn new() -> Self {
        Self
    }

    /// Shifted copy: `out[c][t] = in[c][t-1]`, row 0 entirely unknown
    pub fn apply(&self, features: &FeatureMatrix) -> Result<FeatureMatrix> {
        let columns = features
            .columns()
            .iter()
            .map(|c| c.lagged(CAUSAL_LAG))
            .collect();
        FeatureMatrix::from_columns(features.index().clone(), columns)
    }
}
