//! Named value column bound to a time index

use crate::error::{FeatureError, Result};
use crate::values::TimeIndex;

/// A named column of optional values aligned 1:1 with a `TimeIndex`
///
/// `None` marks an unknown cell (a window without enough history, or a
/// value derived from one).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    index: TimeIndex,
    values: Vec<Option<f64>>,
}

impl Series {
    /// Create a series, rejecting a length that differs from the index
    pub fn new(name: impl Into<String>, index: TimeIndex, values: Vec<Option<f64>>) -> Result<Self> {
        let name = name.into();
        if values.len() != index.len() {
            return Err(FeatureError::TypeMismatch(format!(
                "series {name} has {} values for an index of {} rows",
                values.len(),
                index.len()
            )));
        }
        Ok(Self {
            name,
            index,
            values,
        })
    }

    /// Create a series where every value is known
    pub fn from_known(name: impl Into<String>, index: TimeIndex, values: Vec<f64>) -> Result<Self> {
        Self::new(name, index, values.into_iter().map(Some).collect())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    #[inline]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of known cells
    pub fn known_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Row of the first known cell
    pub fn first_known(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// All values, or a type mismatch naming the first unknown row
    pub fn require_known(&self) -> Result<Vec<f64>> {
        self.values
            .iter()
            .enumerate()
            .map(|(row, v)| {
                v.ok_or_else(|| {
                    FeatureError::TypeMismatch(format!(
                        "series {} must be fully known, row {row} is unknown",
                        self.name
                    ))
                })
            })
            .collect()
    }

    /// Move every value `lag` rows later; the first `lag` rows become unknown
    pub fn lagged(&self, lag: usize) -> Self {
        let len = self.values.len();
        let mut values = vec![None; len];
        if lag < len {
            values[lag..].copy_from_slice(&self.values[..len - lag]);
        }
        Self {
            name: self.name.clone(),
            index: self.index.clone(),
            values,
        }
    }
}
