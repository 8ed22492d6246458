use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{FeatureError, Result};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Convert epoch milliseconds (the acquisition layer's wire unit) to a timestamp
pub fn timestamp_from_millis(millis: i64) -> Result<Timestamp> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| FeatureError::InvalidIndex(format!("timestamp out of range: {millis}ms")))
}

/// Convert a timestamp to epoch milliseconds
pub fn timestamp_to_millis(ts: &Timestamp) -> i64 {
    ts.timestamp_millis()
}

/// Row index shared by a frame and every block derived from it
///
/// Timestamps are strictly increasing and unique. Clones share the same
/// allocation, so handing the index to each feature block is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeIndex(Arc<[Timestamp]>);

impl TimeIndex {
    /// Build an index, rejecting duplicate or out-of-order timestamps
    pub fn new(timestamps: Vec<Timestamp>) -> Result<Self> {
        if let Some(pos) = timestamps.windows(2).position(|w| w[0] >= w[1]) {
            let (prev, next) = (timestamps[pos], timestamps[pos + 1]);
            let reason = if prev == next {
                "duplicate"
            } else {
                "out-of-order"
            };
            return Err(FeatureError::InvalidIndex(format!(
                "{reason} timestamp at row {}: {next} follows {prev}",
                pos + 1
            )));
        }
        Ok(Self(timestamps.into()))
    }

    /// Index from epoch milliseconds
    pub fn from_millis(millis: &[i64]) -> Result<Self> {
        let timestamps = millis
            .iter()
            .map(|&ms| timestamp_from_millis(ms))
            .collect::<Result<Vec<_>>>()?;
        Self::new(timestamps)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<Timestamp> {
        self.0.get(row).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Timestamp] {
        &self.0
    }

    /// True when both indexes describe the same rows in the same order
    #[inline]
    pub fn same_as(&self, other: &TimeIndex) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }

    /// Error unless `other` is aligned with this index
    pub fn ensure_aligned(&self, other: &TimeIndex, context: &str) -> Result<()> {
        if self.same_as(other) {
            return Ok(());
        }
        Err(FeatureError::IndexMismatch(format!(
            "{context}: {} rows vs {} rows{}",
            self.len(),
            other.len(),
            self.first_difference(other)
                .map(|row| format!(", first difference at row {row}"))
                .unwrap_or_default()
        )))
    }

    fn first_difference(&self, other: &TimeIndex) -> Option<usize> {
        self.0
            .iter()
            .zip(other.0.iter())
            .position(|(a, b)| a != b)
            .or_else(|| (self.len() != other.len()).then(|| self.len().min(other.len())))
    }
}
