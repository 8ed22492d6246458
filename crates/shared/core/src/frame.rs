//! Raw OHLCV input: bars and the columnar frame built from them

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::series::Series;
use crate::values::{TimeIndex, Timestamp, timestamp_from_millis};
use crate::{CLOSE, HIGH, LOW, OPEN, VOLUME};

/// One closed OHLCV observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Create a bar; prices must be positive and volume non-negative
    pub fn new(
        timestamp: Timestamp,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self> {
        let bar = Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        };
        for (column, value) in bar.fields() {
            check_value(column, 0, value)?;
        }
        Ok(bar)
    }

    /// Create a bar from an epoch-millisecond row (`[ts, o, h, l, c, v]`)
    pub fn from_millis(millis: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Result<Self> {
        Self::new(timestamp_from_millis(millis)?, open, high, low, close, volume)
    }

    /// Whether high/low bracket open and close
    pub fn is_consistent(&self) -> bool {
        ohlc_consistent(self.open, self.high, self.low, self.close)
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            (OPEN, self.open),
            (HIGH, self.high),
            (LOW, self.low),
            (CLOSE, self.close),
            (VOLUME, self.volume),
        ]
    }
}

fn ohlc_consistent(open: f64, high: f64, low: f64, close: f64) -> bool {
    high >= low && high >= open && high >= close && low <= open && low <= close
}

/// Validate a raw cell according to the column it belongs to
fn check_value(column: &str, row: usize, value: f64) -> Result<()> {
    let valid = match column {
        OPEN | HIGH | LOW | CLOSE => value.is_finite() && value > 0.0,
        VOLUME => value.is_finite() && value >= 0.0,
        _ => value.is_finite(),
    };
    if valid {
        Ok(())
    } else {
        Err(FeatureError::InvalidValue {
            column: column.to_string(),
            row,
            value,
        })
    }
}

/// Ordered, immutable table of raw columns keyed by a strictly increasing index
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesFrame {
    index: TimeIndex,
    columns: BTreeMap<String, Vec<f64>>,
}

impl TimeSeriesFrame {
    /// Build a full OHLCV frame from bars in time order
    pub fn from_bars(bars: &[Bar]) -> Result<Self> {
        let index = TimeIndex::new(bars.iter().map(|b| b.timestamp).collect())?;
        let mut columns: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (row, bar) in bars.iter().enumerate() {
            for (column, value) in bar.fields() {
                check_value(column, row, value)?;
                columns
                    .entry(column.to_string())
                    .or_insert_with(|| Vec::with_capacity(bars.len()))
                    .push(value);
            }
        }
        if bars.is_empty() {
            for column in crate::REQUIRED_COLUMNS {
                columns.insert(column.to_string(), Vec::new());
            }
        }
        Ok(Self { index, columns })
    }

    /// Build a frame from named columns; any subset of OHLCV (plus extras) is allowed
    pub fn from_columns<I, S>(timestamps: Vec<Timestamp>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let index = TimeIndex::new(timestamps)?;
        let mut map = BTreeMap::new();
        for (name, values) in columns {
            let name = name.into();
            if values.len() != index.len() {
                return Err(FeatureError::TypeMismatch(format!(
                    "column {name} has {} values for an index of {} rows",
                    values.len(),
                    index.len()
                )));
            }
            for (row, &value) in values.iter().enumerate() {
                check_value(&name, row, value)?;
            }
            if map.insert(name.clone(), values).is_some() {
                return Err(FeatureError::DuplicateColumn(name));
            }
        }
        Ok(Self {
            index,
            columns: map,
        })
    }

    #[inline]
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Raw values of a column
    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| FeatureError::missing(name))
    }

    /// A column as a fully known series sharing this frame's index
    pub fn column(&self, name: &str) -> Result<Series> {
        let values = self.values(name)?;
        Series::from_known(name, self.index.clone(), values.to_vec())
    }

    /// Error naming every one of `names` that this frame lacks
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.columns.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FeatureError::MissingColumn(missing))
        }
    }

    /// A new frame without the named column
    pub fn without_column(&self, name: &str) -> Self {
        let mut columns = self.columns.clone();
        columns.remove(name);
        Self {
            index: self.index.clone(),
            columns,
        }
    }

    /// Bar at a row, when all five OHLCV columns are present
    pub fn bar(&self, row: usize) -> Result<Option<Bar>> {
        self.require_columns(&crate::REQUIRED_COLUMNS)?;
        let Some(timestamp) = self.index.get(row) else {
            return Ok(None);
        };
        let cell = |name: &str| self.columns[name][row];
        Ok(Some(Bar {
            timestamp,
            open: cell(OPEN),
            high: cell(HIGH),
            low: cell(LOW),
            close: cell(CLOSE),
            volume: cell(VOLUME),
        }))
    }

    /// Rows whose OHLC relationship is inconsistent (high below low, etc.)
    pub fn ohlc_violations(&self) -> Result<Vec<usize>> {
        self.require_columns(&[OPEN, HIGH, LOW, CLOSE])?;
        let (open, high, low, close) = (
            &self.columns[OPEN],
            &self.columns[HIGH],
            &self.columns[LOW],
            &self.columns[CLOSE],
        );
        Ok((0..self.len())
            .filter(|&i| !ohlc_consistent(open[i], high[i], low[i], close[i]))
            .collect())
    }
}
