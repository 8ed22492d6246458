//! Feature matrix: ordered feature columns sharing one index

use crate::error::{FeatureError, Result};
use crate::series::Series;
use crate::values::TimeIndex;

/// Ordered set of feature columns aligned to a single `TimeIndex`
///
/// Column order is the order in which blocks were pushed, which keeps
/// output independent of how the blocks were scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    index: TimeIndex,
    columns: Vec<Series>,
}

impl FeatureMatrix {
    /// Empty matrix over an index
    pub fn new(index: TimeIndex) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Matrix from columns that must all share `index`
    pub fn from_columns(index: TimeIndex, columns: Vec<Series>) -> Result<Self> {
        let mut matrix = Self::new(index);
        for column in columns {
            matrix.push(column)?;
        }
        Ok(matrix)
    }

    /// Concatenate blocks column-wise, in the order given
    pub fn concat<I>(index: &TimeIndex, blocks: I) -> Result<Self>
    where
        I: IntoIterator<Item = FeatureMatrix>,
    {
        let mut matrix = Self::new(index.clone());
        for block in blocks {
            index.ensure_aligned(&block.index, "concatenating feature blocks")?;
            for column in block.columns {
                matrix.push(column)?;
            }
        }
        Ok(matrix)
    }

    /// Append a column; its index must match and its name must be new
    pub fn push(&mut self, column: Series) -> Result<()> {
        self.index
            .ensure_aligned(column.index(), &format!("column {}", column.name()))?;
        if self.get(column.name()).is_some() {
            return Err(FeatureError::DuplicateColumn(column.name().to_string()));
        }
        self.columns.push(column);
        Ok(())
    }

    #[inline]
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Series::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Column by name, or `MissingColumn`
    pub fn column(&self, name: &str) -> Result<&Series> {
        self.get(name).ok_or_else(|| FeatureError::missing(name))
    }

    /// Single cell; `None` when unknown or out of range
    pub fn value(&self, name: &str, row: usize) -> Option<f64> {
        self.get(name).and_then(|c| c.get(row))
    }

    /// One row across all columns, in column order
    pub fn row(&self, row: usize) -> Vec<Option<f64>> {
        self.columns.iter().map(|c| c.get(row)).collect()
    }
}
