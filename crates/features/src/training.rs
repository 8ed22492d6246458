//! Split a labelled feature matrix into trainer-ready rows

use causal_core::{FeatureError, FeatureMatrix, Result, Timestamp};

use crate::label::LABEL_COLUMN;

/// Feature rows and labels with every unknown-bearing row removed
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    feature_names: Vec<String>,
    timestamps: Vec<Timestamp>,
    rows: Vec<Vec<f64>>,
    labels: Vec<f64>,
}

impl TrainingSet {
    /// Separate `future_ret` from the features and drop incomplete rows
    pub fn from_matrix(matrix: &FeatureMatrix) -> Result<Self> {
        let label = matrix.column(LABEL_COLUMN)?;
        let features: Vec<_> = matrix
            .columns()
            .iter()
            .filter(|c| c.name() != LABEL_COLUMN)
            .collect();
        if features.is_empty() {
            return Err(FeatureError::TypeMismatch(
                "matrix has a label but no feature columns".to_string(),
            ));
        }

        let timestamps = matrix.index().as_slice();
        let mut set = Self {
            feature_names: features.iter().map(|c| c.name().to_string()).collect(),
            timestamps: Vec::new(),
            rows: Vec::new(),
            labels: Vec::new(),
        };
        for t in 0..matrix.len() {
            let Some(y) = label.get(t) else { continue };
            let Some(row) = features.iter().map(|c| c.get(t)).collect::<Option<Vec<f64>>>() else {
                continue;
            };
            set.timestamps.push(timestamps[t]);
            set.rows.push(row);
            set.labels.push(y);
        }

        log::debug!(
            "Training set keeps {} of {} rows ({} features)",
            set.len(),
            matrix.len(),
            set.feature_names.len()
        );
        Ok(set)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
