//! Price-to-EMA deviation ratios

use causal_core::{FeatureError, FeatureMatrix, Result, Series};

use crate::ema::EmaComputer;

/// Computes `close_ema_w_ratio[t] = close[t] / ema_w[t] - 1` from an EMA block
#[derive(Debug, Clone)]
pub struct PriceRatioComputer {
    spans: Vec<usize>,
}

impl PriceRatioComputer {
    /// Create a computer for the spans to expose; every span must be positive
    pub fn new(spans: &[usize]) -> Result<Self> {
        let spans = spans
            .iter()
            .map(|&w| FeatureError::check_window("EMA span", w))
            .collect::<Result<_>>()?;
        Ok(Self { spans })
    }

    pub fn column_name(span: usize) -> String {
        format!("close_ema_{span}_ratio")
    }

    /// One ratio column per span
    ///
    /// The EMA block must share the close series' index (`IndexMismatch`)
    /// and carry an `ema_w` column for every span (`MissingColumn` listing
    /// each absent one).
    pub fn compute(&self, close: &Series, emas: &FeatureMatrix) -> Result<FeatureMatrix> {
        close
            .index()
            .ensure_aligned(emas.index(), "close series vs EMA block")?;

        let missing: Vec<String> = self
            .spans
            .iter()
            .map(|&w| EmaComputer::column_name(w))
            .filter(|name| emas.get(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(FeatureError::MissingColumn(missing));
        }

        let columns = self
            .spans
            .iter()
            .map(|&w| {
                let ema = emas.column(&EmaComputer::column_name(w))?;
                let values = close
                    .values()
                    .iter()
                    .zip(ema.values())
                    .map(|(c, e)| Some((*c)? / (*e)? - 1.0))
                    .collect();
                Series::new(Self::column_name(w), close.index().clone(), values)
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Computed {} price/EMA ratio columns", columns.len());
        FeatureMatrix::from_columns(close.index().clone(), columns)
    }
}
