use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{PipelineError, Result};

/// One-hot encoder. Each input column expands into one indicator per
/// category observed at fit time; the categories of a column are sorted.
/// A value never seen during fit encodes to all zeros.
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    categories: Option<Vec<Vec<String>>>,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned vocabulary, one sorted list per input column
    pub fn categories(&self) -> Option<&[Vec<String>]> {
        self.categories.as_deref()
    }

    pub fn fit(&mut self, columns: &[Vec<String>]) -> Result<()> {
        let categories = columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .collect();
        self.categories = Some(categories);
        Ok(())
    }

    /// Number of indicator columns produced
    pub fn n_output_features(&self) -> usize {
        self.categories
            .as_ref()
            .map(|cats| cats.iter().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Indicator columns, grouped by input column in fit order
    pub fn transform(&self, columns: &[Vec<String>]) -> Result<Vec<Vec<f64>>> {
        let categories = self.categories.as_ref().ok_or(PipelineError::NotFitted)?;
        if columns.len() != categories.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: categories.len(),
                got: columns.len(),
            });
        }

        let mut out = Vec::with_capacity(self.n_output_features());
        for (column, vocab) in columns.iter().zip(categories.iter()) {
            let mut block = vec![vec![0.0; column.len()]; vocab.len()];
            let mut unknown = 0usize;

            for (row, value) in column.iter().enumerate() {
                match vocab.binary_search(value) {
                    Ok(k) => block[k][row] = 1.0,
                    Err(_) => unknown += 1,
                }
            }

            if unknown > 0 {
                debug!("[PREP] {} value(s) outside the fitted categories encoded as zeros", unknown);
            }
            out.extend(block);
        }

        Ok(out)
    }

    /// Output names in `<column>_<category>` form
    pub fn feature_names(&self, input_names: &[String]) -> Vec<String> {
        let Some(categories) = &self.categories else {
            return Vec::new();
        };

        input_names
            .iter()
            .zip(categories.iter())
            .flat_map(|(name, vocab)| vocab.iter().map(move |cat| format!("{}_{}", name, cat)))
            .collect()
    }
}
