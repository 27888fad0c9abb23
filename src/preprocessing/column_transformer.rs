use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};

use super::encoder::OneHotEncoder;
use super::imputer::{MedianImputer, MostFrequentImputer};
use super::FeatureMatrix;

/// Routes numeric columns through median imputation and categorical columns
/// through most-frequent imputation + one-hot encoding, then concatenates
/// the results: numeric block first, indicator blocks after.
#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    numeric: MedianImputer,
    categorical: MostFrequentImputer,
    encoder: OneHotEncoder,
    n_features: Option<usize>,
}

impl ColumnTransformer {
    pub fn new(numeric_columns: Vec<String>, categorical_columns: Vec<String>) -> Self {
        Self {
            numeric: MedianImputer::new(numeric_columns),
            categorical: MostFrequentImputer::new(categorical_columns),
            encoder: OneHotEncoder::new(),
            n_features: None,
        }
    }

    pub fn numeric_imputer(&self) -> &MedianImputer {
        &self.numeric
    }

    pub fn categorical_imputer(&self) -> &MostFrequentImputer {
        &self.categorical
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    /// Learn imputation statistics and the category vocabulary, then
    /// transform the same data
    pub fn fit_transform(&mut self, data: &Dataset) -> Result<FeatureMatrix> {
        if data.n_rows() == 0 {
            return Err(PipelineError::EmptyDataset);
        }

        self.numeric.fit(data)?;
        self.categorical.fit(data)?;
        let imputed = self.categorical.transform(data)?;
        self.encoder.fit(&imputed)?;
        self.n_features = Some(self.numeric.columns().len() + self.encoder.n_output_features());

        self.transform(data)
    }

    pub fn transform(&self, data: &Dataset) -> Result<FeatureMatrix> {
        let n_features = self.n_features.ok_or(PipelineError::NotFitted)?;

        let mut columns = self.numeric.transform(data)?;
        let imputed = self.categorical.transform(data)?;
        columns.extend(self.encoder.transform(&imputed)?);

        if columns.len() != n_features {
            return Err(PipelineError::DimensionMismatch {
                expected: n_features,
                got: columns.len(),
            });
        }

        Ok(FeatureMatrix::from_columns(&columns, data.n_rows()))
    }

    /// Names of the output columns, in matrix order
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = self.numeric.columns().to_vec();
        names.extend(self.encoder.feature_names(self.categorical.columns()));
        names
    }
}
