use tracing::info;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::models::{FitReport, LogisticRegression};
use crate::preprocessing::ColumnTransformer;

/// Preprocessing followed by the classifier, fitted and applied as one unit
#[derive(Debug, Clone)]
pub struct Pipeline {
    preprocessor: ColumnTransformer,
    classifier: LogisticRegression,
    input_columns: Vec<String>,
}

impl Pipeline {
    pub fn new(preprocessor: ColumnTransformer, classifier: LogisticRegression, input_columns: Vec<String>) -> Self {
        Self {
            preprocessor,
            classifier,
            input_columns,
        }
    }

    /// Raw columns the pipeline reads, in the order it reads them
    pub fn input_columns(&self) -> &[String] {
        &self.input_columns
    }

    pub fn preprocessor(&self) -> &ColumnTransformer {
        &self.preprocessor
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    /// Names of the columns the classifier sees
    pub fn feature_names(&self) -> Vec<String> {
        self.preprocessor.feature_names()
    }

    /// Learn preprocessing statistics and classifier weights from training
    /// data. Columns outside `input_columns` are ignored.
    pub fn fit(&mut self, data: &Dataset, labels: &[u8]) -> Result<FitReport> {
        let features = data.select(&self.input_columns)?;
        if features.n_rows() != labels.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: features.n_rows(),
                got: labels.len(),
            });
        }

        let x = self.preprocessor.fit_transform(&features)?;
        self.classifier.fit(&x, labels)
    }

    pub fn predict(&self, data: &Dataset) -> Result<Vec<u8>> {
        let features = data.select(&self.input_columns)?;
        let x = self.preprocessor.transform(&features)?;
        self.classifier.predict(&x)
    }
}

/// Build the unfitted pipeline: median imputation for numeric columns,
/// most-frequent imputation + one-hot encoding for categorical columns,
/// logistic regression on the concatenated matrix
pub fn make_pipeline(config: &Config) -> Pipeline {
    let input_columns = config.feature_columns();
    info!("[PREP] Using features: {:?}", input_columns);
    info!(
        "[PREP] Impute {:?} (median); impute + one-hot encode {:?}",
        config.numeric_features, config.categorical_features
    );

    let preprocessor = ColumnTransformer::new(
        config.numeric_features.clone(),
        config.categorical_features.clone(),
    );
    let classifier = LogisticRegression::new(config.c, config.max_iter, config.tolerance);

    Pipeline::new(preprocessor, classifier, input_columns)
}
