use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};

/// Fills missing numeric cells with the per-column median learned at fit time
#[derive(Debug, Clone)]
pub struct MedianImputer {
    columns: Vec<String>,
    statistics: Option<Vec<f64>>,
}

impl MedianImputer {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            statistics: None,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Learned medians, one per column, once fitted
    pub fn statistics(&self) -> Option<&[f64]> {
        self.statistics.as_deref()
    }

    pub fn fit(&mut self, data: &Dataset) -> Result<()> {
        let mut statistics = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let values = data.numeric_column(name)?;
            let median = stats::median(&values).ok_or_else(|| PipelineError::EmptyColumn {
                column: name.clone(),
            })?;
            debug!("[PREP] median({}) = {}", name, median);
            statistics.push(median);
        }
        self.statistics = Some(statistics);
        Ok(())
    }

    /// Imputed columns, in the order given at construction
    pub fn transform(&self, data: &Dataset) -> Result<Vec<Vec<f64>>> {
        let statistics = self.statistics.as_ref().ok_or(PipelineError::NotFitted)?;

        self.columns
            .iter()
            .zip(statistics.iter())
            .map(|(name, &fill)| {
                Ok(data
                    .numeric_column(name)?
                    .into_iter()
                    .map(|v| v.unwrap_or(fill))
                    .collect())
            })
            .collect()
    }
}

/// Fills missing categorical cells with the most frequent training value
#[derive(Debug, Clone)]
pub struct MostFrequentImputer {
    columns: Vec<String>,
    statistics: Option<Vec<String>>,
}

impl MostFrequentImputer {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            statistics: None,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn statistics(&self) -> Option<&[String]> {
        self.statistics.as_deref()
    }

    pub fn fit(&mut self, data: &Dataset) -> Result<()> {
        let mut statistics = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let values = data.categorical_column(name)?;
            let mode = stats::most_frequent(&values).ok_or_else(|| PipelineError::EmptyColumn {
                column: name.clone(),
            })?;
            debug!("[PREP] most_frequent({}) = {}", name, mode);
            statistics.push(mode);
        }
        self.statistics = Some(statistics);
        Ok(())
    }

    pub fn transform(&self, data: &Dataset) -> Result<Vec<Vec<String>>> {
        let statistics = self.statistics.as_ref().ok_or(PipelineError::NotFitted)?;

        self.columns
            .iter()
            .zip(statistics.iter())
            .map(|(name, fill)| {
                Ok(data
                    .categorical_column(name)?
                    .into_iter()
                    .map(|v| v.unwrap_or_else(|| fill.clone()))
                    .collect())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_median_imputer() {
        let train = dataset("Age,Fare\n22,7.25\n,71.28\n38,\n26,8.05\n");
        let mut imputer = MedianImputer::new(vec!["Age".into(), "Fare".into()]);
        imputer.fit(&train).unwrap();

        assert_eq!(imputer.statistics().unwrap(), &[26.0, 8.05]);

        let out = imputer.transform(&train).unwrap();
        assert_eq!(out[0], vec![22.0, 26.0, 38.0, 26.0]);
        assert_eq!(out[1], vec![7.25, 71.28, 8.05, 8.05]);
    }

    #[test]
    fn test_median_uses_training_rows_only() {
        let train = dataset("Age\n10\n20\n30\n");
        let test = dataset("Age\n\n1000\n1000\n1000\n");

        let mut imputer = MedianImputer::new(vec!["Age".into()]);
        imputer.fit(&train).unwrap();

        let out = imputer.transform(&test).unwrap();
        assert_eq!(out[0], vec![20.0, 1000.0, 1000.0, 1000.0]);
    }

    #[test]
    fn test_median_imputer_errors() {
        let data = dataset("Age\n\n\n");
        let mut imputer = MedianImputer::new(vec!["Age".into()]);
        assert!(matches!(imputer.transform(&data), Err(PipelineError::NotFitted)));
        assert!(matches!(imputer.fit(&data), Err(PipelineError::EmptyColumn { .. })));

        let mut missing = MedianImputer::new(vec!["Fare".into()]);
        assert!(matches!(missing.fit(&data), Err(PipelineError::MissingColumn { .. })));
    }

    #[test]
    fn test_most_frequent_imputer() {
        let train = dataset("Embarked\nS\nC\n\nS\nQ\n");
        let mut imputer = MostFrequentImputer::new(vec!["Embarked".into()]);
        imputer.fit(&train).unwrap();
        assert_eq!(imputer.statistics().unwrap(), &["S".to_string()]);

        let out = imputer.transform(&train).unwrap();
        assert_eq!(out[0], vec!["S", "C", "S", "S", "Q"]);
    }

    #[test]
    fn test_most_frequent_uses_training_rows_only() {
        let train = dataset("Embarked\nS\nS\nC\nQ\n");
        let test = dataset("Embarked\nC\nC\n\nC\n");

        let mut imputer = MostFrequentImputer::new(vec!["Embarked".into()]);
        imputer.fit(&train).unwrap();

        let out = imputer.transform(&test).unwrap();
        assert_eq!(out[0], vec!["C", "C", "S", "C"]);
    }
}
