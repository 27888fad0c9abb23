use anyhow::{Context, Result};

use crate::config::Config;
use crate::dataset::load_csv;
use crate::evaluation::evaluate;
use crate::models::FitReport;
use crate::pipeline::make_pipeline;
use crate::prediction::{predict, write_predictions};
use crate::training::train;

/// Outcome of one end-to-end run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub fit: FitReport,
    pub train_accuracy: f64,
    pub feature_names: Vec<String>,
}

/// Load train -> fit -> score on train -> load test -> predict -> write
pub fn run(config: &Config) -> Result<RunSummary> {
    let train_data = load_csv(&config.train_file, "TRAIN")
        .context("Failed to load training data")?;

    let y_train = train_data
        .labels(&config.target)
        .context("Training data has no usable target column")?;

    let mut pipeline = make_pipeline(config);
    let fit = train(&mut pipeline, &train_data, &y_train).context("Model fitting failed")?;

    let train_accuracy = evaluate(&pipeline, &train_data, &y_train)?;

    let test_data =
        load_csv(&config.test_file, "TEST").context("Failed to load test data")?;
    let predictions = predict(&pipeline, &test_data, &config.id_column, &config.target)
        .context("Prediction on test data failed")?;

    write_predictions(&config.output_file, &predictions).with_context(|| {
        format!(
            "Failed to write predictions to {}",
            config.output_file.display()
        )
    })?;

    Ok(RunSummary {
        train_rows: train_data.n_rows(),
        test_rows: test_data.n_rows(),
        fit,
        train_accuracy,
        feature_names: pipeline.feature_names(),
    })
}
