use tracing::info;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Predict on `features` and return the fraction matching `labels`
pub fn evaluate(pipeline: &Pipeline, features: &Dataset, labels: &[u8]) -> Result<f64> {
    let predictions = pipeline.predict(features)?;
    let accuracy = stats::accuracy(labels, &predictions);
    info!("[METRIC] accuracy over {} rows = {:.4}", labels.len(), accuracy);

    Ok(accuracy)
}
