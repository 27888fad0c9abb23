use tracing::info;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::models::FitReport;
use crate::pipeline::Pipeline;

/// Fit the pipeline on training features and labels
pub fn train(pipeline: &mut Pipeline, features: &Dataset, labels: &[u8]) -> Result<FitReport> {
    info!("[TRAIN] Fitting model...");
    let report = pipeline.fit(features, labels)?;
    info!(
        "[TRAIN] Fit complete. iterations={} converged={}",
        report.iterations, report.converged
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::PipelineError;
    use crate::pipeline::make_pipeline;

    #[test]
    fn test_train_reports_convergence() {
        let data = Dataset::from_reader(
            "Pclass,Sex,Age,SibSp,Parch,Fare,Embarked\n\
             1,female,29,0,0,211,S\n\
             3,male,22,0,0,7,S\n"
                .as_bytes(),
        )
        .unwrap();

        let mut pipeline = make_pipeline(&Config::default());
        let report = train(&mut pipeline, &data, &[1, 0]).unwrap();
        assert!(report.converged);
        assert!(pipeline.classifier().coefficients().is_some());
    }

    #[test]
    fn test_train_single_class_fails() {
        let data = Dataset::from_reader(
            "Pclass,Sex,Age,SibSp,Parch,Fare,Embarked\n\
             1,female,29,0,0,211,S\n\
             3,male,22,0,0,7,S\n"
                .as_bytes(),
        )
        .unwrap();

        let mut pipeline = make_pipeline(&Config::default());
        let result = train(&mut pipeline, &data, &[0, 0]);
        assert!(matches!(result, Err(PipelineError::SingleClass(0))));
    }
}
