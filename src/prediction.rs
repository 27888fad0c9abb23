use std::fs;
use std::path::Path;

use tracing::info;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Number of leading predictions shown in the log
const SAMPLE_SIZE: usize = 10;

/// Two-column prediction table: identifier and predicted label
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub id_column: String,
    pub label_column: String,
    pub ids: Vec<String>,
    pub labels: Vec<u8>,
}

impl Predictions {
    /// Serialize as CSV: header then one `id,label` line per row, `\n` terminated
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer.write_record([self.id_column.as_str(), self.label_column.as_str()])?;
        for (id, label) in self.ids.iter().zip(self.labels.iter()) {
            csv_writer.write_record([id.as_str(), label.to_string().as_str()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Predict every row of `test`. Identifiers come from `id_column` when the
/// test data has it, otherwise rows are numbered from 1.
pub fn predict(
    pipeline: &Pipeline,
    test: &Dataset,
    id_column: &str,
    label_column: &str,
) -> Result<Predictions> {
    info!("[TEST] Predicting on {} rows", test.n_rows());
    let labels = pipeline.predict(test)?;

    let ids: Vec<String> = if test.has_column(id_column) {
        test.column(id_column)?.into_iter().map(String::from).collect()
    } else {
        info!("[TEST] No '{}' column; numbering rows from 1", id_column);
        (1..=labels.len()).map(|i| i.to_string()).collect()
    };

    let sample: Vec<u8> = labels.iter().take(SAMPLE_SIZE).copied().collect();
    info!("[TEST] Predicted rows: {} | sample: {:?}", labels.len(), sample);

    Ok(Predictions {
        id_column: id_column.to_string(),
        label_column: label_column.to_string(),
        ids,
        labels,
    })
}

/// Write predictions to `path`, creating parent directories and overwriting
/// any existing file
pub fn write_predictions<P: AsRef<Path>>(path: P, predictions: &Predictions) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = fs::File::create(path)?;
    predictions.write_csv(file)?;

    info!("[SAVE] Save predictions to {}", path.display());
    Ok(())
}
