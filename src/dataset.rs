//! Tabular data loading.
//!
//! A `Dataset` keeps every cell as the raw string read from the CSV file.
//! Typed views (numeric, categorical, binary labels) are produced per column
//! on demand, so columns the pipeline never touches are never parsed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// Cell values treated as missing, in addition to the empty string
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "NULL", "null", "None"];

/// Returns true if a raw cell should be treated as a missing value
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// In-memory table with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from headers and rows. Every row must match the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for row in &rows {
            if row.len() != headers.len() {
                return Err(PipelineError::DimensionMismatch {
                    expected: headers.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    /// Parse CSV content with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }

        Self::new(headers, rows)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PipelineError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Raw cells of one column
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// New dataset holding only `names`, in that order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Dataset> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let headers = names.iter().map(|n| n.as_ref().to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Dataset { headers, rows })
    }

    /// Column parsed as numbers; missing cells become `None`
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        self.column(name)?
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                if is_missing(cell) {
                    return Ok(None);
                }
                cell.trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| PipelineError::InvalidNumber {
                        column: name.to_string(),
                        row: i + 1,
                        value: cell.to_string(),
                    })
            })
            .collect()
    }

    /// Column as category labels, surrounding whitespace removed; missing
    /// cells become `None`
    pub fn categorical_column(&self, name: &str) -> Result<Vec<Option<String>>> {
        Ok(self
            .column(name)?
            .into_iter()
            .map(|cell| {
                if is_missing(cell) {
                    None
                } else {
                    Some(cell.trim().to_string())
                }
            })
            .collect())
    }

    /// Binary target cast to integer. Every value must be 0 or 1.
    pub fn labels(&self, name: &str) -> Result<Vec<u8>> {
        self.column(name)?
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                let invalid = || PipelineError::InvalidLabel {
                    row: i + 1,
                    value: cell.to_string(),
                };
                let value: f64 = cell.trim().parse().map_err(|_| invalid())?;
                if value == 0.0 {
                    Ok(0)
                } else if value == 1.0 {
                    Ok(1)
                } else {
                    Err(invalid())
                }
            })
            .collect()
    }
}

/// Load a CSV file, failing early if the path does not exist
pub fn load_csv<P: AsRef<Path>>(path: P, tag: &str) -> Result<Dataset> {
    let path = path.as_ref();
    info!("[LOAD-{}] {}", tag, path.display());

    if !path.exists() {
        return Err(PipelineError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let dataset = Dataset::from_reader(file)?;

    info!(
        "[LOAD-{}] shape=({}, {})",
        tag,
        dataset.n_rows(),
        dataset.n_cols()
    );
    debug!("[LOAD-{}] columns={:?}", tag, dataset.headers());

    Ok(dataset)
}
