pub mod column_transformer;
pub mod encoder;
pub mod imputer;

pub use column_transformer::ColumnTransformer;
pub use encoder::OneHotEncoder;
pub use imputer::{MedianImputer, MostFrequentImputer};

/// Dense row-major feature matrix
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub data: Vec<f64>,
    pub n_rows: usize,
    pub n_cols: usize,
}

impl FeatureMatrix {
    pub fn new(data: Vec<f64>, n_rows: usize, n_cols: usize) -> Self {
        debug_assert_eq!(data.len(), n_rows * n_cols);
        Self { data, n_rows, n_cols }
    }

    /// Interleave column vectors (each `n_rows` long) into row-major order
    pub fn from_columns(columns: &[Vec<f64>], n_rows: usize) -> Self {
        let n_cols = columns.len();
        let mut data = vec![0.0; n_rows * n_cols];
        for (j, column) in columns.iter().enumerate() {
            for (i, &value) in column.iter().enumerate().take(n_rows) {
                data[i * n_cols + j] = value;
            }
        }
        Self::new(data, n_rows, n_cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_rows).map(move |i| self.row(i))
    }
}
