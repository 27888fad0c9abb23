pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod pipeline;
pub mod prediction;
pub mod preprocessing;
pub mod runner;
pub mod training;

pub use config::{Args, Config};
pub use dataset::{Dataset, load_csv};
pub use error::{PipelineError, Result};
pub use evaluation::evaluate;
pub use pipeline::{Pipeline, make_pipeline};
pub use prediction::{Predictions, predict, write_predictions};
pub use runner::{RunSummary, run};
pub use training::train;
