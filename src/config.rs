use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Run configuration for the survival pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Training data (features + target)
    #[serde(default = "default_train_file")]
    pub train_file: PathBuf,

    /// Held-out data to predict (features + identifier)
    #[serde(default = "default_test_file")]
    pub test_file: PathBuf,

    /// Where predictions are written
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Binary target column in the training data
    #[serde(default = "default_target")]
    pub target: String,

    /// Identifier column copied from the test data into the output
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Columns imputed with the training median
    #[serde(default = "default_numeric_features")]
    pub numeric_features: Vec<String>,

    /// Columns imputed with the most frequent training value, then one-hot encoded
    #[serde(default = "default_categorical_features")]
    pub categorical_features: Vec<String>,

    /// Maximum solver iterations for logistic regression
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// Inverse of L2 regularization strength
    #[serde(default = "default_c")]
    pub c: f64,

    /// Gradient tolerance for solver convergence
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_train_file() -> PathBuf {
    PathBuf::from("src/data/train.csv")
}

fn default_test_file() -> PathBuf {
    PathBuf::from("src/data/test.csv")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("src/data/pred_test.csv")
}

fn default_target() -> String {
    "Survived".to_string()
}

fn default_id_column() -> String {
    "PassengerId".to_string()
}

fn default_numeric_features() -> Vec<String> {
    ["Pclass", "Age", "SibSp", "Parch", "Fare"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_categorical_features() -> Vec<String> {
    ["Sex", "Embarked"].iter().map(|s| s.to_string()).collect()
}

fn default_max_iter() -> usize {
    1000
}

fn default_c() -> f64 {
    1.0
}

fn default_tolerance() -> f64 {
    1e-4
}

impl Default for Config {
    fn default() -> Self {
        Config {
            train_file: default_train_file(),
            test_file: default_test_file(),
            output_file: default_output_file(),
            target: default_target(),
            id_column: default_id_column(),
            numeric_features: default_numeric_features(),
            categorical_features: default_categorical_features(),
            max_iter: default_max_iter(),
            c: default_c(),
            tolerance: default_tolerance(),
        }
    }
}

/// Command-line arguments. Every flag is optional; no arguments runs the
/// full flow with the built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "titanic")]
#[command(about = "Fit a survival classifier on train.csv and predict test.csv")]
pub struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Training CSV
    #[arg(long)]
    pub train_file: Option<PathBuf>,

    /// Test CSV
    #[arg(long)]
    pub test_file: Option<PathBuf>,

    /// Output CSV for predictions
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Maximum solver iterations
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Inverse regularization strength
    #[arg(long)]
    pub c: Option<f64>,

    /// Solver gradient tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Build configuration from arguments: flags override the file, the file
    /// overrides the defaults
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        if let Some(path) = &args.train_file {
            config.train_file = path.clone();
        }
        if let Some(path) = &args.test_file {
            config.test_file = path.clone();
        }
        if let Some(path) = &args.output_file {
            config.output_file = path.clone();
        }
        if let Some(max_iter) = args.max_iter {
            config.max_iter = max_iter;
        }
        if let Some(c) = args.c {
            config.c = c;
        }
        if let Some(tolerance) = args.tolerance {
            config.tolerance = tolerance;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse the command line and resolve the configuration
    pub fn load() -> Result<Self> {
        let args = Args::parse();
        Self::from_args(&args)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            anyhow::bail!("max_iter must be greater than 0");
        }

        if !(self.c > 0.0 && self.c.is_finite()) {
            anyhow::bail!("c must be a positive number, got {}", self.c);
        }

        if !(self.tolerance > 0.0) {
            anyhow::bail!("tolerance must be positive, got {}", self.tolerance);
        }

        if self.numeric_features.is_empty() && self.categorical_features.is_empty() {
            anyhow::bail!("At least one feature column is required");
        }

        if self.target.is_empty() {
            anyhow::bail!("target column name must not be empty");
        }

        Ok(())
    }

    /// All feature columns, numeric first then categorical
    pub fn feature_columns(&self) -> Vec<String> {
        self.numeric_features
            .iter()
            .chain(self.categorical_features.iter())
            .cloned()
            .collect()
    }
}
