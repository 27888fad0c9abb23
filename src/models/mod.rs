pub mod logistic;

pub use logistic::{FitReport, LogisticRegression};
