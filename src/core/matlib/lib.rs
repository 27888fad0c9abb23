mod linalg;

pub use linalg::*;
