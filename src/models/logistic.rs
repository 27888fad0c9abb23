//! L2-regularised logistic regression for binary classification.
//!
//! Minimises `0.5 * ||w||^2 + C * sum(log_loss)` with a damped Newton method.
//! The intercept is fitted but not penalised. Each Newton system is solved
//! with Gaussian elimination (diagonally damped if singular); the step is
//! halved until the objective stops increasing.

use tracing::{debug, warn};

use matlib::{dot, gauss_elimination, log1p_exp, sigmoid};

use crate::error::{PipelineError, Result};
use crate::preprocessing::FeatureMatrix;

/// Smallest step fraction tried during backtracking
const MIN_STEP: f64 = 1e-10;

/// Diagonal shift, relative to the largest Hessian diagonal entry, applied
/// when the plain Newton system is singular
const DAMPING: f64 = 1e-8;

/// Summary of a completed fit
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// Newton steps taken
    pub iterations: usize,
    /// True if the gradient dropped below tolerance
    pub converged: bool,
    /// Final value of the regularised objective
    pub objective: f64,
}

/// Logistic regression classifier
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Inverse regularisation strength
    pub c: f64,
    /// Maximum Newton iterations
    pub max_iter: usize,
    /// Convergence tolerance on the max absolute gradient
    pub tol: f64,
    coefficients: Option<Vec<f64>>,
    intercept: Option<f64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(1.0, 1000, 1e-4)
    }
}

impl LogisticRegression {
    pub fn new(c: f64, max_iter: usize, tol: f64) -> Self {
        Self {
            c,
            max_iter,
            tol,
            coefficients: None,
            intercept: None,
        }
    }

    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    pub fn intercept(&self) -> Option<f64> {
        self.intercept
    }

    /// Regularised objective for weights `w` (last entry is the intercept)
    fn objective(&self, x: &FeatureMatrix, y: &[f64], w: &[f64]) -> f64 {
        let d = x.n_cols;
        let penalty = 0.5 * dot(&w[..d], &w[..d]);
        let loss: f64 = x
            .rows()
            .zip(y.iter())
            .map(|(row, &yi)| {
                let z = dot(row, &w[..d]) + w[d];
                log1p_exp(z) - yi * z
            })
            .sum();
        penalty + self.c * loss
    }

    pub fn fit(&mut self, x: &FeatureMatrix, y: &[u8]) -> Result<FitReport> {
        if x.n_rows == 0 {
            return Err(PipelineError::EmptyDataset);
        }
        if y.len() != x.n_rows {
            return Err(PipelineError::DimensionMismatch {
                expected: x.n_rows,
                got: y.len(),
            });
        }
        if y.iter().all(|&v| v == y[0]) {
            return Err(PipelineError::SingleClass(y[0]));
        }

        let d = x.n_cols;
        let k = d + 1;
        let yf: Vec<f64> = y.iter().map(|&v| f64::from(v)).collect();

        let mut w = vec![0.0; k];
        let mut objective = self.objective(x, &yf, &w);
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.max_iter {
            let mut grad = vec![0.0; k];
            let mut hess = vec![0.0; k * k];

            for (row, &yi) in x.rows().zip(yf.iter()) {
                let z = dot(row, &w[..d]) + w[d];
                let p = sigmoid(z);
                let r = self.c * (p - yi);
                let s = self.c * p * (1.0 - p);

                for a in 0..k {
                    let xa = if a < d { row[a] } else { 1.0 };
                    grad[a] += r * xa;
                    for b in a..k {
                        let xb = if b < d { row[b] } else { 1.0 };
                        hess[a * k + b] += s * xa * xb;
                    }
                }
            }

            for a in 0..d {
                grad[a] += w[a];
                hess[a * k + a] += 1.0;
            }
            for a in 0..k {
                for b in 0..a {
                    hess[a * k + b] = hess[b * k + a];
                }
            }

            let grad_max = grad.iter().fold(0.0_f64, |m, g| m.max(g.abs()));
            if grad_max <= self.tol {
                converged = true;
                break;
            }

            let direction = newton_direction(&hess, &grad, k)?;

            let mut step = 1.0;
            let mut candidate: Vec<f64>;
            let mut candidate_objective;
            loop {
                candidate = w
                    .iter()
                    .zip(direction.iter())
                    .map(|(wi, di)| wi - step * di)
                    .collect();
                candidate_objective = self.objective(x, &yf, &candidate);
                if candidate_objective <= objective || step < MIN_STEP {
                    break;
                }
                step *= 0.5;
            }

            iterations += 1;
            debug!(
                "[TRAIN] iter {} objective={:.6} |grad|max={:.3e} step={}",
                iterations, candidate_objective, grad_max, step
            );

            if candidate_objective > objective {
                // no descent possible along the Newton direction
                break;
            }
            w = candidate;
            objective = candidate_objective;
        }

        if !converged {
            warn!(
                "[TRAIN] Solver stopped after {} iterations without reaching tolerance {}",
                iterations, self.tol
            );
        }

        self.intercept = Some(w[d]);
        w.truncate(d);
        self.coefficients = Some(w);

        Ok(FitReport {
            iterations,
            converged,
            objective,
        })
    }

    /// Linear score `x·w + b` per row
    pub fn decision_function(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
        let (coefficients, intercept) = match (&self.coefficients, self.intercept) {
            (Some(c), Some(b)) => (c, b),
            _ => return Err(PipelineError::NotFitted),
        };
        if x.n_cols != coefficients.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: coefficients.len(),
                got: x.n_cols,
            });
        }

        Ok(x.rows().map(|row| dot(row, coefficients) + intercept).collect())
    }

    /// Class labels: 1 when the score is strictly positive
    pub fn predict(&self, x: &FeatureMatrix) -> Result<Vec<u8>> {
        Ok(self
            .decision_function(x)?
            .into_iter()
            .map(|z| u8::from(z > 0.0))
            .collect())
    }
}

/// Solve `hess * d = grad`. A singular system (saturated rows leave the
/// unpenalised intercept with no curvature) is retried with a shifted diagonal.
fn newton_direction(hess: &[f64], grad: &[f64], k: usize) -> Result<Vec<f64>> {
    match gauss_elimination(hess, grad, k) {
        Ok(direction) => Ok(direction),
        Err(err) => {
            let scale = (0..k)
                .map(|a| hess[a * k + a].abs())
                .fold(1.0_f64, f64::max);
            debug!("[TRAIN] {}; retrying with damping {:.3e}", err, DAMPING * scale);

            let mut damped = hess.to_vec();
            for a in 0..k {
                damped[a * k + a] += DAMPING * scale;
            }
            gauss_elimination(&damped, grad, k).map_err(PipelineError::Solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (FeatureMatrix, Vec<u8>) {
        let data = vec![
            -2.0, 1.0, //
            -1.5, 0.5, //
            -1.0, 1.5, //
            1.0, -1.0, //
            1.5, 0.0, //
            2.0, -0.5,
        ];
        (FeatureMatrix::new(data, 6, 2), vec![0, 0, 0, 1, 1, 1])
    }

    #[test]
    fn test_fit_predict() {
        let (x, y) = separable();
        let mut model = LogisticRegression::default();
        let report = model.fit(&x, &y).unwrap();

        assert!(report.converged);
        assert!(report.iterations > 0);
        assert_eq!(model.predict(&x).unwrap(), y);

        let scores = model.decision_function(&x).unwrap();
        assert!(scores[0] < 0.0 && scores[5] > 0.0);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable();
        let mut a = LogisticRegression::default();
        let mut b = LogisticRegression::default();
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        assert_eq!(a.coefficients(), b.coefficients());
        assert_eq!(a.intercept(), b.intercept());
    }

    #[test]
    fn test_stronger_regularisation_shrinks_weights() {
        let (x, y) = separable();
        let mut loose = LogisticRegression::new(10.0, 1000, 1e-6);
        let mut tight = LogisticRegression::new(0.01, 1000, 1e-6);
        loose.fit(&x, &y).unwrap();
        tight.fit(&x, &y).unwrap();

        let norm = |m: &LogisticRegression| dot(m.coefficients().unwrap(), m.coefficients().unwrap());
        assert!(norm(&tight) < norm(&loose));
    }

    #[test]
    fn test_gradient_vanishes_at_optimum() {
        let (x, y) = separable();
        let mut model = LogisticRegression::new(1.0, 1000, 1e-10);
        model.fit(&x, &y).unwrap();

        let w = model.coefficients().unwrap();
        let b = model.intercept().unwrap();
        let mut grad = w.to_vec();
        let mut grad_b = 0.0;
        for (row, &yi) in x.rows().zip(y.iter()) {
            let r = sigmoid(dot(row, w) + b) - f64::from(yi);
            for (g, xi) in grad.iter_mut().zip(row.iter()) {
                *g += r * xi;
            }
            grad_b += r;
        }
        assert!(grad.iter().all(|g| g.abs() < 1e-6));
        assert!(grad_b.abs() < 1e-6);
    }

    #[test]
    fn test_single_class_is_error() {
        let (x, _) = separable();
        let mut model = LogisticRegression::default();
        let result = model.fit(&x, &[1, 1, 1, 1, 1, 1]);
        assert!(matches!(result, Err(PipelineError::SingleClass(1))));
    }

    #[test]
    fn test_label_count_mismatch() {
        let (x, _) = separable();
        let mut model = LogisticRegression::default();
        assert!(matches!(
            model.fit(&x, &[0, 1]),
            Err(PipelineError::DimensionMismatch { expected: 6, got: 2 })
        ));
    }

    #[test]
    fn test_predict_before_fit_and_width_mismatch() {
        let (x, y) = separable();
        let mut model = LogisticRegression::default();
        assert!(matches!(model.predict(&x), Err(PipelineError::NotFitted)));

        model.fit(&x, &y).unwrap();
        let wide = FeatureMatrix::new(vec![0.0; 3], 1, 3);
        assert!(matches!(
            model.predict(&wide),
            Err(PipelineError::DimensionMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_extreme_feature_scale_still_fits() {
        // columns: Pclass Age SibSp Parch Fare Sex_female Sex_male Embarked_S
        let data = vec![
            1.0, 1e12, 0.0, 0.0, 211.0, 1.0, 0.0, 1.0, //
            3.0, 0.0, 0.0, 0.0, 7.0, 0.0, 1.0, 1.0,
        ];
        let x = FeatureMatrix::new(data, 2, 8);
        let mut model = LogisticRegression::default();

        model.fit(&x, &[1, 0]).unwrap();
        assert_eq!(model.predict(&x).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_newton_direction_damps_singular_system() {
        let hess = vec![4.0, 0.0, 0.0, 0.0];
        let direction = newton_direction(&hess, &[2.0, 0.0], 2).unwrap();
        assert!((direction[0] - 0.5).abs() < 1e-6);
        assert_eq!(direction[1], 0.0);
    }

    #[test]
    fn test_iteration_cap_warns_but_returns() {
        let (x, y) = separable();
        let mut model = LogisticRegression::new(1.0, 1, 1e-12);
        let report = model.fit(&x, &y).unwrap();
        assert_eq!(report.iterations, 1);
        assert!(!report.converged);
        assert!(model.coefficients().is_some());
    }
}
