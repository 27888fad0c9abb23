/// Dot product of two equal-length slices
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Numerically stable logistic sigmoid
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

/// log(1 + exp(z)) without overflow for large |z|
pub fn log1p_exp(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

/*
--------------------------------------------------------------------------------
   Solve a * x = b for a dense n by n row-major matrix.
   Gaussian elimination with partial pivoting.
--------------------------------------------------------------------------------
*/
pub fn gauss_elimination(a: &[f64], b: &[f64], n: usize) -> Result<Vec<f64>, String> {
    if a.len() != n * n || b.len() != n {
        return Err(format!(
            "Dimension mismatch: matrix has {} entries and rhs {}, expected {} and {}",
            a.len(),
            b.len(),
            n * n,
            n
        ));
    }

    let mut a = a.to_vec();
    let mut b = b.to_vec();

    // Forward elimination
    for col in 0..n {
        let mut max_row = col;
        for row in (col + 1)..n {
            if a[row * n + col].abs() > a[max_row * n + col].abs() {
                max_row = row;
            }
        }

        if max_row != col {
            for j in 0..n {
                a.swap(col * n + j, max_row * n + j);
            }
            b.swap(col, max_row);
        }

        if a[col * n + col].abs() < 1e-15 {
            return Err("Matrix is singular".to_string());
        }

        for row in (col + 1)..n {
            let factor = a[row * n + col] / a[col * n + col];
            for j in col..n {
                a[row * n + j] -= factor * a[col * n + j];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        x[i] = b[i];
        for j in (i + 1)..n {
            x[i] -= a[i * n + j] * x[j];
        }
        x[i] /= a[i * n + i];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauss_elimination() {
        // 2x + y = 5, x + 3y = 10  ->  x = 1, y = 3
        let a = vec![2.0, 1.0, 1.0, 3.0];
        let b = vec![5.0, 10.0];
        let x = gauss_elimination(&a, &b, 2).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_gauss_elimination_needs_pivot() {
        let a = vec![0.0, 1.0, 1.0, 0.0];
        let b = vec![2.0, 7.0];
        let x = gauss_elimination(&a, &b, 2).unwrap();
        assert!((x[0] - 7.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_gauss_elimination_singular() {
        let a = vec![1.0, 2.0, 2.0, 4.0];
        let b = vec![1.0, 2.0];
        let result = gauss_elimination(&a, &b, 2);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("singular"));
    }

    #[test]
    fn test_sigmoid_and_log1p_exp() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!((log1p_exp(0.0) - 2.0_f64.ln()).abs() < 1e-12);
        assert!((log1p_exp(1000.0) - 1000.0).abs() < 1e-9);
        assert!(log1p_exp(-1000.0) >= 0.0);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    }
}
