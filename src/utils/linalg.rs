//! Dense linear solve.

use crate::error::{Error, Result};

/// Pivots smaller than this (in magnitude) mark the system as singular.
const PIVOT_EPS: f64 = 1e-12;

/// Solves `A x = b` by Gaussian elimination with partial pivoting.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `A` is not square, `b` has the wrong
/// length, or `A` is singular / rank-deficient.
///
/// # Example
///
/// ```
/// use u_moea::utils::linalg::gaussian_elimination;
///
/// let a = vec![vec![2.0, 0.0], vec![0.0, 4.0]];
/// let x = gaussian_elimination(a, vec![2.0, 2.0]).unwrap();
/// assert_eq!(x, vec![1.0, 0.5]);
/// ```
pub fn gaussian_elimination(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = a.len();
    if n == 0 {
        return Err(Error::invalid("the system matrix is empty"));
    }
    if a.iter().any(|row| row.len() != n) {
        return Err(Error::invalid("the system matrix must be square"));
    }
    if b.len() != n {
        return Err(Error::invalid(format!(
            "right-hand side has length {}, expected {n}",
            b.len()
        )));
    }

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);
        if !(a[pivot_row][col].abs() > PIVOT_EPS) {
            return Err(Error::invalid(
                "the system matrix is singular or rank-deficient",
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
