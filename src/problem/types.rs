//! The user-facing problem trait.

use crate::error::EvalError;

/// Defines a box-bounded optimization problem.
///
/// This is the main trait users implement to plug their model into the
/// solvers. The fitness vector layout is fixed:
///
/// ```text
/// f = [ objectives (n_obj) | equality residuals (n_ec) | inequality residuals (n_ic) ]
/// ```
///
/// All objectives are **minimized**. An equality residual is satisfied
/// when `|f| <= tol`; an inequality residual when `f <= 0` (within the
/// tolerance the solver uses).
///
/// The last [`n_ix`](Problem::n_ix) decision variables are integer
/// constrained; the others are continuous.
///
/// # Implementing
///
/// ```ignore
/// struct Zdt1 { dim: usize }
///
/// impl Problem for Zdt1 {
///     fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
///         let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
///         Ok(vec![x[0], g * (1.0 - (x[0] / g).sqrt())])
///     }
///     fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
///         (vec![0.0; self.dim], vec![1.0; self.dim])
///     }
///     fn n_obj(&self) -> usize { 2 }
/// }
/// ```
pub trait Problem {
    /// Computes the fitness vector of a decision vector.
    ///
    /// The returned vector must have length
    /// `n_obj() + n_ec() + n_ic()`. Errors are propagated unchanged
    /// out of any solver that triggered the evaluation.
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError>;

    /// Lower and upper bounds of the decision vector.
    ///
    /// Both vectors must have the same (non-zero) length, which defines
    /// the problem dimension `n_x`.
    fn bounds(&self) -> (Vec<f64>, Vec<f64>);

    /// Number of objectives. Defaults to 1.
    fn n_obj(&self) -> usize {
        1
    }

    /// Number of equality constraints. Defaults to 0.
    fn n_ec(&self) -> usize {
        0
    }

    /// Number of inequality constraints. Defaults to 0.
    fn n_ic(&self) -> usize {
        0
    }

    /// Number of integer-constrained variables (the tail of `x`). Defaults to 0.
    fn n_ix(&self) -> usize {
        0
    }

    /// Whether the fitness is noisy. Defaults to `false`.
    fn is_stochastic(&self) -> bool {
        false
    }

    /// Human-readable name used in error messages and logs.
    fn name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}
