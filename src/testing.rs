//! Benchmark problems shared by the unit tests.

use crate::error::EvalError;
use crate::problem::Problem;
use std::cell::Cell;

/// ZDT1: two objectives, `dim` continuous variables in `[0, 1]`.
pub(crate) struct Zdt1 {
    dim: usize,
}

impl Zdt1 {
    pub(crate) fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Problem for Zdt1 {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        let g = if x.len() > 1 {
            1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64
        } else {
            1.0
        };
        Ok(vec![x[0], g * (1.0 - (x[0] / g).sqrt())])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0; self.dim], vec![1.0; self.dim])
    }

    fn n_obj(&self) -> usize {
        2
    }
}

/// Two quadratic objectives pulling towards opposite corners of `[0, 1]^dim`.
pub(crate) struct Corners {
    pub(crate) dim: usize,
}

impl Problem for Corners {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        let n = x.len() as f64;
        let f1 = x.iter().map(|v| v * v).sum::<f64>() / n;
        let f2 = x.iter().map(|v| (v - 1.0) * (v - 1.0)).sum::<f64>() / n;
        Ok(vec![f1, f2])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0; self.dim], vec![1.0; self.dim])
    }

    fn n_obj(&self) -> usize {
        2
    }
}

/// Two objectives over two continuous variables and one integer variable.
pub(crate) struct MixedInteger;

impl Problem for MixedInteger {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(vec![x[0] + x[2], 1.0 - x[0] + x[1]])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 5.0])
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn n_ix(&self) -> usize {
        1
    }
}

/// Sphere with one equality and one inequality constraint on `[-1, 1]^dim`.
///
/// `f = [sum x^2, x0 + x1 - 1, x0 - 2]`.
pub(crate) struct ConstrainedSphere {
    dim: usize,
}

impl ConstrainedSphere {
    pub(crate) fn new(dim: usize) -> Self {
        Self { dim: dim.max(2) }
    }
}

impl Problem for ConstrainedSphere {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(vec![
            x.iter().map(|v| v * v).sum(),
            x[0] + x[1] - 1.0,
            x[0] - 2.0,
        ])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-1.0; self.dim], vec![1.0; self.dim])
    }

    fn n_ec(&self) -> usize {
        1
    }

    fn n_ic(&self) -> usize {
        1
    }
}

/// Sphere whose equality residual can never be satisfied.
pub(crate) struct InfeasibleSphere;

impl Problem for InfeasibleSphere {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(vec![x.iter().map(|v| v * v).sum(), 10.0 + x[0]])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-1.0; 3], vec![1.0; 3])
    }

    fn n_ec(&self) -> usize {
        1
    }
}

/// Unconstrained single-objective sphere on `[-5, 5]^3`.
pub(crate) struct Sphere;

impl Problem for Sphere {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(vec![x.iter().map(|v| v * v).sum()])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-5.0; 3], vec![5.0; 3])
    }
}

/// Two objectives and one inequality constraint.
pub(crate) struct ConstrainedBiObjective;

impl Problem for ConstrainedBiObjective {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(vec![x[0], 1.0 - x[0], x[0] - 0.5])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0; 2], vec![1.0; 2])
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn n_ic(&self) -> usize {
        1
    }
}

/// A problem declaring itself stochastic.
pub(crate) struct Noisy;

impl Problem for Noisy {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(vec![x[0], 1.0 - x[0]])
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0; 2], vec![1.0; 2])
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn is_stochastic(&self) -> bool {
        true
    }
}

/// Always fails to evaluate.
pub(crate) struct Failing;

impl Problem for Failing {
    fn fitness(&self, _x: &[f64]) -> Result<Vec<f64>, EvalError> {
        Err("fitness function failed".into())
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0; 2], vec![1.0; 2])
    }

    fn n_obj(&self) -> usize {
        2
    }
}

/// Behaves like [`Zdt1`] for the first `budget` evaluations, then fails.
pub(crate) struct FailAfter {
    inner: Zdt1,
    budget: usize,
    calls: Cell<usize>,
}

impl FailAfter {
    pub(crate) fn new(dim: usize, budget: usize) -> Self {
        Self {
            inner: Zdt1::new(dim),
            budget,
            calls: Cell::new(0),
        }
    }
}

impl Problem for FailAfter {
    fn fitness(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        let calls = self.calls.get();
        self.calls.set(calls + 1);
        if calls >= self.budget {
            return Err("evaluation budget exhausted".into());
        }
        self.inner.fitness(x)
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        self.inner.bounds()
    }

    fn n_obj(&self) -> usize {
        2
    }
}
