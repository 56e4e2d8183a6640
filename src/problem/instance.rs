//! Validated wrapper around a user [`Problem`].

use super::cache::FitnessCache;
use super::types::Problem;
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user problem together with its validated dimensions and the
/// fitness-evaluation counter.
///
/// All fitness evaluations performed by the solvers go through
/// [`ProblemInstance::fitness`], which checks the vector dimensions and
/// increments [`fevals`](ProblemInstance::fevals). When a cache is
/// enabled, re-evaluating a bit-identical decision vector is served from
/// the cache and does not increment the counter.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProblemInstance<P> {
    inner: P,
    lb: Vec<f64>,
    ub: Vec<f64>,
    n_obj: usize,
    n_ec: usize,
    n_ic: usize,
    n_ix: usize,
    stochastic: bool,
    fevals: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    cache: Option<FitnessCache>,
}

impl<P: Problem> ProblemInstance<P> {
    /// Wraps and validates a user problem.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the bounds are empty, of different
    /// lengths, non-finite, inverted, if `n_obj == 0`, if `n_ix > n_x`,
    /// or if an integer variable has non-integral bounds.
    pub fn new(inner: P) -> Result<Self> {
        let (lb, ub) = inner.bounds();
        if lb.is_empty() {
            return Err(Error::invalid("the bounds dimension cannot be zero"));
        }
        if lb.len() != ub.len() {
            return Err(Error::invalid(format!(
                "length of lower bounds vector is {}, length of upper bound is {}",
                lb.len(),
                ub.len()
            )));
        }
        for (i, (&l, &u)) in lb.iter().zip(ub.iter()).enumerate() {
            if !l.is_finite() || !u.is_finite() {
                return Err(Error::invalid(format!(
                    "bounds of variable {i} must be finite, got [{l}, {u}]"
                )));
            }
            if l > u {
                return Err(Error::invalid(format!(
                    "lower bound of variable {i} ({l}) is greater than its upper bound ({u})"
                )));
            }
        }
        let n_obj = inner.n_obj();
        if n_obj == 0 {
            return Err(Error::invalid("the number of objectives cannot be zero"));
        }
        let n_ix = inner.n_ix();
        if n_ix > lb.len() {
            return Err(Error::invalid(format!(
                "the number of integer variables ({n_ix}) exceeds the problem dimension ({})",
                lb.len()
            )));
        }
        let n_cx = lb.len() - n_ix;
        for i in n_cx..lb.len() {
            if lb[i].fract() != 0.0 || ub[i].fract() != 0.0 {
                return Err(Error::invalid(format!(
                    "integer variable {i} has non-integral bounds [{}, {}]",
                    lb[i], ub[i]
                )));
            }
        }

        Ok(Self {
            n_ec: inner.n_ec(),
            n_ic: inner.n_ic(),
            stochastic: inner.is_stochastic(),
            inner,
            lb,
            ub,
            n_obj,
            n_ix,
            fevals: 0,
            cache: None,
        })
    }

    /// Enables a FIFO fitness cache holding up to `capacity` entries.
    ///
    /// Ignored for stochastic problems.
    pub fn with_fitness_cache(mut self, capacity: usize) -> Self {
        if !self.stochastic {
            self.cache = Some(FitnessCache::new(capacity));
        }
        self
    }

    /// Evaluates the fitness of `x`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `x` or the returned vector have the
    /// wrong length; [`Error::Evaluation`] if the user function fails.
    pub fn fitness(&mut self, x: &[f64]) -> Result<Vec<f64>> {
        self.check_decision_vector(x)?;
        if let Some(cache) = self.cache.as_mut() {
            if let Some(f) = cache.get(x) {
                return Ok(f);
            }
        }
        let f = self.inner.fitness(x).map_err(Error::Evaluation)?;
        self.check_fitness_vector(&f)?;
        self.fevals += 1;
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(x, &f);
        }
        Ok(f)
    }

    /// Checks that `x` has the problem dimension.
    pub fn check_decision_vector(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.n_x() {
            return Err(Error::invalid(format!(
                "length of decision vector is {}, should be {}",
                x.len(),
                self.n_x()
            )));
        }
        Ok(())
    }

    /// Checks that `f` has the fitness dimension.
    pub fn check_fitness_vector(&self, f: &[f64]) -> Result<()> {
        if f.len() != self.n_f() {
            return Err(Error::invalid(format!(
                "fitness length is {}, should be {} (n_obj: {}, n_ec: {}, n_ic: {})",
                f.len(),
                self.n_f(),
                self.n_obj,
                self.n_ec,
                self.n_ic
            )));
        }
        Ok(())
    }

    /// Number of fitness evaluations performed so far (cache hits excluded).
    pub fn fevals(&self) -> u64 {
        self.fevals
    }

    /// Number of fitness lookups served by the cache.
    pub fn cache_hits(&self) -> u64 {
        self.cache.as_ref().map_or(0, FitnessCache::hits)
    }

    /// Lower and upper bounds.
    pub fn bounds(&self) -> (&[f64], &[f64]) {
        (&self.lb, &self.ub)
    }

    /// Problem dimension.
    pub fn n_x(&self) -> usize {
        self.lb.len()
    }

    /// Number of integer variables.
    pub fn n_ix(&self) -> usize {
        self.n_ix
    }

    /// Number of continuous variables.
    pub fn n_cx(&self) -> usize {
        self.lb.len() - self.n_ix
    }

    /// Number of objectives.
    pub fn n_obj(&self) -> usize {
        self.n_obj
    }

    /// Number of equality constraints.
    pub fn n_ec(&self) -> usize {
        self.n_ec
    }

    /// Number of inequality constraints.
    pub fn n_ic(&self) -> usize {
        self.n_ic
    }

    /// Total number of constraints.
    pub fn n_c(&self) -> usize {
        self.n_ec + self.n_ic
    }

    /// Length of the fitness vector.
    pub fn n_f(&self) -> usize {
        self.n_obj + self.n_ec + self.n_ic
    }

    /// Whether the underlying problem is stochastic.
    pub fn is_stochastic(&self) -> bool {
        self.stochastic
    }

    /// Name of the underlying problem.
    pub fn name(&self) -> String {
        self.inner.name()
    }

    /// The wrapped user problem.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}
