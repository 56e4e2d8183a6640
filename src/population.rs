//! Population of decision vectors and their fitness.
//!
//! A [`Population`] owns a [`ProblemInstance`] plus two parallel arrays:
//! decision vectors and fitness vectors. Solvers read it through
//! [`get_x`](Population::get_x) / [`get_f`](Population::get_f) and mutate
//! it only through index-addressed replacement
//! ([`set_xf`](Population::set_xf)).

use crate::error::{Error, Result};
use crate::problem::{Problem, ProblemInstance};
use crate::random::{create_rng, uniform_int_from_range, uniform_real_from_range, RandomEngine};
use crate::utils::generic::sort_population_con;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered set of individuals over one problem.
///
/// Invariant: `get_f()[i]` is the fitness of `get_x()[i]` as computed by
/// the owned problem (unless the caller overrides it with
/// [`set_xf`](Population::set_xf)).
///
/// # Examples
///
/// ```ignore
/// let mut pop = Population::random(Zdt1::new(30), 40, 42)?;
/// assert_eq!(pop.len(), 40);
/// assert_eq!(pop.problem().fevals(), 40);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Population<P> {
    problem: ProblemInstance<P>,
    xs: Vec<Vec<f64>>,
    fs: Vec<Vec<f64>>,
    rng: RandomEngine,
    seed: u64,
}

impl<P: Problem> Population<P> {
    /// Creates an empty population with a random seed.
    pub fn new(problem: P) -> Result<Self> {
        Self::with_seed(problem, rand::random())
    }

    /// Creates an empty population whose random decision vectors are
    /// drawn from `seed`.
    pub fn with_seed(problem: P, seed: u64) -> Result<Self> {
        Ok(Self::from_instance(ProblemInstance::new(problem)?, seed))
    }

    /// Creates an empty population over an already validated problem
    /// (e.g. one with a fitness cache enabled).
    pub fn from_instance(problem: ProblemInstance<P>, seed: u64) -> Self {
        Self {
            problem,
            xs: Vec::new(),
            fs: Vec::new(),
            rng: create_rng(seed),
            seed,
        }
    }

    /// Creates a population of `size` random individuals within bounds.
    ///
    /// Each individual is evaluated once, so the problem's `fevals`
    /// counter equals `size` afterwards.
    pub fn random(problem: P, size: usize, seed: u64) -> Result<Self> {
        let mut pop = Self::with_seed(problem, seed)?;
        for _ in 0..size {
            let x = pop.random_decision_vector();
            pop.push_back(x)?;
        }
        Ok(pop)
    }

    /// Evaluates `x` and appends it.
    pub fn push_back(&mut self, x: Vec<f64>) -> Result<()> {
        let f = self.problem.fitness(&x)?;
        self.xs.push(x);
        self.fs.push(f);
        Ok(())
    }

    /// Appends `x` with a caller-supplied fitness (no evaluation).
    pub fn push_back_xf(&mut self, x: Vec<f64>, f: Vec<f64>) -> Result<()> {
        self.problem.check_decision_vector(&x)?;
        self.problem.check_fitness_vector(&f)?;
        self.xs.push(x);
        self.fs.push(f);
        Ok(())
    }

    /// Replaces individual `i` with `(x, f)` without evaluating `x`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `i` is out of range or a vector has
    /// the wrong length. The population is unchanged on error.
    pub fn set_xf(&mut self, i: usize, x: Vec<f64>, f: Vec<f64>) -> Result<()> {
        if i >= self.len() {
            return Err(Error::invalid(format!(
                "trying to access individual at position {i}, while population has size {}",
                self.len()
            )));
        }
        self.problem.check_decision_vector(&x)?;
        self.problem.check_fitness_vector(&f)?;
        self.xs[i] = x;
        self.fs[i] = f;
        Ok(())
    }

    /// Replaces individual `i` with `x`, evaluating its fitness.
    pub fn set_x(&mut self, i: usize, x: Vec<f64>) -> Result<()> {
        if i >= self.len() {
            return Err(Error::invalid(format!(
                "trying to access individual at position {i}, while population has size {}",
                self.len()
            )));
        }
        let f = self.problem.fitness(&x)?;
        self.set_xf(i, x, f)
    }

    /// Draws a decision vector uniformly within the bounds; integer
    /// variables are drawn uniformly among the integers in range.
    pub fn random_decision_vector(&mut self) -> Vec<f64> {
        let n_cx = self.problem.n_cx();
        let (lb, ub) = self.problem.bounds();
        let mut x = Vec::with_capacity(lb.len());
        for i in 0..lb.len() {
            if i < n_cx {
                x.push(uniform_real_from_range(lb[i], ub[i], &mut self.rng));
            } else {
                x.push(uniform_int_from_range(lb[i], ub[i], &mut self.rng));
            }
        }
        x
    }

    /// Index of the best individual of a single-objective population.
    ///
    /// Feasible individuals beat infeasible ones; `tol` is the
    /// constraint tolerance.
    pub fn best_idx(&self, tol: f64) -> Result<usize> {
        self.ranked(tol)?
            .first()
            .copied()
            .ok_or_else(|| Error::invalid("empty population"))
    }

    /// Index of the worst individual of a single-objective population.
    pub fn worst_idx(&self, tol: f64) -> Result<usize> {
        self.ranked(tol)?
            .last()
            .copied()
            .ok_or_else(|| Error::invalid("empty population"))
    }

    fn ranked(&self, tol: f64) -> Result<Vec<usize>> {
        if self.is_empty() {
            return Err(Error::invalid(
                "cannot determine the best or worst individual of an empty population",
            ));
        }
        if self.problem.n_obj() > 1 {
            return Err(Error::invalid(
                "best and worst individuals are only defined for single-objective problems",
            ));
        }
        Ok(sort_population_con(&self.fs, self.problem.n_ec(), tol))
    }

    /// Decision vectors, in population order.
    pub fn get_x(&self) -> &[Vec<f64>] {
        &self.xs
    }

    /// Fitness vectors, in population order.
    pub fn get_f(&self) -> &[Vec<f64>] {
        &self.fs
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the population has no individuals.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// The problem this population lives on.
    pub fn problem(&self) -> &ProblemInstance<P> {
        &self.problem
    }

    /// Mutable access to the problem, needed to evaluate fitness.
    pub fn problem_mut(&mut self) -> &mut ProblemInstance<P> {
        &mut self.problem
    }

    /// The seed used for random decision vectors.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
