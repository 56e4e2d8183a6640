//! Multi-objective population-based optimizers.
//!
//! Provides two solvers that evolve a [`Population`] over a user-defined,
//! box-bounded [`Problem`]:
//!
//! - **NSPSO**: Non-dominated Sorting Particle Swarm Optimizer for
//!   unconstrained multi-objective problems, with three leader-ranking
//!   strategies (crowding distance, niche count, MaxMin).
//! - **ACO**: Extended Ant Colony Optimization for constrained and
//!   mixed-integer single-objective problems, ranking solutions with the
//!   oracle penalty method and sampling from a multi-kernel Gaussian.
//!
//! Both implement [`Algorithm`]: configure, optionally set a verbosity,
//! call [`evolve`](Algorithm::evolve), read the [`log`](Algorithm::log).
//!
//! # Problems and populations
//!
//! A [`Problem`] returns a fitness vector laid out as objectives, then
//! equality residuals, then inequality residuals. [`ProblemInstance`]
//! validates it once and counts evaluations; [`Population`] holds
//! decision vectors with their fitness.
//!
//! # Utilities
//!
//! [`utils`] exposes the numerical kernels the solvers are built on:
//! non-dominated sorting, crowding distance, MaxMin, niche counts,
//! reference points and a dense linear solver.
//!
//! # Logging
//!
//! Progress tables are written through the [`log`](https://docs.rs/log)
//! facade at info level, one target per solver.

pub mod aco;
pub mod algorithm;
pub mod error;
pub mod evolution_log;
pub mod nspso;
pub mod population;
pub mod problem;
pub mod random;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use aco::Aco;
pub use algorithm::Algorithm;
pub use error::{Error, EvalError, Result};
pub use evolution_log::LogLine;
pub use nspso::Nspso;
pub use population::Population;
pub use problem::{Problem, ProblemInstance};
