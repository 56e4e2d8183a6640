//! Non-dominated Sorting Particle Swarm Optimizer (NSPSO).
//!
//! A multi-objective particle swarm. Each generation every particle is
//! pulled towards its personal best and towards a leader drawn from the
//! top `leader_selection_range` percent of a ranked leader set. Parents
//! and moved copies are then pooled and the best half survives by Pareto
//! dominance.
//!
//! # Leader ranking
//!
//! [`DiversityMechanism`] picks how the leader set is ranked:
//!
//! - [`CrowdingDistance`](DiversityMechanism::CrowdingDistance): rank, then
//!   crowding distance (NSGA-II ordering)
//! - [`NicheCount`](DiversityMechanism::NicheCount): first front, least
//!   crowded niche first
//! - [`MaxMin`](DiversityMechanism::MaxMin): negative MaxMin scores,
//!   ascending
//!
//! # Key Types
//!
//! - [`NspsoConfig`]: Parameters (inertia schedule, forces, velocity band)
//! - [`Nspso`]: The solver, driven through [`Algorithm`](crate::Algorithm)
//!
//! # Requirements
//!
//! Unconstrained, deterministic problems with at least two objectives and
//! at least one continuous variable; a swarm of at least two particles.
//!
//! # References
//!
//! - Li (2003), *A Non-dominated Sorting Particle Swarm Optimizer for
//!   Multiobjective Optimization*, GECCO 2003
//! - Balling (2003), *The Maximin Fitness Function; Multi-objective City and
//!   Regional Planning*, EMO 2003
//! - Fonseca & Fleming (1993), *Genetic Algorithms for Multiobjective
//!   Optimization: Formulation, Discussion and Generalization*

mod config;
mod runner;
mod types;

pub use config::NspsoConfig;
pub use runner::Nspso;
pub use types::DiversityMechanism;
