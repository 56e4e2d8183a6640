//! Extended Ant Colony Optimization (ACO) for constrained problems.
//!
//! The colony keeps a solution archive of the `ker` best feasible
//! individuals, ranked by an oracle penalty. Every generation each ant is
//! drawn from a multi-kernel Gaussian centred on the archived solutions:
//! better-ranked rows weigh more, and the kernel width shrinks with the
//! spread of the archive.
//!
//! Constraints are read from the tail of the fitness vector: `n_ec`
//! equality residuals then `n_ic` inequality residuals (feasible when
//! non-positive), both with tolerance `acc`.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Parameters (archive size, oracle, stopping criteria)
//! - [`Aco`]: The solver, driven through [`Algorithm`](crate::Algorithm)
//! - [`SolutionArchive`]: Ranked elite rows and the pheromones derived
//!   from them
//!
//! # Stopping
//!
//! Besides the generation budget, `evolve` returns early when an
//! objective reaches `fstop`, when the archive has not changed for
//! `impstop` generations, or when its best row has not changed for
//! `evalstop` generations. Each criterion is off when set to zero.
//!
//! # References
//!
//! - Schlüter, Egea & Banga (2009), *Extended ant colony optimization for
//!   non-convex mixed integer nonlinear programming*, Computers &
//!   Operations Research 36(7)
//! - Schlüter & Gerdts (2009), *The oracle penalty method*, Journal of
//!   Global Optimization 47(2)
//! - Socha & Dorigo (2008), *Ant colony optimization for continuous
//!   domains*, European Journal of Operational Research 185(3)

mod archive;
mod config;
pub mod penalty;
mod runner;

pub use archive::{rank_candidates, ArchiveRow, ArchiveUpdate, SolutionArchive};
pub use config::{AcoConfig, ResidualNorm};
pub use runner::Aco;
