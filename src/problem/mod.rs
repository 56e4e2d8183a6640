//! Problem abstraction.
//!
//! Users implement [`Problem`] for their model. Solvers never call it
//! directly: a [`ProblemInstance`] validates the declared dimensions once,
//! checks every evaluation, and counts fitness evaluations.

mod cache;
mod instance;
mod types;

pub use instance::ProblemInstance;
pub use types::Problem;
