//! Numerical building blocks shared by the solvers.
//!
//! - [`generic`]: NaN-safe ordering, argsort, feasibility-first comparison
//! - [`multi_objective`]: non-dominated sorting, crowding distance, ideal/nadir
//! - [`diversity`]: MaxMin score, niche count, Fonseca–Fleming radius
//! - [`reference_point`]: Das–Dennis reference points on the simplex
//! - [`linalg`]: Gaussian elimination

pub mod diversity;
pub mod generic;
pub mod linalg;
pub mod multi_objective;
pub mod reference_point;
