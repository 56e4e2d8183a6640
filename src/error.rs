//! Error types shared by every solver in the crate.

use thiserror::Error;

/// Error produced by a user problem's fitness function.
///
/// Any error type can be returned from [`Problem::fitness`](crate::problem::Problem::fitness);
/// it is carried through `evolve` unchanged inside [`Error::Evaluation`].
pub type EvalError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide error.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value outside its domain, or a problem/population
    /// that does not satisfy an algorithm's preconditions.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The user fitness function failed.
    #[error(transparent)]
    Evaluation(EvalError),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidArgument`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Returns `true` for [`Error::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
