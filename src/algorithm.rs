//! Common surface of the population-based solvers.

use crate::error::Result;
use crate::evolution_log::LogLine;
use crate::population::Population;
use crate::problem::Problem;

/// A solver that evolves a [`Population`] in place.
///
/// Implementations own their random engine; two solvers constructed with
/// the same configuration and seed produce the same log and the same final
/// population when evolving identical populations.
///
/// # Examples
///
/// ```ignore
/// use u_moea::{Algorithm, Nspso, NspsoConfig, Population};
///
/// let mut pop = Population::random(MyProblem::new(), 40, 1)?;
/// let mut algo = Nspso::new(NspsoConfig::default().with_seed(32))?;
/// algo.set_verbosity(10);
/// algo.evolve(&mut pop)?;
/// for line in algo.log() {
///     println!("{} {} {:?}", line.gen, line.fevals, line.ideal);
/// }
/// ```
pub trait Algorithm {
    /// Evolves `pop` for the configured number of generations.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) when the
    /// problem or population does not suit the solver;
    /// [`Error::Evaluation`](crate::Error::Evaluation) when the problem's
    /// fitness function fails. On error `pop` holds either its original
    /// content or the last completed generation.
    fn evolve<P: Problem>(&mut self, pop: &mut Population<P>) -> Result<()>;

    /// Reseeds the random engine.
    fn set_seed(&mut self, seed: u64);

    /// The seed last used to initialise the random engine.
    fn seed(&self) -> u64;

    /// Logs every `verbosity` generations; zero disables logging.
    fn set_verbosity(&mut self, verbosity: usize);

    /// Current verbosity.
    fn verbosity(&self) -> usize;

    /// Configured number of generations per `evolve` call.
    fn generations(&self) -> usize;

    /// Lines logged by the most recent `evolve` call.
    fn log(&self) -> &[LogLine];

    /// Human-readable algorithm name.
    fn name(&self) -> &'static str;

    /// Multi-line description of the configuration.
    fn extra_info(&self) -> String;
}
