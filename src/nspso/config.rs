//! NSPSO configuration.

use super::types::DiversityMechanism;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`Nspso`](super::Nspso).
///
/// # Defaults
///
/// ```
/// use u_moea::nspso::{DiversityMechanism, NspsoConfig};
///
/// let config = NspsoConfig::default();
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.leader_selection_range, 5);
/// assert_eq!(config.diversity_mechanism, DiversityMechanism::CrowdingDistance);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::nspso::{DiversityMechanism, NspsoConfig};
///
/// let config = NspsoConfig::default()
///     .with_generations(250)
///     .with_inertia(0.3, 0.9)
///     .with_diversity_mechanism(DiversityMechanism::MaxMin)
///     .with_seed(32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NspsoConfig {
    /// Generations per `evolve` call.
    pub generations: usize,

    /// Inertia weight reached at the last generation.
    pub min_w: f64,

    /// Inertia weight at the start of the run.
    ///
    /// The weight decreases linearly from `max_w` towards `min_w`.
    pub max_w: f64,

    /// Attraction towards the particle's personal best.
    pub c1: f64,

    /// Attraction towards the selected leader.
    pub c2: f64,

    /// Velocity scaling factor applied when moving a particle.
    pub chi: f64,

    /// Fraction of each variable's range allowed as maximum velocity,
    /// in `(0, 1]`.
    pub v_coeff: f64,

    /// Percentage of the leader set leaders are drawn from, in `(0, 100]`.
    ///
    /// Small values focus the swarm on the top-ranked leaders.
    pub leader_selection_range: u32,

    /// Leader ranking strategy.
    pub diversity_mechanism: DiversityMechanism,

    /// Random seed. `None` draws one at construction.
    pub seed: Option<u64>,
}

impl Default for NspsoConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            min_w: 0.4,
            max_w: 1.0,
            c1: 2.0,
            c2: 2.0,
            chi: 1.0,
            v_coeff: 0.5,
            leader_selection_range: 5,
            diversity_mechanism: DiversityMechanism::CrowdingDistance,
            seed: None,
        }
    }
}

impl NspsoConfig {
    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the inertia weight schedule bounds.
    pub fn with_inertia(mut self, min_w: f64, max_w: f64) -> Self {
        self.min_w = min_w;
        self.max_w = max_w;
        self
    }

    /// Sets the personal-best and leader attraction magnitudes.
    pub fn with_forces(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    /// Sets the velocity scaling factor.
    pub fn with_chi(mut self, chi: f64) -> Self {
        self.chi = chi;
        self
    }

    /// Sets the maximum velocity as a fraction of each variable's range.
    pub fn with_v_coeff(mut self, v_coeff: f64) -> Self {
        self.v_coeff = v_coeff;
        self
    }

    /// Sets the leader selection range (percent).
    pub fn with_leader_selection_range(mut self, range: u32) -> Self {
        self.leader_selection_range = range;
        self
    }

    /// Sets the leader ranking strategy.
    pub fn with_diversity_mechanism(mut self, mechanism: DiversityMechanism) -> Self {
        self.diversity_mechanism = mechanism;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [self.min_w, self.max_w, self.c1, self.c2, self.chi];
        if positive.iter().any(|v| !(*v > 0.0)) {
            return Err(
                "inertia weights, force coefficients and chi must be greater than 0".into(),
            );
        }
        if self.min_w > self.max_w {
            return Err(format!(
                "min_w ({}) must not exceed max_w ({})",
                self.min_w, self.max_w
            ));
        }
        if !(self.v_coeff > 0.0 && self.v_coeff <= 1.0) {
            return Err(format!(
                "v_coeff must be in (0, 1], got {}",
                self.v_coeff
            ));
        }
        if self.leader_selection_range == 0 || self.leader_selection_range > 100 {
            return Err(format!(
                "leader_selection_range must be in (0, 100], got {}",
                self.leader_selection_range
            ));
        }
        Ok(())
    }
}
