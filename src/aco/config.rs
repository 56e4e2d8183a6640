//! ACO configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Norm used to aggregate constraint residuals into one number.
///
/// Equality residuals enter as `|ec|`, inequality residuals as their
/// positive part `max(ic, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResidualNorm {
    /// Sum of absolute residuals.
    L1,
    /// Euclidean norm of the residuals.
    #[default]
    L2,
    /// Largest residual.
    LInf,
}

/// Configuration for [`Aco`](super::Aco).
///
/// # Defaults
///
/// ```
/// use u_moea::aco::{AcoConfig, ResidualNorm};
///
/// let config = AcoConfig::default();
/// assert_eq!(config.ker, 10);
/// assert_eq!(config.acc, 0.95);
/// assert_eq!(config.residual_norm, ResidualNorm::L2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_generations(50)
///     .with_ker(5)
///     .with_oracle(0.0)
///     .with_impstop(10)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcoConfig {
    /// Generations per `evolve` call.
    ///
    /// Also scales the kernel standard deviations: more generations give
    /// narrower kernels.
    pub generations: usize,

    /// Constraint tolerance, in `[0, 1)`.
    pub acc: f64,

    /// Stop as soon as some individual's first objective is `<= fstop`.
    ///
    /// `0` disables the criterion.
    pub fstop: f64,

    /// Stop after this many generations without any archive change.
    ///
    /// `0` disables the criterion.
    pub impstop: usize,

    /// Stop after this many generations without a new archive best.
    ///
    /// `0` disables the criterion.
    pub evalstop: usize,

    /// Caps every kernel standard deviation at `(ub - lb) / focus`, in
    /// `[0, 1)`. `0` disables the cap.
    pub focus: f64,

    /// Number of solution-archive rows (kernels). Must not exceed the
    /// population size.
    pub ker: usize,

    /// Target objective value of the oracle penalty.
    pub oracle: f64,

    /// Reserved: Pareto archive size for multi-objective problems.
    pub paretomax: usize,

    /// Reserved: Pareto archive precision for multi-objective problems,
    /// in `[0, 1)`.
    pub epsilon: f64,

    /// Residual aggregation for the oracle penalty.
    pub residual_norm: ResidualNorm,

    /// Random seed. `None` draws one at construction.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            acc: 0.95,
            fstop: 0.0,
            impstop: 0,
            evalstop: 0,
            focus: 0.9,
            ker: 10,
            oracle: 1.0,
            paretomax: 10,
            epsilon: 0.9,
            residual_norm: ResidualNorm::L2,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the constraint tolerance.
    pub fn with_acc(mut self, acc: f64) -> Self {
        self.acc = acc;
        self
    }

    /// Sets the objective stopping value (0 to disable).
    pub fn with_fstop(mut self, fstop: f64) -> Self {
        self.fstop = fstop;
        self
    }

    /// Sets the no-improvement stopping limit (0 to disable).
    pub fn with_impstop(mut self, n: usize) -> Self {
        self.impstop = n;
        self
    }

    /// Sets the no-new-best stopping limit (0 to disable).
    pub fn with_evalstop(mut self, n: usize) -> Self {
        self.evalstop = n;
        self
    }

    /// Sets the focus parameter.
    pub fn with_focus(mut self, focus: f64) -> Self {
        self.focus = focus;
        self
    }

    /// Sets the number of kernels.
    pub fn with_ker(mut self, ker: usize) -> Self {
        self.ker = ker;
        self
    }

    /// Sets the oracle value.
    pub fn with_oracle(mut self, oracle: f64) -> Self {
        self.oracle = oracle;
        self
    }

    /// Sets the reserved Pareto archive parameters.
    pub fn with_pareto(mut self, paretomax: usize, epsilon: f64) -> Self {
        self.paretomax = paretomax;
        self.epsilon = epsilon;
        self
    }

    /// Sets the residual norm.
    pub fn with_residual_norm(mut self, norm: ResidualNorm) -> Self {
        self.residual_norm = norm;
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
        if !(0.0..1.0).contains(&self.acc) {
            return Err(format!("acc must be in [0, 1), got {}", self.acc));
        }
        if !(self.fstop >= 0.0) {
            return Err(format!("fstop must be non-negative, got {}", self.fstop));
        }
        if !(0.0..1.0).contains(&self.focus) {
            return Err(format!("focus must be in [0, 1), got {}", self.focus));
        }
        if self.ker == 0 {
            return Err("ker must be at least 1".into());
        }
        if !(self.oracle >= 0.0) {
            return Err(format!("oracle must be non-negative, got {}", self.oracle));
        }
        if self.paretomax == 0 {
            return Err("paretomax must be at least 1".into());
        }
        if !(0.0..1.0).contains(&self.epsilon) {
            return Err(format!("epsilon must be in [0, 1), got {}", self.epsilon));
        }
        Ok(())
    }
}
