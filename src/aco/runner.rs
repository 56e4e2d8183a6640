//! ACO generational loop.

use super::archive::{rank_candidates, ArchiveRow, SolutionArchive};
use super::config::AcoConfig;
use super::penalty::{is_feasible, oracle_penalty, residual};
use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::evolution_log::{should_log, LogLine, LogTable};
use crate::population::Population;
use crate::problem::Problem;
use crate::random::{create_rng, RandomEngine};
use crate::utils::multi_objective::ideal;
use rand::Rng;
use rand_distr::StandardNormal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const NAME: &str = "ACO";

/// Extended Ant Colony Optimizer for constrained, mixed-integer problems.
///
/// # Usage
///
/// ```ignore
/// let mut pop = Population::random(MyConstrainedProblem, 60, 1)?;
/// let mut aco = Aco::new(AcoConfig::default().with_ker(10).with_oracle(0.0).with_seed(3))?;
/// aco.evolve(&mut pop)?;
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aco {
    config: AcoConfig,
    rng: RandomEngine,
    seed: u64,
    verbosity: usize,
    log: Vec<LogLine>,
    #[cfg_attr(feature = "serde", serde(skip))]
    table: LogTable,
}

/// State of one `evolve` call.
#[derive(Debug, Default)]
struct Run {
    archive: Option<SolutionArchive>,
    count_impstop: usize,
    count_evalstop: usize,
}

enum Flow {
    Continue,
    Stop,
}

impl Aco {
    /// Creates the solver.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if [`AcoConfig::validate`] fails.
    pub fn new(config: AcoConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidArgument)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            rng: create_rng(seed),
            seed,
            verbosity: 0,
            log: Vec::new(),
            table: LogTable::new(),
        })
    }

    /// The configuration this solver was built with.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    fn check<P: Problem>(&self, pop: &Population<P>) -> Result<()> {
        let prob = pop.problem();
        if pop.is_empty() {
            return Err(Error::invalid(format!(
                "{NAME} does not work on an empty population"
            )));
        }
        if prob.is_stochastic() {
            return Err(Error::invalid(format!(
                "the problem appears to be stochastic, {NAME} cannot deal with it"
            )));
        }
        if prob.n_obj() > 1 {
            return Err(Error::invalid(format!(
                "{NAME} handles single-objective problems only, while {} has {} objectives",
                prob.name(),
                prob.n_obj()
            )));
        }
        Ok(())
    }

    /// The archive is filled from the population, so it cannot outgrow it.
    fn check_archive_size<P: Problem>(&self, pop: &Population<P>) -> Result<()> {
        if self.config.ker > pop.len() {
            return Err(Error::invalid(format!(
                "the solution archive ({} rows) cannot be larger than the population ({})",
                self.config.ker,
                pop.len()
            )));
        }
        Ok(())
    }

    /// Feasible individuals of `pop` with their penalties, best first.
    fn candidates<P: Problem>(&self, pop: &Population<P>) -> Vec<ArchiveRow> {
        let prob = pop.problem();
        let (n_obj, n_ec) = (prob.n_obj(), prob.n_ec());
        let mut rows: Vec<ArchiveRow> = pop
            .get_x()
            .iter()
            .zip(pop.get_f())
            .filter(|(_, f)| is_feasible(f, n_obj, n_ec, self.config.acc))
            .map(|(x, f)| ArchiveRow {
                penalty: oracle_penalty(
                    f[0],
                    residual(f, n_obj, n_ec, self.config.residual_norm),
                    self.config.oracle,
                ),
                x: x.clone(),
                f: f.clone(),
            })
            .collect();
        rank_candidates(&mut rows);
        rows
    }

    /// Draws one decision vector from the multi-kernel Gaussian.
    fn sample(
        &mut self,
        archive: &SolutionArchive,
        weights: &[f64],
        sigma: &[f64],
        lb: &[f64],
        ub: &[f64],
        n_cx: usize,
    ) -> Vec<f64> {
        (0..lb.len())
            .map(|h| {
                let mut value = 0.0;
                for (row, w) in archive.rows().iter().zip(weights) {
                    let z: f64 = self.rng.sample(StandardNormal);
                    value += w * (row.x[h] + sigma[h] * z);
                }
                if h >= n_cx {
                    value = value.round();
                }
                value.clamp(lb[h], ub[h])
            })
            .collect()
    }

    fn generation<P: Problem>(
        &mut self,
        pop: &mut Population<P>,
        run: &mut Run,
        gen: usize,
    ) -> Result<Flow> {
        let AcoConfig {
            generations,
            fstop,
            impstop,
            evalstop,
            focus,
            ker,
            ..
        } = self.config;

        if impstop != 0 && run.count_impstop >= impstop {
            log::debug!(target: NAME, "no archive change for {impstop} generations, stopping");
            return Ok(Flow::Stop);
        }
        if evalstop != 0 && run.count_evalstop >= evalstop {
            log::debug!(target: NAME, "no new best for {evalstop} generations, stopping");
            return Ok(Flow::Stop);
        }

        let n_obj = pop.problem().n_obj();
        if should_log(self.verbosity, gen) {
            let objectives: Vec<Vec<f64>> =
                pop.get_f().iter().map(|f| f[..n_obj].to_vec()).collect();
            let line = LogLine {
                gen,
                fevals: pop.problem().fevals(),
                ideal: ideal(&objectives),
            };
            self.table.emit(NAME, &line);
            self.log.push(line);
        }

        if fstop != 0.0 && pop.get_f().iter().any(|f| f[0] <= fstop) {
            log::debug!(target: NAME, "objective reached fstop = {fstop}, stopping");
            return Ok(Flow::Stop);
        }

        let candidates = self.candidates(pop);
        let archive = match run.archive.take() {
            None => SolutionArchive::new(candidates, ker)?,
            Some(mut archive) => {
                let outcome = archive.update(&candidates);
                if outcome.replaced_best {
                    run.count_evalstop = 0;
                } else {
                    run.count_evalstop += 1;
                }
                if outcome.inserted > 0 {
                    run.count_impstop = 0;
                } else {
                    run.count_impstop += 1;
                }
                archive
            }
        };
        let archive = run.archive.insert(archive);

        let (lb, ub) = {
            let (lb, ub) = pop.problem().bounds();
            (lb.to_vec(), ub.to_vec())
        };
        let n_cx = pop.problem().n_cx();
        let weights = archive.weights();
        let sigma = archive.sigma(&lb, &ub, focus, generations);

        let mut offspring = Vec::with_capacity(pop.len());
        for _ in 0..pop.len() {
            let x = self.sample(archive, &weights, &sigma, &lb, &ub, n_cx);
            let f = pop.problem_mut().fitness(&x)?;
            offspring.push((x, f));
        }
        for (i, (x, f)) in offspring.into_iter().enumerate() {
            pop.set_xf(i, x, f)?;
        }
        Ok(Flow::Continue)
    }
}

impl Algorithm for Aco {
    fn evolve<P: Problem>(&mut self, pop: &mut Population<P>) -> Result<()> {
        self.check(pop)?;
        if self.config.generations != 0 {
            self.check_archive_size(pop)?;
        }
        self.log.clear();
        self.table = LogTable::new();
        if self.config.generations == 0 {
            log::debug!(target: NAME, "zero generations requested, population left unchanged");
            return Ok(());
        }

        let mut run = Run::default();
        for gen in 1..=self.config.generations {
            if let Flow::Stop = self.generation(pop, &mut run, gen)? {
                break;
            }
        }
        Ok(())
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = create_rng(seed);
        self.seed = seed;
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn set_verbosity(&mut self, verbosity: usize) {
        self.verbosity = verbosity;
    }

    fn verbosity(&self) -> usize {
        self.verbosity
    }

    fn generations(&self) -> usize {
        self.config.generations
    }

    fn log(&self) -> &[LogLine] {
        &self.log
    }

    fn name(&self) -> &'static str {
        "ACO: Extended Ant Colony Optimization"
    }

    fn extra_info(&self) -> String {
        let c = &self.config;
        format!(
            "\tGenerations: {}\n\tAccuracy parameter: {}\n\
             \tObjective stopping criterion: {}\n\tImprovement stopping criterion: {}\n\
             \tEvaluation stopping criterion: {}\n\tFocus parameter: {}\n\
             \tKernel: {}\n\tOracle parameter: {}\n\
             \tMax number of non-dominated solutions: {}\n\tPareto precision: {}\n\
             \tResidual norm: {:?}\n\tSeed: {}\n\tVerbosity: {}",
            c.generations,
            c.acc,
            c.fstop,
            c.impstop,
            c.evalstop,
            c.focus,
            c.ker,
            c.oracle,
            c.paretomax,
            c.epsilon,
            c.residual_norm,
            self.seed,
            self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::testing::{ConstrainedSphere, InfeasibleSphere, Noisy, Sphere, Zdt1};
    use std::cell::Cell;

    /// Constant objective: no candidate ever beats the archive.
    struct Flat;

    impl Problem for Flat {
        fn fitness(&self, _x: &[f64]) -> std::result::Result<Vec<f64>, EvalError> {
            Ok(vec![0.0])
        }

        fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
            (vec![-1.0; 2], vec![1.0; 2])
        }
    }

    /// Sphere over one continuous and one integer variable.
    struct IntegerSphere;

    impl Problem for IntegerSphere {
        fn fitness(&self, x: &[f64]) -> std::result::Result<Vec<f64>, EvalError> {
            Ok(vec![x.iter().map(|v| v * v).sum()])
        }

        fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
            (vec![-3.0, -3.0], vec![3.0, 3.0])
        }

        fn n_ix(&self) -> usize {
            1
        }
    }

    /// Sphere that fails after `budget` evaluations.
    struct Fragile {
        budget: usize,
        calls: Cell<usize>,
    }

    impl Problem for Fragile {
        fn fitness(&self, x: &[f64]) -> std::result::Result<Vec<f64>, EvalError> {
            let calls = self.calls.get();
            self.calls.set(calls + 1);
            if calls >= self.budget {
                return Err("sphere evaluation failed".into());
            }
            Ok(vec![x.iter().map(|v| v * v).sum()])
        }

        fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
            (vec![-1.0; 2], vec![1.0; 2])
        }
    }

    fn aco(config: AcoConfig) -> Aco {
        Aco::new(config).unwrap()
    }

    // ---- Preconditions ----

    #[test]
    fn test_infeasible_first_generation_rejected() {
        let mut pop = Population::random(InfeasibleSphere, 20, 1).unwrap();
        let xs = pop.get_x().to_vec();
        let mut algo = aco(AcoConfig::default().with_ker(5).with_seed(1));
        let err = algo.evolve(&mut pop).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(pop.get_x(), xs.as_slice());
        assert_eq!(pop.problem().fevals(), 20);
    }

    #[test]
    fn test_unsuitable_problems_rejected() {
        let mut algo = aco(AcoConfig::default().with_ker(5).with_seed(1));

        let mut multi = Population::random(Zdt1::new(3), 10, 1).unwrap();
        assert!(algo.evolve(&mut multi).unwrap_err().is_invalid_argument());

        let mut noisy = Population::random(Noisy, 10, 1).unwrap();
        assert!(algo.evolve(&mut noisy).unwrap_err().is_invalid_argument());

        let mut empty = Population::with_seed(Sphere, 1).unwrap();
        assert!(algo.evolve(&mut empty).unwrap_err().is_invalid_argument());

        let mut small = Population::random(Sphere, 4, 1).unwrap();
        assert!(algo.evolve(&mut small).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_oversized_archive_allowed_without_generations() {
        let mut pop = Population::random(Sphere, 4, 1).unwrap();
        let xs = pop.get_x().to_vec();
        let mut algo = aco(AcoConfig::default().with_generations(0).with_ker(5).with_seed(1));
        algo.evolve(&mut pop).unwrap();
        assert_eq!(pop.get_x(), xs.as_slice());
        assert!(algo.log().is_empty());

        let mut algo = aco(AcoConfig::default().with_generations(1).with_ker(5).with_seed(1));
        assert!(algo.evolve(&mut pop).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Aco::new(AcoConfig::default().with_focus(1.5))
            .unwrap_err()
            .is_invalid_argument());
    }

    // ---- Archive ----

    #[test]
    fn test_archive_best_never_worsens() {
        let mut pop = Population::random(ConstrainedSphere::new(4), 40, 5).unwrap();
        let mut algo = aco(AcoConfig::default().with_generations(10).with_ker(5).with_seed(5));
        let mut run = Run::default();
        let mut previous = f64::INFINITY;

        for gen in 1..=10 {
            let flow = algo.generation(&mut pop, &mut run, gen).unwrap();
            assert!(matches!(flow, Flow::Continue));

            let archive = run.archive.as_ref().unwrap();
            assert_eq!(archive.len(), 5);
            let best = archive.best().unwrap().penalty;
            assert!(best <= previous, "best penalty rose from {previous} to {best}");
            previous = best;

            for pair in archive.rows().windows(2) {
                assert!(pair[0].penalty <= pair[1].penalty);
            }
            for row in archive.rows() {
                assert!(is_feasible(&row.f, 1, 1, 0.95));
            }
        }
    }

    #[test]
    fn test_counters_follow_archive_updates() {
        let mut pop = Population::random(Flat, 10, 2).unwrap();
        let mut algo = aco(AcoConfig::default().with_generations(5).with_ker(3).with_seed(2));
        let mut run = Run::default();

        algo.generation(&mut pop, &mut run, 1).unwrap();
        assert_eq!((run.count_impstop, run.count_evalstop), (0, 0));
        algo.generation(&mut pop, &mut run, 2).unwrap();
        assert_eq!((run.count_impstop, run.count_evalstop), (1, 1));
        algo.generation(&mut pop, &mut run, 3).unwrap();
        assert_eq!((run.count_impstop, run.count_evalstop), (2, 2));
    }

    // ---- Early termination ----

    #[test]
    fn test_impstop_returns_early() {
        let mut pop = Population::random(Flat, 10, 2).unwrap();
        let mut algo = aco(
            AcoConfig::default()
                .with_generations(50)
                .with_ker(3)
                .with_impstop(2)
                .with_seed(2),
        );
        algo.evolve(&mut pop).unwrap();
        // generations 1..=3 sample, generation 4 stops
        assert_eq!(pop.problem().fevals(), 10 + 3 * 10);
    }

    #[test]
    fn test_evalstop_returns_early() {
        let mut pop = Population::random(Flat, 10, 2).unwrap();
        let mut algo = aco(
            AcoConfig::default()
                .with_generations(50)
                .with_ker(3)
                .with_evalstop(1)
                .with_seed(2),
        );
        algo.evolve(&mut pop).unwrap();
        assert_eq!(pop.problem().fevals(), 10 + 2 * 10);
    }

    #[test]
    fn test_fstop_returns_before_sampling() {
        let mut pop = Population::random(Sphere, 10, 3).unwrap();
        let xs = pop.get_x().to_vec();
        let mut algo = aco(AcoConfig::default().with_ker(3).with_fstop(1e6).with_seed(3));
        algo.set_verbosity(1);
        algo.evolve(&mut pop).unwrap();
        assert_eq!(pop.get_x(), xs.as_slice());
        assert_eq!(pop.problem().fevals(), 10);
        assert_eq!(algo.log().len(), 1);
    }

    #[test]
    fn test_zero_generations_leaves_population() {
        let mut pop = Population::random(Sphere, 10, 3).unwrap();
        let xs = pop.get_x().to_vec();
        let mut algo = aco(AcoConfig::default().with_generations(0).with_ker(3).with_seed(3));
        algo.evolve(&mut pop).unwrap();
        assert_eq!(pop.get_x(), xs.as_slice());
        assert_eq!(pop.problem().fevals(), 10);
    }

    // ---- Invariants ----

    #[test]
    fn test_offspring_within_bounds_and_consistent() {
        let mut pop = Population::random(ConstrainedSphere::new(3), 30, 7).unwrap();
        let mut algo = aco(AcoConfig::default().with_generations(20).with_ker(3).with_seed(7));
        algo.evolve(&mut pop).unwrap();

        assert_eq!(pop.len(), 30);
        assert_eq!(pop.problem().fevals(), 30 + 20 * 30);
        for i in 0..pop.len() {
            let x = pop.get_x()[i].clone();
            assert!(x.iter().all(|v| (-1.0..=1.0).contains(v)));
            let f = pop.problem_mut().fitness(&x).unwrap();
            assert_eq!(pop.get_f()[i], f);
        }
    }

    #[test]
    fn test_integer_variables_stay_integral() {
        let mut pop = Population::random(IntegerSphere, 12, 4).unwrap();
        let mut algo = aco(AcoConfig::default().with_generations(15).with_ker(4).with_seed(4));
        algo.evolve(&mut pop).unwrap();
        for x in pop.get_x() {
            assert_eq!(x[1].fract(), 0.0);
            assert!((-3.0..=3.0).contains(&x[1]));
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = AcoConfig::default().with_generations(15).with_ker(3).with_seed(11);
        let mut pop_a = Population::random(ConstrainedSphere::new(4), 30, 3).unwrap();
        let mut pop_b = Population::random(ConstrainedSphere::new(4), 30, 3).unwrap();
        let mut a = aco(config.clone());
        let mut b = aco(config);
        a.set_verbosity(2);
        b.set_verbosity(2);
        a.evolve(&mut pop_a).unwrap();
        b.evolve(&mut pop_b).unwrap();
        assert_eq!(pop_a.get_x(), pop_b.get_x());
        assert_eq!(a.log(), b.log());
    }

    #[test]
    fn test_fitness_error_propagates() {
        let problem = Fragile {
            budget: 15,
            calls: Cell::new(0),
        };
        let mut pop = Population::random(problem, 10, 1).unwrap();
        let xs = pop.get_x().to_vec();
        let mut algo = aco(AcoConfig::default().with_ker(3).with_seed(1));
        let err = algo.evolve(&mut pop).unwrap_err();
        assert!(matches!(err, Error::Evaluation(_)));
        assert_eq!(pop.get_x(), xs.as_slice());
    }

    // ---- Logging ----

    #[test]
    fn test_log_lines() {
        let mut pop = Population::random(ConstrainedSphere::new(2), 30, 9).unwrap();
        let mut algo = aco(AcoConfig::default().with_generations(12).with_ker(3).with_seed(9));
        algo.set_verbosity(5);
        algo.evolve(&mut pop).unwrap();
        let gens: Vec<usize> = algo.log().iter().map(|l| l.gen).collect();
        assert_eq!(gens, vec![1, 6, 11]);
        assert!(algo.log().iter().all(|l| l.ideal.len() == 1));
        assert_eq!(algo.log()[1].fevals, 30 + 5 * 30);
    }

    #[test]
    fn test_name_and_extra_info() {
        let algo = aco(AcoConfig::default().with_seed(12));
        assert!(algo.name().starts_with("ACO"));
        assert_eq!(algo.seed(), 12);
        assert!(algo.extra_info().contains("Kernel: 10"));
    }

    // ---- Serialization ----

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let algo = aco(AcoConfig::default().with_ker(3).with_seed(4));
        let json = serde_json::to_string(&algo).unwrap();
        let mut restored: Aco = serde_json::from_str(&json).unwrap();
        let mut original = algo.clone();
        assert_eq!(restored.config(), original.config());

        let mut pop_a = Population::random(Sphere, 10, 8).unwrap();
        let mut pop_b = Population::random(Sphere, 10, 8).unwrap();
        original.evolve(&mut pop_a).unwrap();
        restored.evolve(&mut pop_b).unwrap();
        assert_eq!(pop_a.get_x(), pop_b.get_x());
    }
}
