//! NSPSO generational loop.
//!
//! [`Nspso`] moves every particle towards its personal best and a leader
//! drawn from the top of a ranked leader set, then keeps the best `N` of
//! the `2N` parents and offspring.

use super::config::NspsoConfig;
use super::types::{DiversityMechanism, Particle};
use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::evolution_log::{should_log, LogLine, LogTable};
use crate::population::Population;
use crate::problem::Problem;
use crate::random::{create_rng, uniform_real_from_range, RandomEngine};
use crate::utils::diversity::{fonseca_fleming_delta, maxmin, niche_count};
use crate::utils::generic::argsort;
use crate::utils::multi_objective::{ideal, nadir, non_dominated_sort, sort_population_mo};
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const NAME: &str = "NSPSO";

/// Non-dominated Sorting Particle Swarm Optimizer.
///
/// The velocity of every particle is kept between `evolve` calls as long
/// as the swarm size does not change.
///
/// # Usage
///
/// ```ignore
/// let mut pop = Population::random(Zdt1::new(30), 40, 1)?;
/// let mut nspso = Nspso::new(NspsoConfig::default().with_generations(250).with_seed(32))?;
/// nspso.evolve(&mut pop)?;
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Nspso {
    config: NspsoConfig,
    rng: RandomEngine,
    seed: u64,
    verbosity: usize,
    log: Vec<LogLine>,
    velocity: Vec<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    table: LogTable,
}

impl Nspso {
    /// Creates the solver.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if [`NspsoConfig::validate`] fails.
    pub fn new(config: NspsoConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidArgument)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            rng: create_rng(seed),
            seed,
            verbosity: 0,
            log: Vec::new(),
            velocity: Vec::new(),
            table: LogTable::new(),
        })
    }

    /// The configuration this solver was built with.
    pub fn config(&self) -> &NspsoConfig {
        &self.config
    }

    /// Particle velocities left by the last `evolve` call.
    pub fn velocity(&self) -> &[Vec<f64>] {
        &self.velocity
    }

    fn check<P: Problem>(pop: &Population<P>) -> Result<()> {
        let prob = pop.problem();
        if prob.n_cx() == 0 {
            return Err(Error::invalid(format!(
                "{NAME} cannot work on problems without continuous part"
            )));
        }
        if prob.is_stochastic() {
            return Err(Error::invalid(format!(
                "the problem appears to be stochastic, {NAME} cannot deal with it"
            )));
        }
        if prob.n_c() != 0 {
            return Err(Error::invalid(format!(
                "constraints detected in {}, {NAME} cannot deal with them",
                prob.name()
            )));
        }
        if prob.n_obj() < 2 {
            return Err(Error::invalid(format!(
                "{NAME} is a multi-objective algorithm, while {} has {} objective",
                prob.name(),
                prob.n_obj()
            )));
        }
        if pop.len() < 2 {
            return Err(Error::invalid(format!(
                "{NAME} needs at least 2 particles, got {}",
                pop.len()
            )));
        }
        Ok(())
    }

    /// Clamps a velocity cache of matching shape into the band, or draws a
    /// fresh one.
    fn prepare_velocity(&mut self, swarm_size: usize, minv: &[f64], maxv: &[f64]) {
        let n_x = minv.len();
        let reusable = self.velocity.len() == swarm_size
            && self.velocity.iter().all(|v| v.len() == n_x);
        if reusable {
            for v in &mut self.velocity {
                for (i, vi) in v.iter_mut().enumerate() {
                    *vi = vi.clamp(minv[i], maxv[i]);
                }
            }
            return;
        }
        let rng = &mut self.rng;
        self.velocity = (0..swarm_size)
            .map(|_| {
                (0..n_x)
                    .map(|i| uniform_real_from_range(minv[i], maxv[i], rng))
                    .collect()
            })
            .collect();
    }
}

/// Ranked indices of the particles leaders may be drawn from.
///
/// Always holds at least two entries for a swarm of two or more.
fn leader_set(mechanism: DiversityMechanism, fits: &[Vec<f64>], swarm: &[Particle]) -> Vec<usize> {
    match mechanism {
        DiversityMechanism::CrowdingDistance => sort_population_mo(fits),
        DiversityMechanism::NicheCount => {
            let fronts = non_dominated_sort(fits).fronts;
            let front0 = &fronts[0];
            if front0.len() < 2 {
                let mut leaders = Vec::new();
                for front in &fronts {
                    if leaders.len() >= 2 {
                        break;
                    }
                    leaders.extend_from_slice(front);
                }
                return leaders;
            }
            let chromosomes: Vec<Vec<f64>> =
                front0.iter().map(|&i| swarm[i].best_x.clone()).collect();
            let delta = fonseca_fleming_delta(&ideal(fits), &nadir(fits), front0.len());
            let counts: Vec<f64> = niche_count(&chromosomes, delta)
                .into_iter()
                .map(|c| c as f64)
                .collect();
            argsort(&counts).into_iter().map(|k| front0[k]).collect()
        }
        DiversityMechanism::MaxMin => {
            let scores = maxmin(fits);
            let mut order = argsort(&scores);
            let mut len = 1;
            while len < order.len() && scores[order[len]] < 0.0 {
                len += 1;
            }
            order.truncate(len.max(2));
            order
        }
    }
}

/// Highest leader-set position a leader is drawn from.
fn leader_extent(leaders: usize, range: u32) -> usize {
    let ext = (leaders as f64 * f64::from(range) / 100.0).ceil() as usize;
    ext.saturating_sub(1).max(1).min(leaders.saturating_sub(1))
}

/// Keeps `n` of the given fitness vectors by Pareto fronts; the front that
/// does not fit entirely is shuffled and truncated.
fn select_by_fronts(fits: &[Vec<f64>], n: usize, rng: &mut RandomEngine) -> Vec<usize> {
    let mut selected = Vec::with_capacity(n);
    for mut front in non_dominated_sort(fits).fronts {
        let remaining = n - selected.len();
        if remaining == 0 {
            break;
        }
        if front.len() <= remaining {
            selected.extend(front);
        } else {
            front.shuffle(rng);
            selected.extend_from_slice(&front[..remaining]);
        }
    }
    selected
}

impl Algorithm for Nspso {
    fn evolve<P: Problem>(&mut self, pop: &mut Population<P>) -> Result<()> {
        Self::check(pop)?;
        self.log.clear();
        self.table = LogTable::new();
        if self.config.generations == 0 {
            log::debug!(target: NAME, "zero generations requested, population left unchanged");
            return Ok(());
        }

        let NspsoConfig {
            generations,
            min_w,
            max_w,
            c1,
            c2,
            chi,
            v_coeff,
            leader_selection_range,
            diversity_mechanism,
            ..
        } = self.config.clone();

        let swarm_size = pop.len();
        let n_cx = pop.problem().n_cx();
        let (lb, ub) = {
            let (lb, ub) = pop.problem().bounds();
            (lb.to_vec(), ub.to_vec())
        };
        let n_x = lb.len();
        let maxv: Vec<f64> = lb.iter().zip(&ub).map(|(l, u)| (u - l) * v_coeff).collect();
        let minv: Vec<f64> = maxv.iter().map(|v| -v).collect();
        self.prepare_velocity(swarm_size, &minv, &maxv);

        let mut swarm: Vec<Particle> = (0..swarm_size)
            .map(|i| {
                Particle::new(
                    pop.get_x()[i].clone(),
                    self.velocity[i].clone(),
                    pop.get_f()[i].clone(),
                )
            })
            .collect();

        for gen in 1..=generations {
            if should_log(self.verbosity, gen) {
                let line = LogLine {
                    gen,
                    fevals: pop.problem().fevals(),
                    ideal: ideal(pop.get_f()),
                };
                self.table.emit(NAME, &line);
                self.log.push(line);
            }

            // 1 - leaders from the current fitness
            let leaders = leader_set(diversity_mechanism, pop.get_f(), &swarm);
            let ext = leader_extent(leaders.len(), leader_selection_range);

            let w = max_w - (max_w - min_w) * gen as f64 / generations as f64;

            // 2 - move
            let mut offspring = Vec::with_capacity(swarm_size);
            for (idx, particle) in swarm.iter().enumerate() {
                let leader = loop {
                    let candidate = leaders[self.rng.random_range(0..=ext)];
                    if candidate != idx {
                        break candidate;
                    }
                };
                let leader_x = &swarm[leader].best_x;
                let r1: f64 = self.rng.random();
                let r2: f64 = self.rng.random();

                let mut new_x = Vec::with_capacity(n_x);
                let mut new_v = Vec::with_capacity(n_x);
                for i in 0..n_x {
                    let cur = particle.cur_x[i];
                    let mut v = w * particle.cur_v[i]
                        + c1 * r1 * (particle.best_x[i] - cur)
                        + c2 * r2 * (leader_x[i] - cur);
                    v = v.clamp(minv[i], maxv[i]);

                    let mut x = cur + chi * v;
                    if i >= n_cx {
                        x = x.round();
                    }
                    if x > ub[i] {
                        x = ub[i];
                        v = 0.0;
                    } else if x < lb[i] {
                        x = lb[i];
                        v = 0.0;
                    }
                    new_x.push(x);
                    new_v.push(v);
                }

                let f = pop.problem_mut().fitness(&new_x)?;
                offspring.push(Particle::new(new_x, new_v, f));
            }
            swarm.extend(offspring);

            // 3 - environmental selection over parents and offspring
            let combined: Vec<Vec<f64>> = swarm.iter().map(|p| p.best_f.clone()).collect();
            let selected = match diversity_mechanism {
                DiversityMechanism::MaxMin => {
                    let mut order = argsort(&maxmin(&combined));
                    order.truncate(swarm_size);
                    order
                }
                _ => select_by_fronts(&combined, swarm_size, &mut self.rng),
            };

            let mut slots: Vec<Option<Particle>> = swarm.into_iter().map(Some).collect();
            swarm = selected
                .iter()
                .filter_map(|&i| slots[i].take())
                .collect();

            // 4 - commit
            for (i, p) in swarm.iter().enumerate() {
                pop.set_xf(i, p.cur_x.clone(), p.cur_f.clone())?;
            }
        }

        self.velocity = swarm.into_iter().map(|p| p.cur_v).collect();
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
        "NSPSO: Non-dominated Sorting Particle Swarm Optimization"
    }

    fn extra_info(&self) -> String {
        let c = &self.config;
        format!(
            "\tGenerations: {}\n\tMinimum particles' inertia weight: {}\n\
             \tMaximum particles' inertia weight: {}\n\
             \tFirst magnitude of the force coefficients: {}\n\
             \tSecond magnitude of the force coefficients: {}\n\
             \tVelocity scaling factor: {}\n\tVelocity coefficient: {}\n\
             \tLeader selection range: {}\n\tDiversity mechanism: {}\n\
             \tSeed: {}\n\tVerbosity: {}",
            c.generations,
            c.min_w,
            c.max_w,
            c.c1,
            c.c2,
            c.chi,
            c.v_coeff,
            c.leader_selection_range,
            c.diversity_mechanism,
            self.seed,
            self.verbosity
        )
    }
}
