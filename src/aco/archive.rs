//! Solution archive and the pheromones derived from it.

use crate::error::{Error, Result};
use crate::utils::generic::cmp_f64;

/// One archived candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRow {
    /// Oracle penalty (lower is better).
    pub penalty: f64,
    /// Decision vector.
    pub x: Vec<f64>,
    /// Full fitness vector.
    pub f: Vec<f64>,
}

/// Outcome of [`SolutionArchive::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveUpdate {
    /// Number of candidates admitted.
    pub inserted: usize,
    /// Whether the best row changed.
    pub replaced_best: bool,
}

/// The `ker` best feasible candidates seen so far, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionArchive {
    rows: Vec<ArchiveRow>,
}

/// Sorts candidates by ascending penalty (stable, NaN last).
pub fn rank_candidates(candidates: &mut [ArchiveRow]) {
    candidates.sort_by(|a, b| cmp_f64(a.penalty, b.penalty));
}

impl SolutionArchive {
    /// Fills the archive with the `ker` best of `candidates`.
    ///
    /// `candidates` must already be ranked (see [`rank_candidates`]).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when fewer than `ker` candidates are given.
    pub fn new(mut candidates: Vec<ArchiveRow>, ker: usize) -> Result<Self> {
        if candidates.len() < ker {
            return Err(Error::invalid(format!(
                "not enough feasible individuals to fill the solution archive: \
                 {} feasible, ker = {ker}; lower ker, raise acc, or use a larger population",
                candidates.len()
            )));
        }
        candidates.truncate(ker);
        Ok(Self { rows: candidates })
    }

    /// Admits every ranked candidate strictly better than the current worst
    /// row, keeping the size fixed. Scanning stops at the first candidate
    /// that does not qualify.
    pub fn update(&mut self, candidates: &[ArchiveRow]) -> ArchiveUpdate {
        let mut outcome = ArchiveUpdate::default();
        for candidate in candidates {
            let Some(worst) = self.rows.last() else {
                break;
            };
            if !(candidate.penalty < worst.penalty) {
                break;
            }
            let pos = self
                .rows
                .partition_point(|row| row.penalty <= candidate.penalty);
            self.rows.insert(pos, candidate.clone());
            self.rows.pop();
            outcome.inserted += 1;
            if pos == 0 {
                outcome.replaced_best = true;
            }
        }
        outcome
    }

    /// Archived rows, best first.
    pub fn rows(&self) -> &[ArchiveRow] {
        &self.rows
    }

    /// The best row.
    pub fn best(&self) -> Option<&ArchiveRow> {
        self.rows.first()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the archive has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rank-based kernel weights: row `k` (1-based) weighs
    /// `(ker - k + 1) / (ker (ker + 1) / 2)`. The weights sum to one.
    pub fn weights(&self) -> Vec<f64> {
        let ker = self.rows.len();
        let total = (ker * (ker + 1)) as f64 / 2.0;
        (1..=ker).map(|k| (ker - k + 1) as f64 / total).collect()
    }

    /// Per-variable kernel standard deviation.
    ///
    /// `(d_max - d_min) / generations`, where `d_min`/`d_max` are the
    /// smallest and largest pairwise distances between archived values of
    /// the variable. When `focus != 0` the result is capped at
    /// `(ub - lb) / focus`. An archive of one row gives zero.
    pub fn sigma(&self, lb: &[f64], ub: &[f64], focus: f64, generations: usize) -> Vec<f64> {
        let gens = generations.max(1) as f64;
        (0..lb.len())
            .map(|h| {
                let mut d_min = f64::INFINITY;
                let mut d_max = f64::NEG_INFINITY;
                for a in 0..self.rows.len() {
                    for b in (a + 1)..self.rows.len() {
                        let d = (self.rows[a].x[h] - self.rows[b].x[h]).abs();
                        d_min = d_min.min(d);
                        d_max = d_max.max(d);
                    }
                }
                if d_max < d_min {
                    return 0.0;
                }
                let sigma = (d_max - d_min) / gens;
                let cap = (ub[h] - lb[h]) / focus;
                if focus != 0.0 && sigma > cap {
                    cap
                } else {
                    sigma
                }
            })
            .collect()
    }
}
