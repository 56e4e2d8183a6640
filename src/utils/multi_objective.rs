//! Pareto ranking over objective vectors.
//!
//! Every function here minimizes all objectives and works on plain
//! `&[Vec<f64>]` rows, one row per individual.
//!
//! - [`non_dominated_sort`]: fronts, ranks and domination lists
//! - [`pareto_dominance`]: pairwise dominance test
//! - [`crowding_distance`]: per-row spread within one front
//! - [`sort_population_mo`]: best-first order by front then spread
//! - [`ideal`] / [`nadir`]: component-wise extremes
//!
//! # References
//!
//! - Deb, Pratap, Agarwal & Meyarivan (2002), *A fast and elitist
//!   multiobjective genetic algorithm: NSGA-II*, IEEE TEVC 6(2)

use super::generic::cmp_f64;

/// Fronts and dominance bookkeeping produced by [`non_dominated_sort`].
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Row indices per front, best front first.
    pub fronts: Vec<Vec<usize>>,

    /// `dominated_by[i]`: rows that row `i` dominates.
    pub dominated_by: Vec<Vec<usize>>,

    /// `domination_count[i]`: number of rows dominating row `i`.
    pub domination_count: Vec<usize>,

    /// Front index of every row; `0` marks the non-dominated rows.
    pub ranks: Vec<usize>,
}

/// Splits `objectives` into Pareto fronts.
///
/// Pairs are compared once; rows nobody dominates form front 0, and each
/// later front holds the rows whose dominators all sit in earlier fronts.
/// Within a front, rows keep the order in which they were released.
/// Runs in O(m n²).
///
/// # Panics
///
/// Panics if `objectives` is empty.
///
/// # Example
///
/// ```
/// use u_moea::utils::multi_objective::non_dominated_sort;
///
/// let f = vec![vec![0.0, 2.0], vec![2.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]];
/// let sort = non_dominated_sort(&f);
///
/// assert_eq!(sort.fronts, vec![vec![0, 1, 2], vec![3]]);
/// assert_eq!(sort.domination_count[3], 3);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    assert!(n > 0, "objectives must not be empty");

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];
    let mut front_0 = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&objectives[i], &objectives[j]) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }

        // every pair involving i has been visited at this point
        if domination_count[i] == 0 {
            front_0.push(i);
        }
    }

    let mut remaining = domination_count.clone();
    let mut fronts = vec![front_0];
    loop {
        let mut next_front = Vec::new();
        if let Some(current) = fronts.last() {
            for &i in current {
                for &j in &dominated_by[i] {
                    remaining[j] -= 1;
                    if remaining[j] == 0 {
                        ranks[j] = fronts.len();
                        next_front.push(j);
                    }
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult {
        fronts,
        dominated_by,
        domination_count,
        ranks,
    }
}

#[derive(Debug, PartialEq)]
enum Dominance {
    Left,
    Right,
    Neither,
}

fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// `true` when `a` is no worse than `b` everywhere and better somewhere.
pub fn pareto_dominance(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Crowding distance of every row, as used to break ties inside a front.
///
/// For each objective the rows are ordered and every inner row adds the
/// normalized gap between its two neighbours. The extreme rows of any
/// objective, and every row when there are at most two, get
/// `f64::INFINITY`. An objective with zero range adds nothing.
///
/// ```
/// use u_moea::utils::multi_objective::crowding_distance;
///
/// let d = crowding_distance(&[vec![0.0, 4.0], vec![1.0, 1.0], vec![4.0, 0.0]]);
/// assert!(d[0].is_infinite() && d[2].is_infinite());
/// assert!((d[1] - 2.0).abs() < 1e-12);
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| cmp_f64(objectives[a][obj_idx], objectives[b][obj_idx]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Orders a whole population by Pareto rank, breaking ties by crowding
/// distance (descending, computed within each front).
///
/// The first element is the best individual. Returns an empty vector for
/// an empty input.
pub fn sort_population_mo(objectives: &[Vec<f64>]) -> Vec<usize> {
    if objectives.is_empty() {
        return Vec::new();
    }
    let sort = non_dominated_sort(objectives);

    let mut crowding = vec![0.0f64; objectives.len()];
    for front in &sort.fronts {
        let front_objs: Vec<Vec<f64>> = front.iter().map(|&i| objectives[i].clone()).collect();
        for (&i, d) in front.iter().zip(crowding_distance(&front_objs)) {
            crowding[i] = d;
        }
    }

    let mut idx: Vec<usize> = (0..objectives.len()).collect();
    idx.sort_by(|&a, &b| {
        sort.ranks[a]
            .cmp(&sort.ranks[b])
            .then_with(|| cmp_f64(crowding[b], crowding[a]))
    });
    idx
}

/// Ideal point: the component-wise minimum.
///
/// Returns an empty vector for an empty input.
pub fn ideal(objectives: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = objectives.first() else {
        return Vec::new();
    };
    let mut point = first.clone();
    for f in &objectives[1..] {
        for (p, &v) in point.iter_mut().zip(f.iter()) {
            if v < *p {
                *p = v;
            }
        }
    }
    point
}

/// Nadir point: the component-wise maximum over the non-dominated front.
///
/// Returns an empty vector for an empty input.
pub fn nadir(objectives: &[Vec<f64>]) -> Vec<f64> {
    if objectives.is_empty() {
        return Vec::new();
    }
    let sort = non_dominated_sort(objectives);
    let front = &sort.fronts[0];
    let mut point = objectives[front[0]].clone();
    for &i in &front[1..] {
        for (p, &v) in point.iter_mut().zip(objectives[i].iter()) {
            if v > *p {
                *p = v;
            }
        }
    }
    point
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Non-dominated sort ----

    #[test]
    fn test_single_solution() {
        let objs = vec![vec![1.0, 2.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
        assert_eq!(result.domination_count, vec![0]);
    }

    #[test]
    fn test_two_non_dominated() {
        let objs = vec![vec![1.0, 3.0], vec![3.0, 1.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0]);
        assert_eq!(result.fronts.len(), 1);
    }

    #[test]
    fn test_clear_dominance() {
        let objs = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 1, 2]);
        assert_eq!(result.fronts.len(), 3);
        assert_eq!(result.dominated_by[0], vec![1, 2]);
        assert_eq!(result.domination_count, vec![0, 1, 2]);
    }

    #[test]
    fn test_mixed_fronts() {
        let objs = vec![
            vec![1.0, 5.0], // front 0
            vec![3.0, 3.0], // front 0
            vec![5.0, 1.0], // front 0
            vec![4.0, 4.0], // dominated by [1]
            vec![6.0, 6.0], // dominated by [3] too
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
        assert_eq!(result.fronts, vec![vec![0, 1, 2], vec![3], vec![4]]);
    }

    #[test]
    fn test_all_equal() {
        let objs = vec![vec![2.0, 2.0], vec![2.0, 2.0], vec![2.0, 2.0]];
        let result = non_dominated_sort(&objs);
        // identical solutions don't dominate each other
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    #[test]
    fn test_three_objectives() {
        let objs = vec![
            vec![1.0, 5.0, 3.0],
            vec![3.0, 1.0, 5.0],
            vec![5.0, 3.0, 1.0],
            vec![4.0, 4.0, 4.0],
        ];
        let result = non_dominated_sort(&objs);
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    #[test]
    fn test_pareto_dominance() {
        assert!(pareto_dominance(&[1.0, 1.0], &[1.0, 2.0]));
        assert!(!pareto_dominance(&[1.0, 2.0], &[1.0, 2.0]));
        assert!(!pareto_dominance(&[0.0, 3.0], &[1.0, 2.0]));
    }

    // ---- Crowding distance ----

    #[test]
    fn test_crowding_two() {
        let objs = vec![vec![1.0, 3.0], vec![3.0, 1.0]];
        let dist = crowding_distance(&objs);
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let objs = vec![
            vec![0.0, 4.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![3.0, 1.0],
            vec![4.0, 0.0],
        ];
        let dist = crowding_distance(&objs);

        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - dist[2]).abs() < 1e-10);
        assert!((dist[2] - dist[3]).abs() < 1e-10);
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let objs = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let dist = crowding_distance(&objs);
        assert!(dist[1].is_finite());
    }

    // ---- Population ordering ----

    #[test]
    fn test_sort_population_mo_rank_first() {
        let objs = vec![
            vec![4.0, 4.0], // front 1
            vec![1.0, 5.0], // front 0, boundary
            vec![3.0, 3.0], // front 0, interior
            vec![5.0, 1.0], // front 0, boundary
            vec![6.0, 6.0], // front 2
        ];
        let order = sort_population_mo(&objs);
        assert_eq!(order.len(), 5);
        // boundaries (infinite crowding) first, then the interior point
        assert_eq!(&order[..2], &[1, 3]);
        assert_eq!(order[2], 2);
        assert_eq!(&order[3..], &[0, 4]);
    }

    #[test]
    fn test_sort_population_mo_empty() {
        assert!(sort_population_mo(&[]).is_empty());
    }

    // ---- Ideal / nadir ----

    #[test]
    fn test_ideal_and_nadir() {
        let objs = vec![
            vec![1.0, 5.0],
            vec![3.0, 3.0],
            vec![5.0, 1.0],
            vec![9.0, 9.0], // dominated, excluded from the nadir
        ];
        assert_eq!(ideal(&objs), vec![1.0, 1.0]);
        assert_eq!(nadir(&objs), vec![5.0, 5.0]);
    }

    #[test]
    fn test_ideal_empty() {
        assert!(ideal(&[]).is_empty());
        assert!(nadir(&[]).is_empty());
    }
}
