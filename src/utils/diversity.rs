//! Diversity measures used for leader ranking.
//!
//! - [`maxmin`]: MaxMin dominance score (Balling, 2003)
//! - [`niche_count`]: neighbours within a radius, with the radius from
//!   [`fonseca_fleming_delta`] (Fonseca & Fleming, 1993)

/// MaxMin score of every row of `objectives`.
///
/// `m[i] = max_{j != i} min_k (f[i][k] - f[j][k])`.
///
/// For pairwise-distinct vectors `m[i] < 0` exactly when `i` is
/// non-dominated; identical vectors score `0` against each other. A
/// single vector has no competitor and scores `-inf`.
///
/// # Complexity
///
/// O(n² m)
///
/// # Example
///
/// ```
/// use u_moea::utils::diversity::maxmin;
///
/// let m = maxmin(&[vec![0.0, 1.0], vec![1.0, 0.0], vec![2.0, 2.0]]);
/// assert!(m[0] < 0.0 && m[1] < 0.0);
/// assert!(m[2] > 0.0);
/// ```
pub fn maxmin(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    let mut scores = vec![f64::NEG_INFINITY; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let min_diff = objectives[i]
                .iter()
                .zip(objectives[j].iter())
                .map(|(a, b)| a - b)
                .fold(f64::INFINITY, f64::min);
            if min_diff > scores[i] {
                scores[i] = min_diff;
            }
        }
    }
    scores
}

/// Euclidean distance between two vectors of equal length.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Niche count of every chromosome: the number of chromosomes (itself
/// included) strictly closer than `delta`.
pub fn niche_count(chromosomes: &[Vec<f64>], delta: f64) -> Vec<usize> {
    chromosomes
        .iter()
        .map(|ci| {
            chromosomes
                .iter()
                .filter(|cj| euclidean_distance(ci, cj) < delta)
                .count()
        })
        .collect()
}

/// Fonseca–Fleming niche radius for a non-dominated set of `front_size`
/// members spanning the box `[ideal, nadir]`.
///
/// Closed forms are used for two and three objectives; higher dimensions
/// split the volume of the box evenly among the front members. A front
/// with fewer than two members gets an infinite radius.
pub fn fonseca_fleming_delta(ideal: &[f64], nadir: &[f64], front_size: usize) -> f64 {
    if front_size < 2 {
        return f64::INFINITY;
    }
    let n = front_size as f64;
    match ideal.len() {
        2 => ((nadir[0] - ideal[0]) + (nadir[1] - ideal[1])) / (n - 1.0),
        3 => {
            let d1 = nadir[0] - ideal[0];
            let d2 = nadir[1] - ideal[1];
            let d3 = nadir[2] - ideal[2];
            (4.0 * d2 * d1 * n + 4.0 * d3 * d1 * n + 4.0 * d2 * d3 * n + d1 * d1 + d2 * d2 + d3 * d3
                - 2.0 * d2 * d1
                - 2.0 * d3 * d1
                - 2.0 * d2 * d3
                + d1
                + d2
                + d3)
                .sqrt()
                / (2.0 * (n - 1.0))
        }
        m => {
            let volume: f64 = ideal
                .iter()
                .zip(nadir.iter())
                .map(|(lo, hi)| hi - lo)
                .product();
            volume.powf(1.0 / m as f64) / n
        }
    }
}
