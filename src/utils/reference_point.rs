//! Uniform reference points on the unit simplex (Das & Dennis, 1998).

/// Every point of the simplex lattice with step `1 / divisions` in
/// `n_obj` dimensions.
///
/// Each point has non-negative coordinates summing to one; the set has
/// `C(n_obj + divisions - 1, divisions)` members. Returns an empty set
/// when `n_obj == 0`, and the single vertex `[1.0]` for one objective.
///
/// # Example
///
/// ```
/// use u_moea::utils::reference_point::uniform_reference_points;
///
/// let points = uniform_reference_points(3, 12);
/// assert_eq!(points.len(), 91);
/// ```
pub fn uniform_reference_points(n_obj: usize, divisions: usize) -> Vec<Vec<f64>> {
    if n_obj == 0 {
        return Vec::new();
    }
    if divisions == 0 {
        // only meaningful as the single vertex of a 1-D simplex
        return if n_obj == 1 { vec![vec![1.0]] } else { Vec::new() };
    }
    let mut points = Vec::with_capacity(binomial(n_obj + divisions - 1, divisions));
    let mut current = vec![0usize; n_obj];
    fill(&mut points, &mut current, 0, divisions, divisions);
    points
}

fn fill(out: &mut Vec<Vec<f64>>, current: &mut [usize], dim: usize, left: usize, total: usize) {
    if dim + 1 == current.len() {
        current[dim] = left;
        out.push(current.iter().map(|&c| c as f64 / total as f64).collect());
        return;
    }
    for share in 0..=left {
        current[dim] = share;
        fill(out, current, dim + 1, left - share, total);
    }
}

/// Binomial coefficient, used for capacity hints.
fn binomial(n: usize, k: usize) -> usize {
    let k = k.min(n - k.min(n));
    (0..k).fold(1usize, |acc, i| acc.saturating_mul(n - i) / (i + 1))
}
