//! Ordering helpers shared by all sort keys in the crate.

use std::cmp::Ordering;

/// Total order on `f64` where every NaN compares greater than any number.
///
/// Used for all sort keys so a NaN fitness sinks to the end instead of
/// breaking the sort.
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Indices that sort `values` ascending (stable, NaN last).
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| cmp_f64(values[a], values[b]));
    idx
}

/// Number of violated constraints and L2 norm of the violations.
///
/// `f` is a full fitness vector whose first entry is the objective;
/// entries `1..=n_ec` are equality residuals, the rest inequality
/// residuals.
fn violation(f: &[f64], n_ec: usize, tol: f64) -> (usize, f64) {
    let mut count = 0usize;
    let mut norm2 = 0.0;
    for (k, &c) in f.iter().enumerate().skip(1) {
        let v = if k <= n_ec {
            (c.abs() - tol).max(0.0)
        } else {
            (c - tol).max(0.0)
        };
        if v > 0.0 {
            count += 1;
            norm2 += v * v;
        }
    }
    (count, norm2.sqrt())
}

/// Feasibility-first comparison of two single-objective fitness vectors.
///
/// - feasible beats infeasible;
/// - two feasible vectors compare on the objective;
/// - two infeasible vectors compare on the number of violated
///   constraints, then on the norm of the violation.
pub fn compare_fc(a: &[f64], b: &[f64], n_ec: usize, tol: f64) -> Ordering {
    let (va, na) = violation(a, n_ec, tol);
    let (vb, nb) = violation(b, n_ec, tol);
    match (va == 0, vb == 0) {
        (true, true) => cmp_f64(a[0], b[0]),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => va.cmp(&vb).then_with(|| cmp_f64(na, nb)),
    }
}

/// Indices of single-objective fitness vectors, best first, using [`compare_fc`].
pub fn sort_population_con(fits: &[Vec<f64>], n_ec: usize, tol: f64) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..fits.len()).collect();
    idx.sort_by(|&a, &b| compare_fc(&fits[a], &fits[b], n_ec, tol));
    idx
}
