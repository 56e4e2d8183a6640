//! Feasibility screening and the oracle penalty (Schlüter & Gerdts, 2009).

use super::config::ResidualNorm;

/// Whether every constraint in the tail of `f` is met within `acc`.
///
/// `f` holds `n_obj` objectives, then `n_ec` equality residuals (met when
/// `|c| <= acc`), then inequality residuals (met when `c < -acc`).
pub fn is_feasible(f: &[f64], n_obj: usize, n_ec: usize, acc: f64) -> bool {
    let (eq, ineq) = f[n_obj..].split_at(n_ec);
    eq.iter().all(|c| c.abs() <= acc) && ineq.iter().all(|&c| c < -acc)
}

/// Aggregated constraint violation of `f`.
pub fn residual(f: &[f64], n_obj: usize, n_ec: usize, norm: ResidualNorm) -> f64 {
    let (eq, ineq) = f[n_obj..].split_at(n_ec);
    let violations = eq
        .iter()
        .map(|c| c.abs())
        .chain(ineq.iter().map(|c| c.max(0.0)));
    match norm {
        ResidualNorm::L1 => violations.sum(),
        ResidualNorm::L2 => violations.map(|v| v * v).sum::<f64>().sqrt(),
        ResidualNorm::LInf => violations.fold(0.0, f64::max),
    }
}

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Oracle penalty of an individual with objective `objective` and
/// residual `res`. Lower is better.
///
/// With `d = |objective - oracle|`, objectives at or below the oracle
/// score `-d`. Above the oracle the penalty is `alpha * d + (1 - alpha) * res`
/// while `res < d / 3`, and `-d` otherwise.
pub fn oracle_penalty(objective: f64, res: f64, oracle: f64) -> f64 {
    let diff = (objective - oracle).abs();
    if objective > oracle && res < diff / 3.0 {
        let alpha = (diff * (6.0 * SQRT_3 - 2.0) / (6.0 * SQRT_3) - res) / (diff - res);
        alpha * diff + (1.0 - alpha) * res
    } else {
        -diff
    }
}
