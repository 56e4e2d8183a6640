//! Per-generation evolution log.
//!
//! Both solvers record one [`LogLine`] per logged generation and print a
//! fixed-width table through the [`log`] facade:
//!
//! ```text
//!    Gen:        Fevals:        ideal1:        ideal2:
//!       1             80      0.0148216        2.14362
//! ```
//!
//! The column header is repeated every [`HEADER_EVERY`] rows. At most
//! [`MAX_IDEAL_COLUMNS`] ideal-point components are printed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rows printed between two column headers.
pub const HEADER_EVERY: usize = 50;

/// Maximum number of ideal-point components shown in the table.
pub const MAX_IDEAL_COLUMNS: usize = 5;

/// One logged generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogLine {
    /// Generation number, starting at 1.
    pub gen: usize,
    /// Problem evaluations so far.
    pub fevals: u64,
    /// Component-wise minimum of the objectives.
    pub ideal: Vec<f64>,
}

/// Whether generation `gen` is logged under `verbosity`.
///
/// Logging happens at generations `1, 1 + v, 1 + 2v, ...`; a verbosity of
/// zero disables it.
pub(crate) fn should_log(verbosity: usize, gen: usize) -> bool {
    verbosity == 1 || (verbosity > 1 && gen % verbosity == 1)
}

/// Prints log lines as a table, repeating the header periodically.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogTable {
    rows: usize,
}

impl LogTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Emits `line` at info level under `target`.
    pub(crate) fn emit(&mut self, target: &str, line: &LogLine) {
        if needs_header(self.rows) {
            log::info!(target: target, "{}", header(line.ideal.len()));
        }
        log::info!(target: target, "{}", row(line));
        self.rows += 1;
    }
}

/// Whether the header precedes the row printed after `rows` earlier ones.
fn needs_header(rows: usize) -> bool {
    rows % HEADER_EVERY == 0
}

fn header(n_obj: usize) -> String {
    let mut out = format!("{:>7}{:>15}", "Gen:", "Fevals:");
    for i in 0..n_obj.min(MAX_IDEAL_COLUMNS) {
        out.push_str(&format!("{:>15}", format!("ideal{}:", i + 1)));
    }
    if n_obj > MAX_IDEAL_COLUMNS {
        out.push_str(" ... :");
    }
    out
}

fn row(line: &LogLine) -> String {
    let mut out = format!("{:>7}{:>15}", line.gen, line.fevals);
    for v in line.ideal.iter().take(MAX_IDEAL_COLUMNS) {
        out.push_str(&format!("{:>15}", format!("{v:.6}")));
    }
    out
}
