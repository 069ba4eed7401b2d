//! Mark statistics
//!
//! min / max / mean / median over a set of integer marks.

use std::fmt;

/// Summary of a set of marks
///
/// All fields are 0 when there are no marks yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkStats {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Compute statistics over `marks`
pub fn compute_stats(marks: &[i64]) -> MarkStats {
    if marks.is_empty() {
        return MarkStats::default();
    }

    let mut sorted = marks.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    // Widened so that extreme stored marks cannot overflow
    let sum: i128 = sorted.iter().map(|&m| i128::from(m)).sum();

    MarkStats {
        min: sorted[0],
        max: sorted[n - 1],
        mean: sum as f64 / n as f64,
        median: median_of_sorted(&sorted),
        count: n,
    }
}

fn median_of_sorted(sorted: &[i64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    }
}

impl fmt::Display for MarkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min={} max={} avg={:.2} median={} (n={})",
            self.min, self.max, self.mean, self.median, self.count
        )
    }
}
