//! Jain's Fairness Index over competing flows.

/// Index reported when every flow measured zero throughput.
///
/// The formula is 0/0 in that case; nobody got more than anybody else, so
/// the allocation is reported as perfectly fair.
pub const ALL_ZERO_FAIRNESS: f64 = 1.0;

/// Index reported for an empty set of flows
pub const NO_FLOWS_FAIRNESS: f64 = 0.0;

/// Jain's Fairness Index: `(Σx)² / (n · Σx²)`.
///
/// 1.0 means every flow got the same share; `1/n` means one flow took
/// everything.
///
/// # Examples
/// ```
/// use bloatlab::analysis::fairness::jain_index;
///
/// assert_eq!(jain_index(&[5.0, 5.0, 5.0]), 1.0);
/// assert_eq!(jain_index(&[10.0, 0.0]), 0.5);
/// assert_eq!(jain_index(&[]), 0.0);
/// ```
pub fn jain_index(throughputs: &[f64]) -> f64 {
    if throughputs.is_empty() {
        return NO_FLOWS_FAIRNESS;
    }

    if throughputs.iter().all(|x| *x == 0.0) {
        return ALL_ZERO_FAIRNESS;
    }

    // The index is scale-invariant; normalising by the largest share keeps
    // the squares of tiny values from underflowing to zero.
    let peak = throughputs.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let n = throughputs.len() as f64;
    let sum: f64 = throughputs.iter().map(|x| x / peak).sum();
    let sum_of_squares: f64 = throughputs.iter().map(|x| (x / peak) * (x / peak)).sum();

    ((sum * sum) / (n * sum_of_squares)).min(1.0)
}
