//! Index-based alignment of throughput series.
//!
//! Series are compared interval by interval. Longer series are cut to the
//! length of the shortest one; nothing is padded or interpolated.

use super::types::{Mbps, ThroughputSeries};

/// Truncate two sample slices to their common length
pub fn align_pair<'a>(a: &'a [Mbps], b: &'a [Mbps]) -> (&'a [Mbps], &'a [Mbps]) {
    let len = a.len().min(b.len());
    if a.len() != b.len() {
        log::debug!("Truncating series of lengths {} and {} to {}", a.len(), b.len(), len);
    }
    (&a[..len], &b[..len])
}

/// Truncate any number of series to the shortest one's length
pub fn align_all(series: &[ThroughputSeries]) -> Vec<&[Mbps]> {
    let len = series.iter().map(ThroughputSeries::len).min().unwrap_or(0);
    series.iter().map(|s| &s.samples()[..len]).collect()
}

/// Mean of each aligned series, the per-flow terminal value fed to the
/// fairness index when comparing interval logs.
pub fn aligned_means(aligned: &[&[Mbps]]) -> Vec<Mbps> {
    aligned
        .iter()
        .filter_map(|samples| crate::utils::mean(samples))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_pair_truncates_to_shorter() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let b = [7.0, 6.0, 5.0, 4.0, 3.0];
        let (x, y) = align_pair(&a, &b);
        assert_eq!(x, &a[..5]);
        assert_eq!(y, &b[..]);
    }

    #[test]
    fn test_align_pair_with_empty() {
        let (x, y) = align_pair(&[1.0, 2.0], &[]);
        assert!(x.is_empty());
        assert!(y.is_empty());
    }

    #[test]
    fn test_align_all() {
        let series = vec![
            ThroughputSeries::new(vec![1.0, 2.0, 3.0]),
            ThroughputSeries::new(vec![4.0, 5.0]),
            ThroughputSeries::new(vec![6.0, 7.0, 8.0, 9.0]),
        ];
        let aligned = align_all(&series);
        assert_eq!(aligned, vec![&[1.0, 2.0][..], &[4.0, 5.0][..], &[6.0, 7.0][..]]);
        assert!(align_all(&[]).is_empty());
    }

    #[test]
    fn test_aligned_means() {
        let means = aligned_means(&[&[2.0, 4.0], &[1.0, 1.0]]);
        assert_eq!(means, vec![3.0, 1.0]);
    }
}
