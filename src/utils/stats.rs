//! Descriptive statistics over throughput samples.
//!
//! This module provides the mean and population standard deviation used
//! to summarise a flow's throughput series.

/// Arithmetic mean of a set of values
///
/// # Returns
/// * `Some(f64)` - The mean if `values` is non-empty
/// * `None` - For an empty slice
///
/// # Examples
/// ```
/// use bloatlab::utils::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`)
///
/// # Examples
/// ```
/// use bloatlab::utils::stats::std_dev;
///
/// assert_eq!(std_dev(&[4.0, 4.0, 4.0]), Some(0.0));
/// assert_eq!(std_dev(&[1.0, 3.0]), Some(1.0));
/// assert_eq!(std_dev(&[]), None);
/// ```
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[9.4]), Some(9.4));
    }

    #[test]
    fn test_std_dev_spread() {
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
    }
}
