//! Linear-interpolation quantiles over sorted samples

/// Quantile `q` (0..=1) of an ascending sample, interpolating between ranks
///
/// Uses the position `q * (n - 1)` and interpolates linearly between the two
/// neighbouring order statistics. Returns `None` for an empty sample.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let low = sorted[lower];
    let high = sorted[upper];
    Some(low + (high - low) * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert_eq!(quantile_sorted(&[4.0], 0.25), Some(4.0));
        assert_eq!(quantile_sorted(&[4.0], 0.99), Some(4.0));
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let sample = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sample, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&sample, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&sample, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&sample, 1.0), Some(4.0));
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }
}
