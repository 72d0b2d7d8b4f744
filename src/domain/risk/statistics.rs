//! Summary statistics over weighted-risk observations.

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); zero for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 3.0]), 2.0);
        assert_eq!(mean(&[4.0]), 4.0);
    }

    #[test]
    fn std_dev_of_single_value_is_zero() {
        assert_eq!(sample_std_dev(&[7.5]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
    }

    #[test]
    fn std_dev_uses_sample_denominator() {
        let sd = sample_std_dev(&[1.0, 3.0]);
        assert!((sd - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn std_dev_of_identical_values_is_zero() {
        assert_eq!(sample_std_dev(&[2.0, 2.0, 2.0]), 0.0);
    }
}
