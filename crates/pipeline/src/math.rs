//! Small numeric helpers shared by the scorer and the learner.

/// Constrain `value` to the closed interval `[min, max]`.
///
/// NaN collapses to `min` so a bad input can never escape the bounds.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Cosine similarity of two equally sized vectors.
///
/// Zero-length or zero-magnitude input yields 0.0.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds_and_nan() {
        assert_eq!(clamp(2.5, 0.1, 2.0), 2.0);
        assert_eq!(clamp(-1.0, 0.1, 2.0), 0.1);
        assert_eq!(clamp(1.3, 0.1, 2.0), 1.3);
        assert_eq!(clamp(f64::NAN, 0.1, 2.0), 0.1);
    }

    #[test]
    fn test_cosine() {
        assert!((cosine(&[1.0, 1.0, 0.0], &[1.0, 1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine(&[], &[]), 0.0);
    }

    #[test]
    fn test_mean_and_std() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(population_std(&[0.5, 0.5]), 0.0);
        assert!((population_std(&[0.0, 1.0]) - 0.5).abs() < 1e-12);
    }
}
