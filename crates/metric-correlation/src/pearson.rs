//! Pearson correlation

use metric_core::{require_len, Error, Result};

/// Pearson correlation coefficient of two equal-length samples
///
/// Uses `Σ(x − x̄)(y − ȳ) / sqrt(Σ(x − x̄)² · Σ(y − ȳ)²)` on centered values,
/// so a large common offset does not cancel the signal. A constant input
/// makes the denominator zero and yields `0`. The result is always finite
/// and clamped to `[-1, 1]`.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "pearson correlation"));
    }
    require_len(2, x.len())?;

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let product = sxx * syy;
    if !(product > 0.0) || !product.is_finite() {
        return Ok(0.0);
    }

    let r = sxy / product.sqrt();
    Ok(if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_perfect_relationships() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_eq!(pearson_correlation(&a, &b).unwrap(), -1.0);
        assert_relative_eq!(pearson_correlation(&a, &a).unwrap(), 1.0);
        let scaled: Vec<f64> = a.iter().map(|v| 3.0 * v + 7.0).collect();
        assert_relative_eq!(pearson_correlation(&a, &scaled).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_input_is_zero() {
        assert_eq!(pearson_correlation(&[10.0; 5], &[3.0; 5]).unwrap(), 0.0);
        assert_eq!(pearson_correlation(&[10.0; 5], &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_input_contract() {
        assert!(matches!(
            pearson_correlation(&[1.0, 2.0], &[1.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(pearson_correlation(&[1.0], &[1.0])
            .unwrap_err()
            .is_insufficient_data());
    }

    #[test]
    fn test_large_offset_keeps_precision() {
        for offset in [1e6, 1e8, 1e9, 1e10] {
            let a: Vec<f64> = (0..100).map(|i| offset + (i % 7) as f64).collect();
            let shifted: Vec<f64> = a.iter().map(|v| v + 3.0).collect();
            let inverted: Vec<f64> = a.iter().map(|v| 2.0 * offset - v).collect();
            assert_relative_eq!(pearson_correlation(&a, &a).unwrap(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(pearson_correlation(&a, &shifted).unwrap(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(pearson_correlation(&a, &inverted).unwrap(), -1.0, epsilon = 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_self_correlation_with_offset(
            values in prop::collection::vec(-1e3f64..1e3, 2..100),
            offset in prop_oneof![Just(0.0), 1e6f64..1e10, -1e10f64..-1e6],
        ) {
            let spread = values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
                - values.iter().copied().fold(f64::INFINITY, f64::min);
            prop_assume!(spread > 1.0);
            let x: Vec<f64> = values.iter().map(|v| v + offset).collect();
            let r = pearson_correlation(&x, &x).unwrap();
            prop_assert!((r - 1.0).abs() < 1e-6, "corr(A, A) = {} at offset {}", r, offset);
        }

        #[test]
        fn prop_symmetric_and_bounded(
            pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 2..100),
        ) {
            let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let xy = pearson_correlation(&x, &y).unwrap();
            let yx = pearson_correlation(&y, &x).unwrap();
            prop_assert_eq!(xy, yx);
            prop_assert!((-1.0..=1.0).contains(&xy));
        }
    }
}
