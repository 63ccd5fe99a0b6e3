//! AUC (Area Under the Curve) primitives on raw `&[f64]` slices
//!
//! Used by [`DosingProfile`](crate::profile::DosingProfile) summary metrics.
//! Simulated profiles are dense and smooth, so only the linear trapezoidal rule
//! is provided.
//!
//! ```rust
//! use multidose::data::auc::auc_linear;
//!
//! let times = [0.0, 1.0, 2.0, 4.0, 8.0];
//! let concs = [10.0, 8.0, 6.0, 4.0, 2.0];
//! assert_eq!(auc_linear(&times, &concs).unwrap(), 38.0);
//! ```

use crate::error::MultiDoseError;

/// Linear trapezoidal AUC for a single segment
#[inline]
pub fn auc_segment(t1: f64, c1: f64, t2: f64, c2: f64) -> f64 {
    (c1 + c2) / 2.0 * (t2 - t1)
}

/// Linear trapezoidal AUC over parallel time/concentration arrays
///
/// Fewer than two points give an AUC of zero.
pub fn auc_linear(times: &[f64], concentrations: &[f64]) -> Result<f64, MultiDoseError> {
    if times.len() != concentrations.len() {
        return Err(MultiDoseError::invalid(
            "concentrations",
            format!(
                "length {} does not match {} time points",
                concentrations.len(),
                times.len()
            ),
        ));
    }

    Ok(times
        .windows(2)
        .zip(concentrations.windows(2))
        .map(|(t, c)| auc_segment(t[0], c[0], t[1], c[1]))
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_trapezoidal_simple_decreasing() {
        let times = vec![0.0, 1.0, 2.0, 4.0, 8.0];
        let concs = vec![10.0, 8.0, 6.0, 4.0, 2.0];

        // 9 + 7 + 10 + 12
        assert_relative_eq!(auc_linear(&times, &concs).unwrap(), 38.0, epsilon = 1e-10);
    }

    #[test]
    fn test_single_point_is_zero() {
        assert_eq!(auc_linear(&[1.0], &[5.0]).unwrap(), 0.0);
        assert_eq!(auc_linear(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(auc_linear(&[0.0, 1.0], &[1.0]).is_err());
    }
}
