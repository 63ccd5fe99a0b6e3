//! Observation grid shared by every regimen in a session
//!
//! [`ObservationTimes`] is a half-open arithmetic sequence `[min, max)` stepped by
//! `interval`. Its length follows `numpy.arange`: `ceil((max - min) / interval)`,
//! and an empty grid results when `min >= max`.

use serde::{Deserialize, Serialize};

use crate::error::MultiDoseError;

/// Ordered, non-negative observation time points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationTimes {
    times: Vec<f64>,
}

impl ObservationTimes {
    /// Build the grid `[min, max)` with step `interval`
    ///
    /// Fails with [`MultiDoseError::InvalidParameter`] when `interval` is not strictly
    /// positive, when any bound is not finite, or when `min` is negative.
    pub fn arange(min: f64, max: f64, interval: f64) -> Result<Self, MultiDoseError> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(MultiDoseError::invalid("interval", interval));
        }
        if !min.is_finite() || min < 0.0 {
            return Err(MultiDoseError::invalid("min", min));
        }
        if !max.is_finite() {
            return Err(MultiDoseError::invalid("max", max));
        }

        let span = (max - min) / interval;
        let n = if span > 0.0 { span.ceil() as usize } else { 0 };
        let times = (0..n).map(|i| min + i as f64 * interval).collect();

        Ok(Self { times })
    }

    /// Use explicit time points; they must be finite, non-negative and ascending
    pub fn from_vec(times: Vec<f64>) -> Result<Self, MultiDoseError> {
        if let Some(bad) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(MultiDoseError::invalid("time", bad));
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(MultiDoseError::invalid(
                "times",
                "sequence is not monotonically increasing",
            ));
        }
        Ok(Self { times })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.times.iter()
    }

    /// First and last time point, if any
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.times.first()?, *self.times.last()?))
    }
}
