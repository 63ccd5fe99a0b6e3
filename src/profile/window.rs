use serde::{Deserialize, Serialize};

use crate::data::Parameters;
use crate::error::MultiDoseError;

/// Closed concentration interval `[min, max]` considered therapeutically effective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficacyWindow {
    pub min: f64,
    pub max: f64,
}

impl EfficacyWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `concentration` lies inside the window, both bounds inclusive
    #[inline]
    pub fn contains(&self, concentration: f64) -> bool {
        self.min <= concentration && concentration <= self.max
    }

    /// Fraction of points inside the window, rounded to two decimals
    ///
    /// # Errors
    ///
    /// [`MultiDoseError::EmptyCollection`] when `concentrations` is empty.
    pub fn fraction(&self, concentrations: &[f64]) -> Result<f64, MultiDoseError> {
        if concentrations.is_empty() {
            return Err(MultiDoseError::EmptyCollection {
                what: "efficacy window fraction",
            });
        }
        let inside = concentrations.iter().filter(|&&c| self.contains(c)).count();
        Ok(round_to(inside as f64 / concentrations.len() as f64, 2))
    }
}

impl From<&Parameters> for EfficacyWindow {
    fn from(params: &Parameters) -> Self {
        Self::new(params.min_eff(), params.max_eff())
    }
}

/// Round to `decimals` places, exact ties going to the even neighbour
///
/// The decision is made on the exact binary value: `0.075` is stored slightly
/// below the midpoint and rounds down to `0.07` even though `0.075 * 100.0`
/// evaluates to exactly `7.5`.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    // exact error of the product above
    let residual = value.mul_add(scale, -scaled);
    let rounded = if scaled - scaled.floor() == 0.5 && residual != 0.0 {
        if residual > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    rounded / scale
}
