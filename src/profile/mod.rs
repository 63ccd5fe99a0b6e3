//! Simulated dosing profiles and the session that collects them
//!
//! A [`DosingProfile`] is the outcome of one regimen: the dose, the dosing interval,
//! the observation times used, the concentrations at those times and the fraction of
//! points inside the efficacy window. Profiles are immutable once created.
//!
//! A [`Session`] keeps profiles in insertion order, which is also the order used for
//! plotting and export. It starts empty.

mod window;

pub use window::EfficacyWindow;
pub(crate) use window::round_to;

use serde::{Deserialize, Serialize};

use crate::data::auc::auc_linear;
use crate::error::MultiDoseError;

/// Concentration-time profile of one dose/interval regimen
///
/// Deserialization rejects profiles that simulation could not have produced:
/// non-positive `dose`/`tau`, misaligned `tobs`/`conc`, or `f_win` outside `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile")]
pub struct DosingProfile {
    dose: f64,
    tau: f64,
    tobs: Vec<f64>,
    conc: Vec<f64>,
    f_win: f64,
}

#[derive(Deserialize)]
struct RawProfile {
    dose: f64,
    tau: f64,
    tobs: Vec<f64>,
    conc: Vec<f64>,
    f_win: f64,
}

impl TryFrom<RawProfile> for DosingProfile {
    type Error = MultiDoseError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        for (name, value) in [("dose", raw.dose), ("tau", raw.tau)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MultiDoseError::invalid(name, value));
            }
        }
        if raw.tobs.len() != raw.conc.len() {
            return Err(MultiDoseError::invalid(
                "conc",
                format!("{} values for {} observation times", raw.conc.len(), raw.tobs.len()),
            ));
        }
        if !(0.0..=1.0).contains(&raw.f_win) {
            return Err(MultiDoseError::invalid("f_win", raw.f_win));
        }
        Ok(Self::new(raw.dose, raw.tau, raw.tobs, raw.conc, raw.f_win))
    }
}

impl DosingProfile {
    pub(crate) fn new(dose: f64, tau: f64, tobs: Vec<f64>, conc: Vec<f64>, f_win: f64) -> Self {
        debug_assert_eq!(tobs.len(), conc.len());
        Self {
            dose,
            tau,
            tobs,
            conc,
            f_win,
        }
    }

    pub fn dose(&self) -> f64 {
        self.dose
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Observation times, positionally aligned with [`DosingProfile::conc`]
    pub fn tobs(&self) -> &[f64] {
        &self.tobs
    }

    pub fn conc(&self) -> &[f64] {
        &self.conc
    }

    /// Fraction of observation points inside the efficacy window
    pub fn f_win(&self) -> f64 {
        self.f_win
    }

    /// `f_win` as a percentage with one decimal
    pub fn p_win(&self) -> f64 {
        round_to(self.f_win * 100.0, 1)
    }

    /// `(time, concentration)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.tobs.iter().copied().zip(self.conc.iter().copied())
    }

    /// Maximum concentration and its time
    fn peak(&self) -> Option<(f64, f64)> {
        self.points()
            .fold(None, |best: Option<(f64, f64)>, (t, c)| match best {
                Some((_, cb)) if cb >= c => best,
                _ => Some((t, c)),
            })
    }

    pub fn cmax(&self) -> Option<f64> {
        self.peak().map(|(_, c)| c)
    }

    pub fn tmax(&self) -> Option<f64> {
        self.peak().map(|(t, _)| t)
    }

    pub fn cmin(&self) -> Option<f64> {
        self.conc.iter().copied().reduce(f64::min)
    }

    /// Linear trapezoidal AUC over the observation grid
    pub fn auc(&self) -> Result<f64, MultiDoseError> {
        auc_linear(&self.tobs, &self.conc)
    }
}

/// Ordered collection of the profiles simulated in one analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    profiles: Vec<DosingProfile>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a profile and return a reference to it
    pub fn push(&mut self, profile: DosingProfile) -> &DosingProfile {
        self.profiles.push(profile);
        &self.profiles[self.profiles.len() - 1]
    }

    pub fn profiles(&self) -> &[DosingProfile] {
        &self.profiles
    }

    pub fn get(&self, index: usize) -> Option<&DosingProfile> {
        self.profiles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DosingProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.profiles.clear();
    }

    /// Fail with [`MultiDoseError::EmptyCollection`] if no profile has been added
    pub(crate) fn require_profiles(&self, what: &'static str) -> Result<(), MultiDoseError> {
        if self.is_empty() {
            Err(MultiDoseError::EmptyCollection { what })
        } else {
            Ok(())
        }
    }

    /// Serialize as a JSON array of profiles
    pub fn to_json(&self) -> Result<String, MultiDoseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MultiDoseError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<'a> IntoIterator for &'a Session {
    type Item = &'a DosingProfile;
    type IntoIter = std::slice::Iter<'a, DosingProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}
