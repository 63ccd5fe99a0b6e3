//! Multiple-dose profile engine
//!
//! [`MultipleDosing`] holds fixed [`Parameters`], the observation grid shared by every
//! regimen, and a [`Session`] of simulated profiles.
//!
//! ```rust
//! use multidose::prelude::*;
//!
//! let params = Parameters::new(1.0, 1.5, 0.1, 50.0, 2.0, 10.0)?;
//! let mut engine = MultipleDosing::new(params);
//! engine.set_observation_times(0.0, 48.0, 1.0)?;
//!
//! engine.add_regimen(500.0, 12.0)?;
//! engine.add_regimen(250.0, 6.0)?;
//!
//! for profile in engine.profiles() {
//!     println!("dose={} tau={} f_win={}", profile.dose(), profile.tau(), profile.f_win());
//! }
//! # Ok::<(), multidose::MultiDoseError>(())
//! ```

pub mod multiple_dose;

pub use multiple_dose::{
    multiple_dose_concentration, single_dose_concentration, steady_state_concentration,
};

use crate::data::{ObservationTimes, Parameters};
use crate::error::MultiDoseError;
use crate::profile::{DosingProfile, EfficacyWindow, Session};
use multiple_dose::{check_dose, check_tau};

/// Engine computing dosing profiles for one set of patient/drug parameters
#[derive(Debug, Clone)]
pub struct MultipleDosing {
    params: Parameters,
    window: EfficacyWindow,
    tobs: Option<ObservationTimes>,
    session: Session,
}

impl MultipleDosing {
    pub fn new(params: Parameters) -> Self {
        Self {
            window: EfficacyWindow::from(&params),
            params,
            tobs: None,
            session: Session::new(),
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn efficacy_window(&self) -> EfficacyWindow {
        self.window
    }

    /// Replace the observation grid with `[min, max)` stepped by `interval`
    ///
    /// Profiles already in the session keep the grid they were simulated on.
    pub fn set_observation_times(
        &mut self,
        min: f64,
        max: f64,
        interval: f64,
    ) -> Result<(), MultiDoseError> {
        let tobs = ObservationTimes::arange(min, max, interval)?;
        if tobs.is_empty() {
            tracing::warn!(min, max, interval, "observation grid is empty");
        }
        self.tobs = Some(tobs);
        Ok(())
    }

    /// Use an explicit observation grid
    pub fn set_observation_grid(&mut self, tobs: ObservationTimes) {
        self.tobs = Some(tobs);
    }

    pub fn observation_times(&self) -> Option<&ObservationTimes> {
        self.tobs.as_ref()
    }

    /// Concentration at time `t` for `dose` every `tau`
    pub fn concentration_at(&self, dose: f64, t: f64, tau: f64) -> Result<f64, MultiDoseError> {
        multiple_dose_concentration(&self.params, dose, t, tau)
    }

    /// Steady-state concentration `tsld` time units after a dose
    pub fn steady_state_at(&self, dose: f64, tsld: f64, tau: f64) -> Result<f64, MultiDoseError> {
        steady_state_concentration(&self.params, dose, tsld, tau)
    }

    /// Simulate a regimen over the observation grid without touching the session
    ///
    /// # Errors
    ///
    /// - [`MultiDoseError::ObservationTimesNotSet`] before [`MultipleDosing::set_observation_times`]
    /// - [`MultiDoseError::InvalidParameter`] for non-positive `dose` or `tau`
    /// - [`MultiDoseError::EmptyCollection`] when the grid is empty
    pub fn run_regimen(&self, dose: f64, tau: f64) -> Result<DosingProfile, MultiDoseError> {
        let tobs = self
            .tobs
            .as_ref()
            .ok_or(MultiDoseError::ObservationTimesNotSet)?;
        check_dose(dose)?;
        check_tau(tau)?;

        let conc = tobs
            .iter()
            .map(|&t| self.concentration_at(dose, t, tau))
            .collect::<Result<Vec<f64>, _>>()?;

        let f_win = self.efficacy_window_fraction(&conc)?;
        if f_win == 0.0 {
            tracing::warn!(dose, tau, "profile never enters the efficacy window");
        }
        tracing::debug!(dose, tau, f_win, points = conc.len(), "simulated regimen");

        Ok(DosingProfile::new(
            dose,
            tau,
            tobs.as_slice().to_vec(),
            conc,
            f_win,
        ))
    }

    /// Simulate a regimen and append it to the session
    pub fn add_regimen(&mut self, dose: f64, tau: f64) -> Result<&DosingProfile, MultiDoseError> {
        let profile = self.run_regimen(dose, tau)?;
        Ok(self.session.push(profile))
    }

    /// Fraction of `concentrations` inside `[min_eff, max_eff]`, rounded to two decimals
    pub fn efficacy_window_fraction(&self, concentrations: &[f64]) -> Result<f64, MultiDoseError> {
        self.window.fraction(concentrations)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn profiles(&self) -> &[DosingProfile] {
        self.session.profiles()
    }

    pub fn clear_session(&mut self) {
        self.session.clear();
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
