//! Closed-form multiple-dose pharmacokinetics
//!
//! `multidose` computes concentration-time profiles of repeated oral doses for a
//! one-compartment model with first-order absorption and elimination, and reports
//! how much of each profile falls inside a therapeutic efficacy window.
//!
//! ```rust
//! use multidose::prelude::*;
//!
//! let params = Parameters::new(1.0, 1.5, 0.1, 50.0, 2.0, 10.0)?;
//! let mut engine = MultipleDosing::new(params);
//! engine.set_observation_times(0.0, 48.0, 1.0)?;
//!
//! let profile = engine.add_regimen(500.0, 12.0)?;
//! assert_eq!(profile.conc().len(), 48);
//! assert!((0.0..=1.0).contains(&profile.f_win()));
//! # Ok::<(), MultiDoseError>(())
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod profile;
pub mod simulator;

pub use error::MultiDoseError;

pub mod prelude {
    pub use crate::data::{ObservationTimes, Parameters};
    pub use crate::error::MultiDoseError;
    pub use crate::output::{legend_label, write_profiles_csv, write_summary_csv, CsvOptions};
    pub use crate::profile::{DosingProfile, EfficacyWindow, Session};
    pub use crate::simulator::{
        multiple_dose_concentration, single_dose_concentration, steady_state_concentration,
        MultipleDosing,
    };

    #[cfg(feature = "plot")]
    pub use crate::output::plot::{plot_engine, plot_session, PlotConfig};
}
