//! Export and rendering of a [`Session`]
//!
//! - [`write_profiles_csv`]: long format, one row per observation point per profile
//! - [`write_summary_csv`]: one row per profile with `f_win` and summary metrics
//! - [`plot`] (feature `plot`): efficacy band plus one curve per profile
//!
//! JSON is available directly through [`Session::to_json`].

#[cfg(feature = "plot")]
pub mod plot;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::error::MultiDoseError;
use crate::profile::{DosingProfile, Session};

/// Legend text for a profile: `dose=<D>, tau=<τ>, p_win=<pct>%`
pub fn legend_label(profile: &DosingProfile) -> String {
    format!(
        "dose={}, tau={}, p_win={:.1}%",
        profile.dose(),
        profile.tau(),
        profile.p_win()
    )
}

/// CSV writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
    /// Write a header row (default: true)
    pub headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            headers: true,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    fn writer<W: Write>(&self, writer: W) -> csv::Writer<W> {
        WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.headers)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer)
    }
}

#[derive(Serialize)]
struct ProfileRow {
    dose: f64,
    tau: f64,
    time: f64,
    conc: f64,
}

#[derive(Serialize)]
struct SummaryRow {
    dose: f64,
    tau: f64,
    f_win: f64,
    cmax: Option<f64>,
    tmax: Option<f64>,
    cmin: Option<f64>,
    auc: f64,
}

/// Write every profile point as `dose,tau,time,conc`
pub fn write_profiles_csv<W: Write>(
    session: &Session,
    writer: W,
    options: &CsvOptions,
) -> Result<(), MultiDoseError> {
    session.require_profiles("profile export")?;
    let mut writer = options.writer(writer);

    for profile in session {
        for (time, conc) in profile.points() {
            writer.serialize(ProfileRow {
                dose: profile.dose(),
                tau: profile.tau(),
                time,
                conc,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write one `dose,tau,f_win,cmax,tmax,cmin,auc` row per profile
pub fn write_summary_csv<W: Write>(
    session: &Session,
    writer: W,
    options: &CsvOptions,
) -> Result<(), MultiDoseError> {
    session.require_profiles("summary export")?;
    let mut writer = options.writer(writer);

    for profile in session {
        writer.serialize(SummaryRow {
            dose: profile.dose(),
            tau: profile.tau(),
            f_win: profile.f_win(),
            cmax: profile.cmax(),
            tmax: profile.tmax(),
            cmin: profile.cmin(),
            auc: profile.auc()?,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the long-format profile table to `path`
pub fn save_profiles_csv(
    session: &Session,
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> Result<(), MultiDoseError> {
    let file = File::create(path)?;
    write_profiles_csv(session, file, options)
}
