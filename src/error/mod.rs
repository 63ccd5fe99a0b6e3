use thiserror::Error;

/// Errors produced by the multiple-dose engine and its exporters
#[derive(Error, Debug)]
pub enum MultiDoseError {
    /// A regimen was simulated before the observation grid was set
    #[error("observation times not set")]
    ObservationTimesNotSet,

    /// An operation that needs data was given none
    #[error("Empty collection: no data to compute {what}")]
    EmptyCollection { what: &'static str },

    /// The closed-form solution is undefined for the given inputs
    #[error("Numeric degeneracy: {reason}")]
    NumericDegeneracy { reason: String },

    /// Invalid parameter value
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },

    /// A required key was absent from a parameter mapping
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure inside the plotting backend
    #[error("Plot error: {0}")]
    Plot(String),
}

impl MultiDoseError {
    pub(crate) fn invalid(param: &str, value: impl ToString) -> Self {
        MultiDoseError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        MultiDoseError::NumericDegeneracy {
            reason: reason.into(),
        }
    }
}
