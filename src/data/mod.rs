pub mod auc;
pub mod observation;
pub mod parameters;

pub use observation::ObservationTimes;
pub use parameters::{Parameters, PARAMETER_KEYS};
