//! Patient and drug parameters for the one-compartment oral model
//!
//! [`Parameters`] is fixed for the lifetime of an engine. It can be built from
//! explicit values, from a parameter mapping keyed by the conventional symbols
//! (`F`, `ka`, `kel`, `Vd`, `min_eff`, `max_eff`), or from JSON using the same keys.
//!
//! ```rust
//! use multidose::data::Parameters;
//!
//! let params = Parameters::new(1.0, 1.5, 0.1, 50.0, 2.0, 10.0).unwrap();
//! assert_eq!(params.vd(), 50.0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::MultiDoseError;

/// Keys expected in a parameter mapping, in constructor order
pub const PARAMETER_KEYS: [&str; 6] = ["F", "ka", "kel", "Vd", "min_eff", "max_eff"];

/// Bioavailability, rate constants, volume and efficacy bounds
///
/// Deserialization runs the same validation as [`Parameters::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct Parameters {
    /// Absolute bioavailability fraction
    #[serde(rename = "F")]
    f: f64,
    /// Absorption rate constant
    ka: f64,
    /// Elimination rate constant
    kel: f64,
    /// Apparent volume of distribution
    #[serde(rename = "Vd")]
    vd: f64,
    /// Lower bound of the efficacy window (inclusive)
    min_eff: f64,
    /// Upper bound of the efficacy window (inclusive)
    max_eff: f64,
}

/// Unvalidated wire form of [`Parameters`]
#[derive(Deserialize)]
struct RawParameters {
    #[serde(rename = "F")]
    f: f64,
    ka: f64,
    kel: f64,
    #[serde(rename = "Vd")]
    vd: f64,
    min_eff: f64,
    max_eff: f64,
}

impl TryFrom<RawParameters> for Parameters {
    type Error = MultiDoseError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(raw.f, raw.ka, raw.kel, raw.vd, raw.min_eff, raw.max_eff)
    }
}

impl Parameters {
    /// Create a validated parameter set
    ///
    /// All values must be finite, `f`, `ka`, `kel` and `vd` strictly positive, and
    /// `min_eff <= max_eff`. `ka == kel` is allowed.
    pub fn new(
        f: f64,
        ka: f64,
        kel: f64,
        vd: f64,
        min_eff: f64,
        max_eff: f64,
    ) -> Result<Self, MultiDoseError> {
        let params = Self {
            f,
            ka,
            kel,
            vd,
            min_eff,
            max_eff,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build from a mapping of symbol to value; every key in [`PARAMETER_KEYS`] is required
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, MultiDoseError> {
        let get = |key: &str| {
            map.get(key)
                .copied()
                .ok_or_else(|| MultiDoseError::MissingParameter(key.to_string()))
        };

        Self::new(
            get("F")?,
            get("ka")?,
            get("kel")?,
            get("Vd")?,
            get("min_eff")?,
            get("max_eff")?,
        )
    }

    /// Parse a JSON object with the same keys as [`Parameters::from_map`]
    pub fn from_json(json: &str) -> Result<Self, MultiDoseError> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<(), MultiDoseError> {
        let positive = [("F", self.f), ("ka", self.ka), ("kel", self.kel), ("Vd", self.vd)];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(MultiDoseError::invalid(name, value));
            }
        }

        for (name, value) in [("min_eff", self.min_eff), ("max_eff", self.max_eff)] {
            if !value.is_finite() {
                return Err(MultiDoseError::invalid(name, value));
            }
        }

        if self.min_eff > self.max_eff {
            return Err(MultiDoseError::invalid(
                "min_eff",
                format!("{} (greater than max_eff {})", self.min_eff, self.max_eff),
            ));
        }

        Ok(())
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    pub fn ka(&self) -> f64 {
        self.ka
    }

    pub fn kel(&self) -> f64 {
        self.kel
    }

    pub fn vd(&self) -> f64 {
        self.vd
    }

    pub fn min_eff(&self) -> f64 {
        self.min_eff
    }

    pub fn max_eff(&self) -> f64 {
        self.max_eff
    }

    /// The mapping form of these parameters, keyed as in [`PARAMETER_KEYS`]
    pub fn to_map(&self) -> HashMap<String, f64> {
        PARAMETER_KEYS
            .iter()
            .zip([self.f, self.ka, self.kel, self.vd, self.min_eff, self.max_eff])
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> HashMap<String, f64> {
        HashMap::from([
            ("F".to_string(), 1.0),
            ("ka".to_string(), 1.5),
            ("kel".to_string(), 0.1),
            ("Vd".to_string(), 50.0),
            ("min_eff".to_string(), 2.0),
            ("max_eff".to_string(), 10.0),
        ])
    }

    #[test]
    fn test_from_map() {
        let params = Parameters::from_map(&mapping()).unwrap();
        assert_eq!(params.f(), 1.0);
        assert_eq!(params.ka(), 1.5);
        assert_eq!(params.kel(), 0.1);
        assert_eq!(params.vd(), 50.0);
        assert_eq!(params.min_eff(), 2.0);
        assert_eq!(params.max_eff(), 10.0);
        assert_eq!(params.to_map(), mapping());
    }

    #[test]
    fn test_missing_key() {
        let mut map = mapping();
        map.remove("Vd");
        match Parameters::from_map(&map) {
            Err(MultiDoseError::MissingParameter(key)) => assert_eq!(key, "Vd"),
            other => panic!("expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        assert!(Parameters::new(1.0, 0.0, 0.1, 50.0, 2.0, 10.0).is_err());
        assert!(Parameters::new(1.0, 1.5, -0.1, 50.0, 2.0, 10.0).is_err());
        assert!(Parameters::new(1.0, 1.5, 0.1, f64::NAN, 2.0, 10.0).is_err());
    }

    #[test]
    fn test_rejects_inverted_window() {
        assert!(matches!(
            Parameters::new(1.0, 1.5, 0.1, 50.0, 10.0, 2.0),
            Err(MultiDoseError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_equal_rate_constants_allowed() {
        assert!(Parameters::new(1.0, 0.2, 0.2, 50.0, 2.0, 10.0).is_ok());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"F": 0.8, "ka": 1.2, "kel": 0.15, "Vd": 40.0, "min_eff": 1.0, "max_eff": 5.0}"#;
        let params = Parameters::from_json(json).unwrap();
        assert_eq!(params.f(), 0.8);
        assert_eq!(params.vd(), 40.0);

        let bad = r#"{"F": 0.8, "ka": 1.2, "kel": 0.0, "Vd": 40.0, "min_eff": 1.0, "max_eff": 5.0}"#;
        assert!(Parameters::from_json(bad).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        for bad in [
            r#"{"F": 1.0, "ka": 0.0, "kel": 0.1, "Vd": 50.0, "min_eff": 2.0, "max_eff": 10.0}"#,
            r#"{"F": -1.0, "ka": 1.5, "kel": 0.1, "Vd": 50.0, "min_eff": 2.0, "max_eff": 10.0}"#,
            r#"{"F": 1.0, "ka": 1.5, "kel": 0.1, "Vd": 50.0, "min_eff": 9.0, "max_eff": 1.0}"#,
        ] {
            assert!(serde_json::from_str::<Parameters>(bad).is_err(), "accepted {}", bad);
        }

        let params = Parameters::new(1.0, 1.5, 0.1, 50.0, 2.0, 10.0).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(serde_json::from_str::<Parameters>(&json).unwrap(), params);
    }
}
