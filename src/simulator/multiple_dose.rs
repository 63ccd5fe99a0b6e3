//! Closed-form concentrations for repeated oral doses
//!
//! A regimen of `dose` every `tau` time units is the superposition of `n` single-dose
//! first-order absorption/elimination responses. Because the intervals are uniform the
//! sum collapses into two geometric series, one per rate constant.
//!
//! When `ka` and `kel` coincide the usual amplitude `F·D·ka / (Vd·(ka - kel))` is
//! undefined; the limiting form `F·D·k/Vd · t·e^(-kt)` is used for each dose instead.

use crate::data::Parameters;
use crate::error::MultiDoseError;

/// Relative distance below which `ka` and `kel` are treated as equal
pub const RATE_TOLERANCE: f64 = 1e-9;

#[inline]
fn rates_coincide(ka: f64, kel: f64) -> bool {
    (ka - kel).abs() <= RATE_TOLERANCE * ka.max(kel)
}

/// `1 - e^(-x)`, accurate for small `x`
#[inline]
fn one_minus_exp(x: f64) -> f64 {
    -(-x).exp_m1()
}

/// `(1 - r^n) / (1 - r)` with `r = e^(-k·tau)`
fn geometric_sum(k: f64, tau: f64, n: f64) -> Result<f64, MultiDoseError> {
    let denominator = one_minus_exp(k * tau);
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(MultiDoseError::degenerate(format!(
            "1 - exp(-{k} * {tau}) vanishes; dosing interval too small for rate constant"
        )));
    }
    Ok(one_minus_exp(k * tau * n) / denominator)
}

/// `Σ_{j<n} j·r^j` with `r = e^(-k·tau)`
///
/// Equal to `r·g / (1 - r)²` where `g = (n-1)·(e^(-n·x) - 1) - n·(e^(-(n-1)·x) - 1)` and
/// `x = k·tau`. Writing `g` with `exp_m1` keeps the first-order terms from cancelling;
/// the relative error is still of order `ε / x`, so it grows as `k·tau` shrinks.
fn weighted_geometric_sum(k: f64, tau: f64, n: f64) -> Result<f64, MultiDoseError> {
    let x = k * tau;
    let denominator = one_minus_exp(x);
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(MultiDoseError::degenerate(format!(
            "1 - exp(-{k} * {tau}) vanishes; dosing interval too small for rate constant"
        )));
    }
    if n < 2.0 {
        return Ok(0.0);
    }
    let g = (n - 1.0) * (-n * x).exp_m1() - n * (-(n - 1.0) * x).exp_m1();
    Ok((-x).exp() * g / (denominator * denominator))
}

pub(crate) fn check_dose(dose: f64) -> Result<(), MultiDoseError> {
    if !dose.is_finite() || dose <= 0.0 {
        return Err(MultiDoseError::invalid("dose", dose));
    }
    Ok(())
}

pub(crate) fn check_tau(tau: f64) -> Result<(), MultiDoseError> {
    if !tau.is_finite() || tau <= 0.0 {
        return Err(MultiDoseError::invalid("tau", tau));
    }
    Ok(())
}

fn finite(value: f64, context: &str) -> Result<f64, MultiDoseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MultiDoseError::degenerate(format!(
            "{context} evaluated to {value}"
        )))
    }
}

/// Concentration `t` time units after a single dose
///
/// Classical Bateman function `A·(e^(-kel·t) - e^(-ka·t))`, or `F·D·k/Vd · t·e^(-kt)`
/// when the rate constants coincide. Negative times give zero.
pub fn single_dose_concentration(params: &Parameters, dose: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let (f, ka, kel, vd) = (params.f(), params.ka(), params.kel(), params.vd());
    if rates_coincide(ka, kel) {
        f * dose * kel / vd * t * (-kel * t).exp()
    } else {
        f * dose * ka / (vd * (ka - kel)) * ((-kel * t).exp() - (-ka * t).exp())
    }
}

/// Concentration at time `t` for `dose` given every `tau`, the first dose at `t = 0`
///
/// `n = ceil(t / tau)` doses have been given by `t`, the latest `tsld = t - (n-1)·tau`
/// time units ago.
///
/// # Errors
///
/// - [`MultiDoseError::InvalidParameter`] for non-positive `dose`/`tau` or negative `t`
/// - [`MultiDoseError::NumericDegeneracy`] when a geometric denominator vanishes or the
///   result is not finite
pub fn multiple_dose_concentration(
    params: &Parameters,
    dose: f64,
    t: f64,
    tau: f64,
) -> Result<f64, MultiDoseError> {
    check_dose(dose)?;
    check_tau(tau)?;
    if !t.is_finite() || t < 0.0 {
        return Err(MultiDoseError::invalid("t", t));
    }

    let (f, ka, kel, vd) = (params.f(), params.ka(), params.kel(), params.vd());
    let n = (t / tau).ceil();
    let tsld = t - (n - 1.0) * tau;

    let conc = if rates_coincide(ka, kel) {
        tracing::trace!(ka, kel, "rate constants coincide, using limiting form");
        let s = geometric_sum(kel, tau, n)?;
        let weighted = weighted_geometric_sum(kel, tau, n)?;
        f * dose * kel / vd * (-kel * tsld).exp() * (tsld * s + tau * weighted)
    } else {
        let amplitude = f * dose * ka / (vd * (ka - kel));
        let elimination = geometric_sum(kel, tau, n)? * (-kel * tsld).exp();
        let absorption = geometric_sum(ka, tau, n)? * (-ka * tsld).exp();
        amplitude * (elimination - absorption)
    };

    finite(conc, "concentration")
}

/// Steady-state concentration `tsld` time units after a dose (`n → ∞`)
///
/// `tsld` must lie in `[0, tau]`.
pub fn steady_state_concentration(
    params: &Parameters,
    dose: f64,
    tsld: f64,
    tau: f64,
) -> Result<f64, MultiDoseError> {
    check_dose(dose)?;
    check_tau(tau)?;
    if !tsld.is_finite() || tsld < 0.0 || tsld > tau {
        return Err(MultiDoseError::invalid("tsld", tsld));
    }

    let (f, ka, kel, vd) = (params.f(), params.ka(), params.kel(), params.vd());
    let accumulation = |k: f64| -> Result<f64, MultiDoseError> {
        let denominator = one_minus_exp(k * tau);
        if denominator == 0.0 {
            return Err(MultiDoseError::degenerate(format!(
                "1 - exp(-{k} * {tau}) vanishes; dosing interval too small for rate constant"
            )));
        }
        Ok(1.0 / denominator)
    };

    let conc = if rates_coincide(ka, kel) {
        let r = (-kel * tau).exp();
        let s = accumulation(kel)?;
        f * dose * kel / vd * (-kel * tsld).exp() * (tsld * s + tau * r * s * s)
    } else {
        let amplitude = f * dose * ka / (vd * (ka - kel));
        amplitude
            * (accumulation(kel)? * (-kel * tsld).exp() - accumulation(ka)? * (-ka * tsld).exp())
    };

    finite(conc, "steady-state concentration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(ka: f64, kel: f64) -> Parameters {
        Parameters::new(1.0, ka, kel, 50.0, 2.0, 10.0).unwrap()
    }

    /// Explicit superposition of single-dose responses
    fn superposed(p: &Parameters, dose: f64, t: f64, tau: f64) -> f64 {
        let n = (t / tau).ceil() as usize;
        (0..n)
            .map(|i| single_dose_concentration(p, dose, t - i as f64 * tau))
            .sum()
    }

    #[test]
    fn test_zero_at_time_zero() {
        let p = params(1.5, 0.1);
        assert_eq!(multiple_dose_concentration(&p, 500.0, 0.0, 12.0).unwrap(), 0.0);
    }

    #[test]
    fn test_reduces_to_single_dose_within_first_interval() {
        let p = params(1.5, 0.1);
        let amplitude = 500.0 * 1.5 / (50.0 * (1.5 - 0.1));
        for t in [0.5_f64, 1.0, 3.0, 12.0, 47.0] {
            let expected = amplitude * ((-0.1 * t).exp() - (-1.5 * t).exp());
            let got = multiple_dose_concentration(&p, 500.0, t, 48.0).unwrap();
            assert_relative_eq!(got, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_matches_explicit_superposition() {
        let p = params(1.5, 0.1);
        for t in [1.0, 12.0, 13.0, 25.5, 47.0, 100.0] {
            let closed = multiple_dose_concentration(&p, 500.0, t, 12.0).unwrap();
            assert_relative_eq!(closed, superposed(&p, 500.0, t, 12.0), max_relative = 1e-10);
        }
    }

    #[test]
    fn test_equal_rates_use_limit() {
        let p = params(0.2, 0.2);
        for t in [0.5, 6.0, 8.0, 9.0, 30.0] {
            let closed = multiple_dose_concentration(&p, 100.0, t, 8.0).unwrap();
            assert!(closed.is_finite());
            assert_relative_eq!(closed, superposed(&p, 100.0, t, 8.0), max_relative = 1e-10);
        }
    }

    #[test]
    fn test_equal_rates_with_short_interval() {
        let p = params(0.2, 0.2);
        let tau = 1e-5;
        for doses in [500.5, 1000.25, 20000.75] {
            let t = doses * tau;
            let closed = multiple_dose_concentration(&p, 100.0, t, tau).unwrap();
            assert_relative_eq!(closed, superposed(&p, 100.0, t, tau), max_relative = 1e-8);
        }
    }

    #[test]
    fn test_weighted_sum_small_counts() {
        assert_eq!(weighted_geometric_sum(0.2, 8.0, 0.0).unwrap(), 0.0);
        assert_eq!(weighted_geometric_sum(0.2, 8.0, 1.0).unwrap(), 0.0);
        let r = (-1.6f64).exp();
        assert_relative_eq!(weighted_geometric_sum(0.2, 8.0, 2.0).unwrap(), r, max_relative = 1e-14);
        assert_relative_eq!(
            weighted_geometric_sum(0.2, 8.0, 3.0).unwrap(),
            r + 2.0 * r * r,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_limit_is_continuous() {
        let exact = params(0.2, 0.2);
        let near = params(0.2 * (1.0 + 1e-6), 0.2);
        for t in [2.0, 10.0, 17.0] {
            let a = multiple_dose_concentration(&exact, 100.0, t, 8.0).unwrap();
            let b = multiple_dose_concentration(&near, 100.0, t, 8.0).unwrap();
            assert_relative_eq!(a, b, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let p = params(1.5, 0.1);
        assert!(matches!(
            multiple_dose_concentration(&p, 0.0, 1.0, 12.0),
            Err(MultiDoseError::InvalidParameter { .. })
        ));
        assert!(matches!(
            multiple_dose_concentration(&p, 500.0, 1.0, 0.0),
            Err(MultiDoseError::InvalidParameter { .. })
        ));
        assert!(matches!(
            multiple_dose_concentration(&p, 500.0, -1.0, 12.0),
            Err(MultiDoseError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_vanishing_interval_is_degenerate() {
        let p = params(1.5, 0.1);
        assert!(matches!(
            multiple_dose_concentration(&p, 500.0, 1.0, 1e-323),
            Err(MultiDoseError::NumericDegeneracy { .. })
        ));
    }

    #[test]
    fn test_troughs_accumulate_to_steady_state() {
        let p = params(1.5, 0.1);
        let ss_trough = steady_state_concentration(&p, 500.0, 12.0, 12.0).unwrap();

        let mut previous = 0.0;
        for k in 1..=30 {
            let trough = multiple_dose_concentration(&p, 500.0, 12.0 * k as f64, 12.0).unwrap();
            assert!(trough > previous, "trough {} did not increase", k);
            assert!(trough <= ss_trough * (1.0 + 1e-12));
            previous = trough;
        }
        assert_relative_eq!(previous, ss_trough, max_relative = 1e-6);
    }

    #[test]
    fn test_steady_state_with_equal_rates() {
        let p = params(0.2, 0.2);
        let ss = steady_state_concentration(&p, 100.0, 4.0, 8.0).unwrap();
        let late = multiple_dose_concentration(&p, 100.0, 8.0 * 200.0 + 4.0, 8.0).unwrap();
        assert_relative_eq!(ss, late, max_relative = 1e-8);
    }

    #[test]
    fn test_steady_state_rejects_tsld_outside_interval() {
        let p = params(1.5, 0.1);
        assert!(steady_state_concentration(&p, 500.0, 13.0, 12.0).is_err());
    }
}
