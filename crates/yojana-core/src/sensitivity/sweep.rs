use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::YojanaError;
use crate::inputs::{CalculationOptions, ProjectInputs};
use crate::metrics;
use crate::projection;
use crate::scheme::SchemeConstants;
use crate::YojanaResult;

/// Points in a synthesized sweep over a continuous parameter.
pub const SWEEP_POINTS: usize = 10;

/// Project input that a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    BidRate,
    Capacity,
    Loan,
    Subsidy,
    RepaymentYears,
}

impl SweepParameter {
    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::BidRate => "bid_rate",
            SweepParameter::Capacity => "capacity_mw",
            SweepParameter::Loan => "loan",
            SweepParameter::Subsidy => "subsidy",
            SweepParameter::RepaymentYears => "repayment_years",
        }
    }

    /// Proportional window (low, high) around a scalar seed.
    fn seed_window(&self) -> (Decimal, Decimal) {
        match self {
            SweepParameter::Loan => (dec!(0.75), dec!(1.25)),
            _ => (dec!(0.5), dec!(1.5)),
        }
    }

    /// Current value of this parameter in `inputs`.
    pub fn value_in(&self, inputs: &ProjectInputs) -> Decimal {
        match self {
            SweepParameter::BidRate => inputs.bid_rate,
            SweepParameter::Capacity => inputs.capacity_mw,
            SweepParameter::Loan => inputs.loan,
            SweepParameter::Subsidy => inputs.subsidy,
            SweepParameter::RepaymentYears => Decimal::from(inputs.repayment_years),
        }
    }
}

/// Sweep range: explicit ascending values, or a seed to build a window around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSpec {
    Values(Vec<Decimal>),
    Seed(Decimal),
}

/// Built-in metrics a sweep can report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMetric {
    #[default]
    AnnualizedReturn,
    PaybackYear,
}

impl SweepMetric {
    pub fn name(&self) -> &'static str {
        match self {
            SweepMetric::AnnualizedReturn => "annualized_return_pct",
            SweepMetric::PaybackYear => "payback_years",
        }
    }
}

/// One evaluated point. Exactly one of `metric_value` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub parameter_value: Decimal,
    pub metric_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SweepPoint {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// `n` evenly spaced values from `low` to `high` inclusive.
fn linspace(low: Decimal, high: Decimal, n: usize) -> Vec<Decimal> {
    if n <= 1 {
        return vec![low];
    }
    let span = high - low;
    let last = Decimal::from(n as u64 - 1);
    (0..n)
        .map(|i| {
            if i == n - 1 {
                high
            } else {
                low + span * Decimal::from(i as u64) / last
            }
        })
        .collect()
}

/// Expand a range specification into the parameter values to evaluate.
pub fn sweep_values(
    parameter: SweepParameter,
    range: &RangeSpec,
    scheme: &SchemeConstants,
) -> YojanaResult<Vec<Decimal>> {
    match range {
        RangeSpec::Values(values) => {
            if values.is_empty() {
                return Err(YojanaError::InvalidInput {
                    field: format!("range:{}", parameter.name()),
                    reason: "Explicit sweep values cannot be empty".into(),
                });
            }
            if values.windows(2).any(|w| w[1] <= w[0]) {
                return Err(YojanaError::InvalidInput {
                    field: format!("range:{}", parameter.name()),
                    reason: "Explicit sweep values must be strictly ascending".into(),
                });
            }
            Ok(values.clone())
        }
        RangeSpec::Seed(seed) => {
            if *seed < Decimal::ZERO {
                return Err(YojanaError::InvalidInput {
                    field: format!("seed:{}", parameter.name()),
                    reason: "Sweep seed cannot be negative".into(),
                });
            }
            let (low_mult, high_mult) = parameter.seed_window();
            if parameter == SweepParameter::RepaymentYears {
                let low = (seed * low_mult).floor().max(Decimal::ONE);
                let horizon_end = Decimal::from(scheme.horizon_years + 1);
                // exclusive upper bound, at least one value
                let high = (seed * high_mult)
                    .floor()
                    .min(horizon_end)
                    .max(low + Decimal::ONE);
                let low = low.to_u32().unwrap_or(1);
                let high = high.to_u32().unwrap_or(low + 1);
                Ok((low..high).map(Decimal::from).collect())
            } else {
                Ok(linspace(seed * low_mult, seed * high_mult, SWEEP_POINTS))
            }
        }
    }
}

/// Copy of `base` with `parameter` replaced by `value`.
pub fn apply_parameter(
    base: &ProjectInputs,
    parameter: SweepParameter,
    value: Decimal,
) -> YojanaResult<ProjectInputs> {
    let mut inputs = base.clone();
    match parameter {
        SweepParameter::BidRate => inputs.bid_rate = value,
        SweepParameter::Capacity => inputs.capacity_mw = value,
        SweepParameter::Loan => inputs.loan = value,
        SweepParameter::Subsidy => inputs.subsidy = value,
        SweepParameter::RepaymentYears => {
            if !value.fract().is_zero() {
                return Err(YojanaError::InvalidInput {
                    field: "repayment_years".into(),
                    reason: format!("Repayment term must be a whole number of years, got {value}"),
                });
            }
            inputs.repayment_years = value.to_u32().ok_or_else(|| YojanaError::InvalidInput {
                field: "repayment_years".into(),
                reason: format!("Repayment term {value} is out of range"),
            })?;
        }
    }
    Ok(inputs)
}

/// Evaluate a built-in metric for one configuration.
pub fn evaluate_metric(
    metric: SweepMetric,
    inputs: &ProjectInputs,
    options: &CalculationOptions,
    scheme: &SchemeConstants,
) -> YojanaResult<Decimal> {
    let flows = projection::project(inputs, options, scheme)?;
    let investment = metrics::investment_cost(
        inputs.capacity_mw,
        inputs.dcr_compliant,
        flows.principal,
        inputs.subsidy,
        scheme,
    )?;
    let net = flows.net(options.basis());
    match metric {
        SweepMetric::AnnualizedReturn => {
            metrics::annualized_return(net.total(), investment.amount, scheme.horizon_years)
        }
        SweepMetric::PaybackYear => metrics::payback_year(net, investment.amount),
    }
}

/// Re-run `metric_fn` at every value of the swept parameter, holding the
/// other inputs at `base_inputs`.
///
/// Failures at a single point are recorded on that point; only an invalid
/// range fails the whole sweep.
pub fn sweep<F>(
    base_inputs: &ProjectInputs,
    parameter: SweepParameter,
    range: &RangeSpec,
    scheme: &SchemeConstants,
    metric_fn: F,
) -> YojanaResult<Vec<SweepPoint>>
where
    F: Fn(&ProjectInputs) -> YojanaResult<Decimal>,
{
    let values = sweep_values(parameter, range, scheme)?;

    let points = values
        .into_iter()
        .map(|value| {
            let outcome = apply_parameter(base_inputs, parameter, value)
                .and_then(|inputs| metric_fn(&inputs));
            match outcome {
                Ok(metric_value) => SweepPoint {
                    parameter_value: value,
                    metric_value: Some(metric_value),
                    error: None,
                },
                Err(e) => SweepPoint {
                    parameter_value: value,
                    metric_value: None,
                    error: Some(format!("{}: {e}", e.kind())),
                },
            }
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ProjectInputs {
        ProjectInputs {
            capacity_mw: dec!(10),
            bid_rate: dec!(3.0),
            loan: dec!(70),
            repayment_years: 10,
            subsidy: Decimal::ZERO,
            dcr_compliant: true,
        }
    }

    #[test]
    fn test_bid_rate_seed_window() {
        let scheme = SchemeConstants::default();
        let vals = sweep_values(SweepParameter::BidRate, &RangeSpec::Seed(dec!(3.0)), &scheme).unwrap();
        assert_eq!(vals.len(), 10);
        assert_eq!(vals[0], dec!(1.5));
        assert_eq!(vals[9], dec!(4.5));
        assert_eq!(vals[3], dec!(2.5));
    }

    #[test]
    fn test_loan_seed_window_is_narrower() {
        let scheme = SchemeConstants::default();
        let vals = sweep_values(SweepParameter::Loan, &RangeSpec::Seed(dec!(80)), &scheme).unwrap();
        assert_eq!(vals.len(), 10);
        assert_eq!(vals[0], dec!(60));
        assert_eq!(vals[9], dec!(100));
    }

    #[test]
    fn test_term_seed_is_integer_steps() {
        let scheme = SchemeConstants::default();
        let vals = sweep_values(
            SweepParameter::RepaymentYears,
            &RangeSpec::Seed(dec!(10)),
            &scheme,
        )
        .unwrap();
        let expected: Vec<Decimal> = (5..15).map(Decimal::from).collect();
        assert_eq!(vals, expected);
    }

    #[test]
    fn test_term_seed_clamped_to_horizon() {
        let scheme = SchemeConstants::default();
        let vals = sweep_values(
            SweepParameter::RepaymentYears,
            &RangeSpec::Seed(dec!(20)),
            &scheme,
        )
        .unwrap();
        assert_eq!(vals.first(), Some(&dec!(10)));
        assert_eq!(vals.last(), Some(&dec!(25)));
    }

    #[test]
    fn test_term_seed_of_one_still_yields_a_point() {
        let scheme = SchemeConstants::default();
        let vals = sweep_values(
            SweepParameter::RepaymentYears,
            &RangeSpec::Seed(dec!(1)),
            &scheme,
        )
        .unwrap();
        assert_eq!(vals, vec![dec!(1)]);
    }

    #[test]
    fn test_explicit_values_must_ascend() {
        let scheme = SchemeConstants::default();
        let bad = RangeSpec::Values(vec![dec!(3), dec!(2)]);
        assert!(sweep_values(SweepParameter::BidRate, &bad, &scheme).is_err());
        let empty = RangeSpec::Values(vec![]);
        assert!(sweep_values(SweepParameter::BidRate, &empty, &scheme).is_err());
    }

    #[test]
    fn test_fractional_term_is_point_error() {
        let scheme = SchemeConstants::default();
        let opts = CalculationOptions::default();
        let range = RangeSpec::Values(vec![dec!(9), dec!(9.5), dec!(10)]);
        let points = sweep(&base(), SweepParameter::RepaymentYears, &range, &scheme, |i| {
            evaluate_metric(SweepMetric::AnnualizedReturn, i, &opts, &scheme)
        })
        .unwrap();
        assert_eq!(points.len(), 3);
        assert!(points[0].is_ok());
        assert!(!points[1].is_ok());
        assert!(points[2].is_ok());
    }

    #[test]
    fn test_unrecovered_point_keeps_annualized_return() {
        // At 1.5/kWh the real return never covers the 99m outlay
        let scheme = SchemeConstants::default();
        let opts = CalculationOptions::default();
        let low = ProjectInputs {
            bid_rate: dec!(1.5),
            ..base()
        };
        let pct = evaluate_metric(SweepMetric::AnnualizedReturn, &low, &opts, &scheme).unwrap();
        assert!(pct < Decimal::ZERO && pct > dec!(-100), "got {pct}");

        let err = evaluate_metric(SweepMetric::PaybackYear, &low, &opts, &scheme).unwrap_err();
        assert_eq!(err.kind(), "never_recouped");
    }

    #[test]
    fn test_sweep_preserves_order() {
        let scheme = SchemeConstants::default();
        let range = RangeSpec::Values(vec![dec!(1), dec!(2), dec!(3)]);
        let points = sweep(&base(), SweepParameter::Capacity, &range, &scheme, |i| {
            Ok(i.capacity_mw * dec!(2))
        })
        .unwrap();
        let got: Vec<_> = points.iter().map(|p| p.metric_value).collect();
        assert_eq!(got, vec![Some(dec!(2)), Some(dec!(4)), Some(dec!(6))]);
    }
}
