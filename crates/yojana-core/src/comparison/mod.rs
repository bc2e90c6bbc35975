use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::inputs::{CalculationOptions, ProjectInputs};
use crate::metrics::{self, InvestmentCost, ReturnMetrics};
use crate::scheme::SchemeConstants;
use crate::types::*;
use crate::YojanaResult;

/// What a side-by-side comparison varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonAxis {
    /// Domestic-content compliant vs non-compliant cost track
    ProgramTrack,
    /// Nominal vs inflation-adjusted cash flows
    ReturnBasis,
}

/// Input for a two-case comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub inputs: ProjectInputs,
    #[serde(default)]
    pub options: CalculationOptions,
    pub axis: ComparisonAxis,
}

/// One side of a comparison. A failed side carries its error instead of metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonCase {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment: Option<InvestmentCost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ReturnMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output of a two-case comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub axis: ComparisonAxis,
    pub cases: Vec<ComparisonCase>,
}

fn evaluate_case(
    label: &str,
    inputs: &ProjectInputs,
    options: &CalculationOptions,
    scheme: &SchemeConstants,
    warnings: &mut Vec<String>,
) -> ComparisonCase {
    // Outlay is reported even when the return metrics are undefined
    let investment = metrics::project_investment(inputs, scheme).ok();
    if let Some(w) = investment.as_ref().and_then(InvestmentCost::warning) {
        warnings.push(format!("{label}: {w}"));
    }
    match metrics::return_metrics(inputs, options, scheme) {
        Ok((m, _)) => {
            if let Some(w) = m.warning() {
                warnings.push(format!("{label}: {w}"));
            }
            ComparisonCase {
                label: label.to_string(),
                investment,
                metrics: Some(m),
                error: None,
            }
        }
        Err(e) => {
            warnings.push(format!("{label}: {e}"));
            ComparisonCase {
                label: label.to_string(),
                investment,
                metrics: None,
                error: Some(format!("{}: {e}", e.kind())),
            }
        }
    }
}

/// Evaluate the project under both program tracks.
pub fn compare_tracks(
    inputs: &ProjectInputs,
    options: &CalculationOptions,
    scheme: &SchemeConstants,
    warnings: &mut Vec<String>,
) -> Vec<ComparisonCase> {
    [("dcr", true), ("non_dcr", false)]
        .into_iter()
        .map(|(label, dcr_compliant)| {
            let case_inputs = ProjectInputs {
                dcr_compliant,
                ..inputs.clone()
            };
            evaluate_case(label, &case_inputs, options, scheme, warnings)
        })
        .collect()
}

/// Evaluate the project on nominal and on real cash flows.
pub fn compare_bases(
    inputs: &ProjectInputs,
    options: &CalculationOptions,
    scheme: &SchemeConstants,
    warnings: &mut Vec<String>,
) -> Vec<ComparisonCase> {
    [("nominal", false), ("real", true)]
        .into_iter()
        .map(|(label, realized)| {
            let case_options = CalculationOptions {
                realized,
                ..options.clone()
            };
            evaluate_case(label, inputs, &case_options, scheme, warnings)
        })
        .collect()
}

/// Side-by-side metrics along one comparison axis.
pub fn compare_scenarios(
    input: &ComparisonInput,
    scheme: &SchemeConstants,
) -> YojanaResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    scheme.validate()?;
    input.inputs.validate(scheme)?;

    let cases = match input.axis {
        ComparisonAxis::ProgramTrack => {
            compare_tracks(&input.inputs, &input.options, scheme, &mut warnings)
        }
        ComparisonAxis::ReturnBasis => {
            compare_bases(&input.inputs, &input.options, scheme, &mut warnings)
        }
    };

    let output = ComparisonOutput {
        axis: input.axis,
        cases,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario Comparison",
        &serde_json::json!({
            "axis": input.axis,
            "inputs": input.inputs,
            "options": input.options,
            "inflation_rate": scheme.inflation_rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn reference() -> ProjectInputs {
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
    fn test_non_dcr_is_cheaper() {
        let input = ComparisonInput {
            inputs: reference(),
            options: CalculationOptions::default(),
            axis: ComparisonAxis::ProgramTrack,
        };
        let out = compare_scenarios(&input, &SchemeConstants::default()).unwrap();
        let cases = &out.result.cases;
        assert_eq!(cases.len(), 2);
        let dcr = cases[0].investment.as_ref().unwrap();
        let non_dcr = cases[1].investment.as_ref().unwrap();
        assert_eq!(dcr.amount, dec!(99000000));
        // 26m * 10 * 30%
        assert_eq!(non_dcr.amount, dec!(78000000));
    }

    #[test]
    fn test_basis_comparison_labels() {
        let input = ComparisonInput {
            inputs: reference(),
            options: CalculationOptions::default(),
            axis: ComparisonAxis::ReturnBasis,
        };
        let out = compare_scenarios(&input, &SchemeConstants::default()).unwrap();
        let labels: Vec<_> = out.result.cases.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["nominal", "real"]);
        let nominal = out.result.cases[0].metrics.as_ref().unwrap();
        let real = out.result.cases[1].metrics.as_ref().unwrap();
        assert!(nominal.annualized_return_pct > real.annualized_return_pct);
    }

    #[test]
    fn test_unrecovered_side_keeps_annualized_return() {
        let inputs = ProjectInputs {
            bid_rate: dec!(0.5),
            loan: Decimal::ZERO,
            ..reference()
        };
        let input = ComparisonInput {
            inputs,
            options: CalculationOptions::default(),
            axis: ComparisonAxis::ReturnBasis,
        };
        let out = compare_scenarios(&input, &SchemeConstants::default()).unwrap();
        let real = &out.result.cases[1];
        assert!(real.error.is_none());
        let m = real.metrics.as_ref().unwrap();
        assert!(m.annualized_return_pct < Decimal::ZERO);
        assert_eq!(m.payback_years, None);
        assert!(m.payback_error.as_deref().unwrap().starts_with("never_recouped"));
        assert!(out.warnings.iter().any(|w| w.starts_with("real: Payback not reached")));
    }

    #[test]
    fn test_failing_side_does_not_abort() {
        // Fully financed: no outlay, so neither side has a defined return
        let inputs = ProjectInputs {
            loan: dec!(100),
            ..reference()
        };
        let input = ComparisonInput {
            inputs,
            options: CalculationOptions::default(),
            axis: ComparisonAxis::ProgramTrack,
        };
        let out = compare_scenarios(&input, &SchemeConstants::default()).unwrap();
        assert_eq!(out.result.cases.len(), 2);
        for case in &out.result.cases {
            assert!(case.metrics.is_none());
            assert!(case.error.as_deref().unwrap().starts_with("domain"));
            assert!(case.investment.as_ref().unwrap().degenerate);
        }
    }
}
