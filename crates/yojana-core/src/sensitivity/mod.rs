pub mod sweep;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::inputs::{CalculationOptions, ProjectInputs};
use crate::projection::loan::{read_loan_spec, LoanReading};
use crate::scheme::SchemeConstants;
use crate::types::*;
use crate::YojanaResult;

pub use sweep::{RangeSpec, SweepMetric, SweepParameter, SweepPoint};

/// Input for a one-way sensitivity sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Base case project; every input except the swept one stays fixed
    pub base_inputs: ProjectInputs,
    #[serde(default)]
    pub options: CalculationOptions,
    /// Input to vary
    pub parameter: SweepParameter,
    /// Explicit values or a seed; defaults to seeding from the base case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeSpec>,
    /// Metric to report at each point
    #[serde(default)]
    pub metric: SweepMetric,
}

/// Output of a one-way sensitivity sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub parameter: String,
    pub metric: String,
    pub basis: ReturnBasis,
    /// Points in ascending parameter order, one per evaluated value
    pub points: Vec<SweepPoint>,
    pub failed_points: usize,
}

/// Run a sensitivity sweep of a built-in metric.
pub fn run_sensitivity(
    input: &SensitivityInput,
    scheme: &SchemeConstants,
) -> YojanaResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    scheme.validate()?;

    let range = input
        .range
        .clone()
        .unwrap_or_else(|| RangeSpec::Seed(input.parameter.value_in(&input.base_inputs)));

    let points = sweep::sweep(
        &input.base_inputs,
        input.parameter,
        &range,
        scheme,
        |inputs| sweep::evaluate_metric(input.metric, inputs, &input.options, scheme),
    )?;

    if input.parameter == SweepParameter::Loan {
        let readings: Vec<LoanReading> = points
            .iter()
            .map(|p| read_loan_spec(p.parameter_value, scheme))
            .collect();
        if readings.windows(2).any(|w| w[0] != w[1]) {
            warnings.push(format!(
                "Loan sweep crosses the percentage threshold {}: lower values are read as percentages, higher as amounts",
                scheme.loan_percent_threshold
            ));
        }
    }

    let failed_points = points.iter().filter(|p| !p.is_ok()).count();
    for p in points.iter().filter(|p| !p.is_ok()) {
        warnings.push(format!(
            "Evaluation failed at {} = {}: {}",
            input.parameter.name(),
            p.parameter_value,
            p.error.as_deref().unwrap_or_default()
        ));
    }

    let output = SensitivityOutput {
        parameter: input.parameter.name().to_string(),
        metric: input.metric.name().to_string(),
        basis: input.options.basis(),
        points,
        failed_points,
    };

    let base_value: Decimal = input.parameter.value_in(&input.base_inputs);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "One-Way Sensitivity Sweep",
        &serde_json::json!({
            "parameter": input.parameter.name(),
            "base_value": base_value.to_string(),
            "range": range,
            "metric": input.metric.name(),
            "realized": input.options.realized,
            "bank_loan_rate": input.options.bank_loan_rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
