use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use yojana_core::sensitivity::{
    self, RangeSpec, SensitivityInput, SweepMetric, SweepParameter,
};
use yojana_core::SchemeConstants;

use super::project::ProjectArgs;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ParameterArg {
    BidRate,
    Capacity,
    Loan,
    Subsidy,
    RepaymentYears,
}

impl From<ParameterArg> for SweepParameter {
    fn from(p: ParameterArg) -> Self {
        match p {
            ParameterArg::BidRate => SweepParameter::BidRate,
            ParameterArg::Capacity => SweepParameter::Capacity,
            ParameterArg::Loan => SweepParameter::Loan,
            ParameterArg::Subsidy => SweepParameter::Subsidy,
            ParameterArg::RepaymentYears => SweepParameter::RepaymentYears,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum MetricArg {
    #[default]
    AnnualizedReturn,
    Payback,
}

/// Arguments for a one-way sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Input to vary
    #[arg(long, value_enum)]
    pub parameter: ParameterArg,

    /// Seed value to build the sweep window around (defaults to the base case value)
    #[arg(long, conflicts_with = "values")]
    pub seed: Option<Decimal>,

    /// Explicit ascending values, comma separated (e.g. "2.5,3,3.5")
    #[arg(long, value_delimiter = ',')]
    pub values: Option<Vec<Decimal>>,

    /// Metric to report at each point
    #[arg(long, value_enum, default_value = "annualized-return")]
    pub metric: MetricArg,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run_sensitivity(
    args: SensitivityArgs,
    scheme: &SchemeConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.project.request()?;

    let range = match (args.values, args.seed) {
        (Some(values), _) => Some(RangeSpec::Values(values)),
        (None, Some(seed)) => Some(RangeSpec::Seed(seed)),
        (None, None) => None,
    };
    let metric = match args.metric {
        MetricArg::AnnualizedReturn => SweepMetric::AnnualizedReturn,
        MetricArg::Payback => SweepMetric::PaybackYear,
    };

    let input = SensitivityInput {
        base_inputs: request.inputs,
        options: request.options,
        parameter: args.parameter.into(),
        range,
        metric,
    };
    let result = sensitivity::run_sensitivity(&input, scheme)?;
    tracing::debug!(
        points = result.result.points.len(),
        failed = result.result.failed_points,
        "sensitivity sweep complete"
    );
    Ok(serde_json::to_value(result)?)
}
