use clap::{Args, ValueEnum};
use serde_json::Value;

use yojana_core::comparison::{self, ComparisonAxis, ComparisonInput};
use yojana_core::SchemeConstants;

use super::project::ProjectArgs;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AxisArg {
    /// DCR vs non-DCR cost track
    Track,
    /// Nominal vs real cash flows
    Basis,
}

/// Arguments for a side-by-side comparison
#[derive(Args)]
pub struct CompareArgs {
    /// What to compare
    #[arg(long, value_enum)]
    pub axis: AxisArg,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run_compare(
    args: CompareArgs,
    scheme: &SchemeConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.project.request()?;
    let axis = match args.axis {
        AxisArg::Track => ComparisonAxis::ProgramTrack,
        AxisArg::Basis => ComparisonAxis::ReturnBasis,
    };
    let input = ComparisonInput {
        inputs: request.inputs,
        options: request.options,
        axis,
    };
    let result = comparison::compare_scenarios(&input, scheme)?;
    Ok(serde_json::to_value(result)?)
}
