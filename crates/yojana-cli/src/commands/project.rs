use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use yojana_core::analysis::{self, ProjectRequest};
use yojana_core::{CalculationOptions, ProjectInputs, SchemeConstants};

use crate::input;

/// Project parameters shared by every command
#[derive(Args, Clone)]
pub struct ProjectArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Installed capacity in MW
    #[arg(long)]
    pub capacity: Option<Decimal>,

    /// Tariff won at auction, per unit generated
    #[arg(long)]
    pub bid_rate: Option<Decimal>,

    /// Loan as a percentage of cost (e.g. 70) or an absolute principal
    #[arg(long)]
    pub loan: Option<Decimal>,

    /// Loan repayment term in years
    #[arg(long)]
    pub repayment_years: Option<u32>,

    /// Capital subsidy received
    #[arg(long, default_value = "0")]
    pub subsidy: Decimal,

    /// Project does not meet the domestic content requirement
    #[arg(long)]
    pub non_dcr: bool,

    /// Annual bank loan rate (e.g. 0.105 for 10.5%)
    #[arg(long)]
    pub bank_rate: Option<Decimal>,

    /// Measure returns on nominal rather than inflation-adjusted cash flows
    #[arg(long)]
    pub nominal: bool,

    /// Apply the panel degradation curve
    #[arg(long)]
    pub degradation: bool,
}

impl ProjectArgs {
    pub fn options(&self) -> CalculationOptions {
        let defaults = CalculationOptions::default();
        CalculationOptions {
            bank_loan_rate: self.bank_rate.unwrap_or(defaults.bank_loan_rate),
            realized: !self.nominal,
            apply_degradation: self.degradation,
        }
    }

    pub fn project_inputs(&self) -> Result<ProjectInputs, Box<dyn std::error::Error>> {
        Ok(ProjectInputs {
            capacity_mw: self
                .capacity
                .ok_or("--capacity is required (or provide --input)")?,
            bid_rate: self
                .bid_rate
                .ok_or("--bid-rate is required (or provide --input)")?,
            loan: self.loan.ok_or("--loan is required (or provide --input)")?,
            repayment_years: self
                .repayment_years
                .ok_or("--repayment-years is required (or provide --input)")?,
            subsidy: self.subsidy,
            dcr_compliant: !self.non_dcr,
        })
    }

    /// Input file, then piped stdin, then individual flags.
    pub fn request(&self) -> Result<ProjectRequest, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if let Some(request) = input::stdin::read_piped()? {
            return Ok(request);
        }
        Ok(ProjectRequest {
            inputs: self.project_inputs()?,
            options: self.options(),
        })
    }
}

pub fn run_cash_flows(
    args: ProjectArgs,
    scheme: &SchemeConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.request()?;
    let result = analysis::project_cash_flows(&request, scheme)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_returns(
    args: ProjectArgs,
    scheme: &SchemeConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.request()?;
    let result = analysis::calculate_return_metrics(&request, scheme)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_investment(
    args: ProjectArgs,
    scheme: &SchemeConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.request()?;
    let result = analysis::calculate_investment_cost(&request.inputs, scheme)?;
    Ok(serde_json::to_value(result)?)
}
