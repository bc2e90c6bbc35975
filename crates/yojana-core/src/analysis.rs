use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::inputs::{CalculationOptions, ProjectInputs};
use crate::metrics::{self, InvestmentCost, ReturnMetrics};
use crate::projection::{self, ProjectedCashFlows};
use crate::scheme::SchemeConstants;
use crate::types::*;
use crate::YojanaResult;

/// Input shared by the projection and metrics entry points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRequest {
    pub inputs: ProjectInputs,
    #[serde(default)]
    pub options: CalculationOptions,
}

/// One row of the aligned yearly table handed to charts and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowRow {
    pub year: u32,
    pub gross: Money,
    pub emi: Money,
    pub nominal: Money,
    pub real: Money,
    pub inflation_factor: Decimal,
}

/// Output of the cash-flow projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub principal: Money,
    pub investment: InvestmentCost,
    pub rows: Vec<CashFlowRow>,
    pub total_gross: Money,
    pub total_emi: Money,
    pub total_nominal: Money,
    pub total_real: Money,
}

/// Output of the return metrics calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnSummary {
    pub investment: InvestmentCost,
    pub metrics: ReturnMetrics,
}

fn assumptions(request: &ProjectRequest, scheme: &SchemeConstants) -> serde_json::Value {
    serde_json::json!({
        "capacity_mw": request.inputs.capacity_mw.to_string(),
        "bid_rate": request.inputs.bid_rate.to_string(),
        "loan": request.inputs.loan.to_string(),
        "repayment_years": request.inputs.repayment_years,
        "subsidy": request.inputs.subsidy.to_string(),
        "dcr_compliant": request.inputs.dcr_compliant,
        "bank_loan_rate": request.options.bank_loan_rate.to_string(),
        "realized": request.options.realized,
        "apply_degradation": request.options.apply_degradation,
        "inflation_rate": scheme.inflation_rate.to_string(),
        "horizon_years": scheme.horizon_years,
        "loan_percent_threshold": scheme.loan_percent_threshold.to_string(),
    })
}

fn table_rows(flows: &ProjectedCashFlows) -> Vec<CashFlowRow> {
    flows
        .gross
        .points
        .iter()
        .zip(&flows.emi.points)
        .zip(&flows.nominal.points)
        .zip(&flows.real.points)
        .zip(&flows.inflation_factors.points)
        .map(|((((g, e), n), r), f)| CashFlowRow {
            year: g.year,
            gross: g.value,
            emi: e.value,
            nominal: n.value,
            real: r.value,
            inflation_factor: f.value,
        })
        .collect()
}

/// Every yearly schedule for one project, as aligned rows.
pub fn project_cash_flows(
    request: &ProjectRequest,
    scheme: &SchemeConstants,
) -> YojanaResult<ComputationOutput<CashFlowProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let flows = projection::project(&request.inputs, &request.options, scheme)?;
    let investment = metrics::investment_cost(
        request.inputs.capacity_mw,
        request.inputs.dcr_compliant,
        flows.principal,
        request.inputs.subsidy,
        scheme,
    )?;
    warnings.extend(investment.warning());

    let negative_years = flows
        .nominal
        .points
        .iter()
        .filter(|p| p.value < Decimal::ZERO)
        .count();
    if negative_years > 0 {
        warnings.push(format!(
            "EMI exceeds gross return in {negative_years} year(s); investor tops up the shortfall"
        ));
    }

    let output = CashFlowProjection {
        principal: flows.principal,
        investment,
        rows: table_rows(&flows),
        total_gross: flows.gross.total(),
        total_emi: flows.emi.total(),
        total_nominal: flows.nominal.total(),
        total_real: flows.real.total(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scheme Cash-Flow Projection (gross, EMI, nominal, real)",
        &assumptions(request, scheme),
        warnings,
        elapsed,
        output,
    ))
}

/// Annualized return and payback year for one project.
pub fn calculate_return_metrics(
    request: &ProjectRequest,
    scheme: &SchemeConstants,
) -> YojanaResult<ComputationOutput<ReturnSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (metrics, investment) = metrics::return_metrics(&request.inputs, &request.options, scheme)?;
    warnings.extend(investment.warning());
    warnings.extend(metrics.warning());

    let methodology = match metrics.basis {
        ReturnBasis::Real => "Annualized Real Return and Payback (inflation-adjusted)",
        ReturnBasis::Nominal => "Annualized Nominal Return and Payback",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &assumptions(request, scheme),
        warnings,
        elapsed,
        ReturnSummary {
            investment,
            metrics,
        },
    ))
}

/// Investor outlay alone, for report summary lines.
pub fn calculate_investment_cost(
    inputs: &ProjectInputs,
    scheme: &SchemeConstants,
) -> YojanaResult<ComputationOutput<InvestmentCost>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    scheme.validate()?;
    inputs.validate(scheme)?;
    let investment = metrics::project_investment(inputs, scheme)?;
    warnings.extend(investment.warning());

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Investor Outlay (project cost - loan - subsidy)",
        &serde_json::json!({
            "capacity_mw": inputs.capacity_mw.to_string(),
            "dcr_compliant": inputs.dcr_compliant,
            "loan": inputs.loan.to_string(),
            "subsidy": inputs.subsidy.to_string(),
            "cost_per_mw": scheme.cost_per_mw(inputs.dcr_compliant).to_string(),
        }),
        warnings,
        elapsed,
        investment,
    ))
}
