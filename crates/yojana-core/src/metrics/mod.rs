pub mod investment;
pub mod returns;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::YojanaError;
use crate::inputs::{CalculationOptions, ProjectInputs};
use crate::projection::{self, ProjectedCashFlows};
use crate::scheme::SchemeConstants;
use crate::types::{Money, ReturnBasis, Years};
use crate::YojanaResult;

pub use investment::{investment_cost, InvestmentCost};
pub use returns::{annualized_return, payback_year};

/// Headline return figures for one project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnMetrics {
    pub basis: ReturnBasis,
    /// Sum of the net schedule the metrics are measured on
    pub cash_flow_sum: Money,
    /// Investor outlay the returns are measured against
    pub investment: Money,
    /// Annualized compound return in percent
    pub annualized_return_pct: Decimal,
    /// Years (possibly fractional) until the outlay is recovered; `None`
    /// when the horizon ends first
    pub payback_years: Option<Years>,
    /// Why payback is missing, as `kind: message`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_error: Option<String>,
}

impl ReturnMetrics {
    /// Envelope warning for a missing payback year.
    pub fn warning(&self) -> Option<String> {
        self.payback_error
            .as_ref()
            .map(|e| format!("Payback not reached: {e}"))
    }
}

/// Investment cost for a project, resolving its loan first.
pub fn project_investment(
    inputs: &ProjectInputs,
    scheme: &SchemeConstants,
) -> YojanaResult<InvestmentCost> {
    let principal = projection::loan::resolve_loan(
        inputs.capacity_mw,
        inputs.dcr_compliant,
        inputs.loan,
        inputs.subsidy,
        scheme,
    )?;
    investment_cost(
        inputs.capacity_mw,
        inputs.dcr_compliant,
        principal,
        inputs.subsidy,
        scheme,
    )
}

/// Reduce already projected flows to return metrics on `basis`.
///
/// An undefined annualized return fails the call. An outlay the horizon never
/// recovers keeps the return and records the payback failure on the result.
pub fn metrics_from_flows(
    flows: &ProjectedCashFlows,
    investment: &InvestmentCost,
    basis: ReturnBasis,
    horizon: u32,
) -> YojanaResult<ReturnMetrics> {
    let net = flows.net(basis);
    let cash_flow_sum = net.total();
    let annualized_return_pct = annualized_return(cash_flow_sum, investment.amount, horizon)?;
    let (payback_years, payback_error) = match payback_year(net, investment.amount) {
        Ok(years) => (Some(years), None),
        Err(e @ YojanaError::NeverRecouped { .. }) => (None, Some(format!("{}: {e}", e.kind()))),
        Err(e) => return Err(e),
    };
    Ok(ReturnMetrics {
        basis,
        cash_flow_sum,
        investment: investment.amount,
        annualized_return_pct,
        payback_years,
        payback_error,
    })
}

/// Full pipeline: project the cash flows, then derive return metrics on the
/// basis selected by `options.realized`.
pub fn return_metrics(
    inputs: &ProjectInputs,
    options: &CalculationOptions,
    scheme: &SchemeConstants,
) -> YojanaResult<(ReturnMetrics, InvestmentCost)> {
    let flows = projection::project(inputs, options, scheme)?;
    let investment = investment_cost(
        inputs.capacity_mw,
        inputs.dcr_compliant,
        flows.principal,
        inputs.subsidy,
        scheme,
    )?;
    let metrics = metrics_from_flows(&flows, &investment, options.basis(), scheme.horizon_years)?;
    Ok((metrics, investment))
}
