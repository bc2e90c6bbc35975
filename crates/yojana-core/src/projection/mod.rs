pub mod compose;
pub mod emi;
pub mod gross;
pub mod inflation;
pub mod loan;

use serde::{Deserialize, Serialize};

use crate::inputs::{CalculationOptions, ProjectInputs};
use crate::scheme::SchemeConstants;
use crate::types::{CashFlowSeries, Money, ReturnBasis};
use crate::YojanaResult;

/// Every schedule derived from one set of project inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedCashFlows {
    /// Absolute loan principal after resolving the loan specification
    pub principal: Money,
    pub gross: CashFlowSeries,
    pub emi: CashFlowSeries,
    pub inflation_factors: CashFlowSeries,
    pub nominal: CashFlowSeries,
    pub real: CashFlowSeries,
}

impl ProjectedCashFlows {
    /// The net schedule returns are measured on.
    pub fn net(&self, basis: ReturnBasis) -> &CashFlowSeries {
        match basis {
            ReturnBasis::Nominal => &self.nominal,
            ReturnBasis::Real => &self.real,
        }
    }
}

/// Run loan resolution through real-return composition.
pub fn project(
    inputs: &ProjectInputs,
    options: &CalculationOptions,
    scheme: &SchemeConstants,
) -> YojanaResult<ProjectedCashFlows> {
    scheme.validate()?;
    inputs.validate(scheme)?;

    let principal = loan::resolve_loan(
        inputs.capacity_mw,
        inputs.dcr_compliant,
        inputs.loan,
        inputs.subsidy,
        scheme,
    )?;
    let gross = gross::project_gross_return(
        inputs.capacity_mw,
        inputs.bid_rate,
        options.apply_degradation,
        scheme,
    )?;
    let emi = emi::schedule_emi(
        principal,
        inputs.repayment_years,
        options.bank_loan_rate,
        scheme,
    )?;
    let inflation_factors = inflation::inflation_factors(scheme.inflation_rate, scheme)?;
    let nominal = compose::nominal_return(&gross, &emi)?;
    let real = compose::real_return(&nominal, &inflation_factors)?;

    for series in [&gross, &emi, &inflation_factors, &nominal, &real] {
        series.ensure_horizon(scheme.horizon_years, "projection")?;
    }

    Ok(ProjectedCashFlows {
        principal,
        gross,
        emi,
        inflation_factors,
        nominal,
        real,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_project_reference_case() {
        let inputs = ProjectInputs {
            capacity_mw: dec!(10),
            bid_rate: dec!(3.0),
            loan: dec!(70),
            repayment_years: 10,
            subsidy: Decimal::ZERO,
            dcr_compliant: true,
        };
        let flows = project(&inputs, &CalculationOptions::default(), &SchemeConstants::default())
            .unwrap();
        assert_eq!(flows.principal, dec!(231000000));
        assert_eq!(flows.gross.value_at(1), Some(dec!(49275000)));
        let emi = flows.emi.value_at(1).unwrap();
        assert_eq!(flows.nominal.value_at(1), Some(dec!(49275000) - emi));
        assert_eq!(flows.nominal.value_at(11), Some(dec!(49275000)));
        assert_eq!(flows.net(ReturnBasis::Nominal), &flows.nominal);
    }
}
