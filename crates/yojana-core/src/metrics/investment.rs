use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::YojanaError;
use crate::scheme::SchemeConstants;
use crate::types::Money;
use crate::YojanaResult;

/// Capital the investor commits out of pocket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentCost {
    /// cost_per_mw * capacity for the chosen track
    pub project_cost: Money,
    pub loan_principal: Money,
    pub subsidy: Money,
    /// project_cost - loan_principal - subsidy
    pub amount: Money,
    /// True when `amount` is zero or negative: the loan and subsidy cover the
    /// whole project and ratio-based returns are meaningless.
    pub degenerate: bool,
}

impl InvestmentCost {
    /// Warning text for a degenerate investment, if any.
    pub fn warning(&self) -> Option<String> {
        if self.degenerate {
            Some(format!(
                "Negative investment: loan {} and subsidy {} cover the project cost {} (investor outlay {})",
                self.loan_principal, self.subsidy, self.project_cost, self.amount
            ))
        } else {
            None
        }
    }
}

/// `cost_per_mw * capacity - principal - subsidy`.
///
/// A non-positive result is returned flagged rather than rejected.
pub fn investment_cost(
    capacity: Decimal,
    dcr_compliant: bool,
    principal: Money,
    subsidy: Money,
    scheme: &SchemeConstants,
) -> YojanaResult<InvestmentCost> {
    if capacity <= Decimal::ZERO {
        return Err(YojanaError::InvalidInput {
            field: "capacity_mw".into(),
            reason: "Capacity must be positive".into(),
        });
    }
    let project_cost = scheme.project_cost(capacity, dcr_compliant);
    let amount = project_cost - principal - subsidy;
    Ok(InvestmentCost {
        project_cost,
        loan_principal: principal,
        subsidy,
        amount,
        degenerate: amount <= Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_investment() {
        let scheme = SchemeConstants::default();
        let cost = investment_cost(dec!(10), true, dec!(231000000), Decimal::ZERO, &scheme).unwrap();
        assert_eq!(cost.amount, dec!(99000000));
        assert!(!cost.degenerate);
        assert!(cost.warning().is_none());
    }

    #[test]
    fn test_over_financed_project_is_flagged() {
        let scheme = SchemeConstants::default();
        let cost =
            investment_cost(dec!(1), false, dec!(20000000), dec!(7000000), &scheme).unwrap();
        assert_eq!(cost.amount, dec!(-1000000));
        assert!(cost.degenerate);
        assert!(cost.warning().unwrap().starts_with("Negative investment"));
    }
}
