use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::YojanaError;
use crate::scheme::SchemeConstants;
use crate::types::{Money, Rate, ReturnBasis};
use crate::YojanaResult;

fn default_true() -> bool {
    true
}

/// Parameters of a single project under the scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInputs {
    /// Installed capacity in MW
    pub capacity_mw: Decimal,
    /// Tariff won at auction, currency per unit generated
    pub bid_rate: Money,
    /// Either a percentage of the financed cost or an absolute principal,
    /// depending on `SchemeConstants::loan_percent_threshold`
    pub loan: Decimal,
    /// Years over which the loan is repaid
    pub repayment_years: u32,
    /// Capital subsidy received
    #[serde(default)]
    pub subsidy: Money,
    /// Whether the project meets the domestic content requirement
    #[serde(default = "default_true")]
    pub dcr_compliant: bool,
}

impl ProjectInputs {
    /// Full validation against the scheme, run before any pipeline stage.
    pub fn validate(&self, scheme: &SchemeConstants) -> YojanaResult<()> {
        if self.capacity_mw <= Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "capacity_mw".into(),
                reason: "Capacity must be positive".into(),
            });
        }
        if self.bid_rate <= Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "bid_rate".into(),
                reason: "Bid rate must be positive".into(),
            });
        }
        if self.loan < Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "loan".into(),
                reason: "Loan specification cannot be negative".into(),
            });
        }
        if self.repayment_years == 0 || self.repayment_years > scheme.horizon_years {
            return Err(YojanaError::InvalidInput {
                field: "repayment_years".into(),
                reason: format!(
                    "Repayment term must be between 1 and {} years",
                    scheme.horizon_years
                ),
            });
        }
        if self.subsidy < Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "subsidy".into(),
                reason: "Subsidy cannot be negative".into(),
            });
        }
        Ok(())
    }
}

/// Per-call knobs with the scheme's customary defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationOptions {
    /// Annual interest rate charged on the loan
    pub bank_loan_rate: Rate,
    /// Measure returns on inflation-adjusted (real) cash flows
    pub realized: bool,
    /// Apply the panel degradation curve to generation
    pub apply_degradation: bool,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        CalculationOptions {
            bank_loan_rate: dec!(0.105),
            realized: true,
            apply_degradation: false,
        }
    }
}

impl CalculationOptions {
    pub fn basis(&self) -> ReturnBasis {
        ReturnBasis::from_realized(self.realized)
    }
}
