use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::YojanaError;
use crate::types::{Money, Rate};
use crate::YojanaResult;

/// Scheme-wide constants shared by every calculation.
///
/// Every field has a default, so a partial override file only needs to list
/// what differs from the published scheme terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConstants {
    /// Capital cost per MW for projects meeting the domestic content requirement
    pub dcr_cost_per_mw: Money,
    /// Capital cost per MW for projects outside the domestic content requirement
    pub non_dcr_cost_per_mw: Money,
    /// Annual inflation rate used to deflate nominal cash flows
    pub inflation_rate: Rate,
    /// Length of the scheme in years; every schedule has exactly this many values
    pub horizon_years: u32,
    /// Units generated per MW per day
    pub daily_generation_units: Decimal,
    /// Panel yield in year 1 when degradation is applied
    pub first_year_yield: Decimal,
    /// Multiplicative yield decay applied to each year after the first
    pub annual_yield_decay: Decimal,
    /// Loan specifications at or below this value are read as a percentage of
    /// the financed cost; anything above is an absolute principal.
    pub loan_percent_threshold: Decimal,
}

impl Default for SchemeConstants {
    fn default() -> Self {
        SchemeConstants {
            dcr_cost_per_mw: dec!(33_000_000),
            non_dcr_cost_per_mw: dec!(26_000_000),
            inflation_rate: dec!(0.06),
            horizon_years: 25,
            daily_generation_units: dec!(4500),
            first_year_yield: dec!(0.98),
            annual_yield_decay: dec!(0.994),
            loan_percent_threshold: dec!(100),
        }
    }
}

impl SchemeConstants {
    /// Capital cost per MW for the selected program track.
    pub fn cost_per_mw(&self, dcr_compliant: bool) -> Money {
        if dcr_compliant {
            self.dcr_cost_per_mw
        } else {
            self.non_dcr_cost_per_mw
        }
    }

    /// Total capital cost of a project of `capacity` MW.
    pub fn project_cost(&self, capacity: Decimal, dcr_compliant: bool) -> Money {
        self.cost_per_mw(dcr_compliant) * capacity
    }

    pub fn validate(&self) -> YojanaResult<()> {
        if self.horizon_years == 0 {
            return Err(YojanaError::InvalidInput {
                field: "horizon_years".into(),
                reason: "Scheme horizon must be at least one year".into(),
            });
        }
        if self.dcr_cost_per_mw <= Decimal::ZERO || self.non_dcr_cost_per_mw <= Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "cost_per_mw".into(),
                reason: "Cost per MW must be positive for both program tracks".into(),
            });
        }
        if self.inflation_rate <= dec!(-1) {
            return Err(YojanaError::InvalidInput {
                field: "inflation_rate".into(),
                reason: "Inflation rate must be greater than -100%".into(),
            });
        }
        if self.daily_generation_units <= Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "daily_generation_units".into(),
                reason: "Daily generation must be positive".into(),
            });
        }
        if self.first_year_yield <= Decimal::ZERO || self.annual_yield_decay <= Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "degradation".into(),
                reason: "Yield factors must be positive".into(),
            });
        }
        if self.loan_percent_threshold <= Decimal::ZERO {
            return Err(YojanaError::InvalidInput {
                field: "loan_percent_threshold".into(),
                reason: "Percentage threshold must be positive".into(),
            });
        }
        Ok(())
    }
}
