use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::YojanaError;
use crate::scheme::SchemeConstants;
use crate::types::{CashFlowSeries, Money};
use crate::YojanaResult;

pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Cumulative panel yield for each year: first-year yield, then decayed
/// multiplicatively year on year.
pub fn degradation_curve(scheme: &SchemeConstants) -> Vec<Decimal> {
    let mut factors = Vec::with_capacity(scheme.horizon_years as usize);
    let mut factor = scheme.first_year_yield;
    for year in 1..=scheme.horizon_years {
        if year > 1 {
            factor *= scheme.annual_yield_decay;
        }
        factors.push(factor);
    }
    factors
}

/// Undiscounted yearly revenue from generation sold at `bid_rate`.
pub fn project_gross_return(
    capacity: Decimal,
    bid_rate: Money,
    apply_degradation: bool,
    scheme: &SchemeConstants,
) -> YojanaResult<CashFlowSeries> {
    if capacity <= Decimal::ZERO {
        return Err(YojanaError::InvalidInput {
            field: "capacity_mw".into(),
            reason: "Capacity must be positive".into(),
        });
    }
    if bid_rate <= Decimal::ZERO {
        return Err(YojanaError::InvalidInput {
            field: "bid_rate".into(),
            reason: "Bid rate must be positive".into(),
        });
    }

    let base = capacity * scheme.daily_generation_units * DAYS_PER_YEAR * bid_rate;
    let values = if apply_degradation {
        degradation_curve(scheme)
            .into_iter()
            .map(|factor| base * factor)
            .collect()
    } else {
        vec![base; scheme.horizon_years as usize]
    };

    Ok(CashFlowSeries::from_values("gross_return", values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_revenue_without_degradation() {
        let scheme = SchemeConstants::default();
        let s = project_gross_return(dec!(10), dec!(3.0), false, &scheme).unwrap();
        assert_eq!(s.len(), 25);
        assert!(s.points.iter().all(|p| p.value == dec!(49275000)));
    }

    #[test]
    fn test_degradation_curve() {
        let scheme = SchemeConstants::default();
        let curve = degradation_curve(&scheme);
        assert_eq!(curve.len(), 25);
        assert_eq!(curve[0], dec!(0.98));
        assert_eq!(curve[1], dec!(0.97412));
        assert!(curve.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_degraded_revenue_scales_base() {
        let scheme = SchemeConstants::default();
        let s = project_gross_return(dec!(1), dec!(2), true, &scheme).unwrap();
        // 1 * 4500 * 365 * 2 = 3,285,000
        assert_eq!(s.value_at(1), Some(dec!(3285000) * dec!(0.98)));
        assert_eq!(s.value_at(2), Some(dec!(3285000) * dec!(0.98) * dec!(0.994)));
    }

    #[test]
    fn test_rejects_non_positive_bid() {
        let scheme = SchemeConstants::default();
        assert!(project_gross_return(dec!(1), Decimal::ZERO, false, &scheme).is_err());
    }
}
