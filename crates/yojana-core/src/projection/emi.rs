use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::YojanaError;
use crate::scheme::SchemeConstants;
use crate::time_value::annuity_payment;
use crate::types::{CashFlowSeries, Money, Rate};
use crate::YojanaResult;

/// Yearly loan repayments: a level EMI for `term_years`, zero afterwards.
pub fn schedule_emi(
    principal: Money,
    term_years: u32,
    annual_rate: Rate,
    scheme: &SchemeConstants,
) -> YojanaResult<CashFlowSeries> {
    if term_years == 0 || term_years > scheme.horizon_years {
        return Err(YojanaError::InvalidInput {
            field: "repayment_years".into(),
            reason: format!(
                "Repayment term must be between 1 and {} years, got {term_years}",
                scheme.horizon_years
            ),
        });
    }
    if principal < Decimal::ZERO {
        return Err(YojanaError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal cannot be negative".into(),
        });
    }
    if annual_rate <= dec!(-1) {
        return Err(YojanaError::InvalidInput {
            field: "bank_loan_rate".into(),
            reason: "Loan rate must be greater than -100%".into(),
        });
    }

    let payment = annuity_payment(principal, annual_rate, term_years)?;
    let values = (1..=scheme.horizon_years)
        .map(|year| {
            if year <= term_years {
                payment
            } else {
                Decimal::ZERO
            }
        })
        .collect();

    Ok(CashFlowSeries::from_values("emi", values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::annuity_present_value;

    #[test]
    fn test_payments_stop_after_term() {
        let scheme = SchemeConstants::default();
        let s = schedule_emi(dec!(231000000), 10, dec!(0.105), &scheme).unwrap();
        assert_eq!(s.len(), 25);
        let payment = s.value_at(1).unwrap();
        assert!(payment > Decimal::ZERO);
        assert!(s.points[..10].iter().all(|p| p.value == payment));
        assert!(s.points[10..].iter().all(|p| p.value.is_zero()));
    }

    #[test]
    fn test_discounted_payments_reconstruct_principal() {
        let scheme = SchemeConstants::default();
        let s = schedule_emi(dec!(231000000), 10, dec!(0.105), &scheme).unwrap();
        let pv = annuity_present_value(s.value_at(1).unwrap(), dec!(0.105), 10).unwrap();
        assert!((pv - dec!(231000000)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let scheme = SchemeConstants::default();
        let s = schedule_emi(dec!(1000), 4, Decimal::ZERO, &scheme).unwrap();
        assert_eq!(s.value_at(1), Some(dec!(250)));
        assert_eq!(s.value_at(5), Some(Decimal::ZERO));
    }

    #[test]
    fn test_term_bounds() {
        let scheme = SchemeConstants::default();
        assert!(schedule_emi(dec!(1000), 0, dec!(0.1), &scheme).is_err());
        assert!(schedule_emi(dec!(1000), 26, dec!(0.1), &scheme).is_err());
        assert!(schedule_emi(dec!(1000), 25, dec!(0.1), &scheme).is_ok());
    }

    #[test]
    fn test_zero_principal_schedules_nothing() {
        let scheme = SchemeConstants::default();
        let s = schedule_emi(Decimal::ZERO, 10, dec!(0.105), &scheme).unwrap();
        assert!(s.total().is_zero());
    }
}
