use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::YojanaError;
use crate::scheme::SchemeConstants;
use crate::types::Money;
use crate::YojanaResult;

/// How a raw loan specification was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanReading {
    /// Percentage of (project cost - subsidy)
    Percent,
    /// Absolute principal
    Amount,
}

/// Classify a raw loan specification under the scheme's threshold policy.
pub fn read_loan_spec(loan_spec: Decimal, scheme: &SchemeConstants) -> LoanReading {
    if loan_spec <= scheme.loan_percent_threshold {
        LoanReading::Percent
    } else {
        LoanReading::Amount
    }
}

/// Resolve a loan specification into an absolute principal.
///
/// A value at or below `loan_percent_threshold` is a percentage of the
/// project cost net of subsidy; anything larger is returned unchanged.
pub fn resolve_loan(
    capacity: Decimal,
    dcr_compliant: bool,
    loan_spec: Decimal,
    subsidy: Money,
    scheme: &SchemeConstants,
) -> YojanaResult<Money> {
    if capacity <= Decimal::ZERO {
        return Err(YojanaError::InvalidInput {
            field: "capacity_mw".into(),
            reason: "Capacity must be positive".into(),
        });
    }
    if loan_spec < Decimal::ZERO {
        return Err(YojanaError::InvalidInput {
            field: "loan".into(),
            reason: "Loan specification cannot be negative".into(),
        });
    }

    match read_loan_spec(loan_spec, scheme) {
        LoanReading::Percent => {
            let financed = scheme.project_cost(capacity, dcr_compliant) - subsidy;
            Ok(financed * loan_spec / dec!(100))
        }
        LoanReading::Amount => Ok(loan_spec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_dcr_cost() {
        let scheme = SchemeConstants::default();
        let p = resolve_loan(dec!(10), true, dec!(70), Decimal::ZERO, &scheme).unwrap();
        assert_eq!(p, dec!(231000000));
    }

    #[test]
    fn test_percentage_nets_subsidy_on_non_dcr_track() {
        let scheme = SchemeConstants::default();
        // (26m * 2 - 2m) * 50% = 25m
        let p = resolve_loan(dec!(2), false, dec!(50), dec!(2000000), &scheme).unwrap();
        assert_eq!(p, dec!(25000000));
    }

    #[test]
    fn test_absolute_amount_passes_through() {
        let scheme = SchemeConstants::default();
        let p = resolve_loan(dec!(10), true, dec!(150000000), dec!(5), &scheme).unwrap();
        assert_eq!(p, dec!(150000000));
    }

    #[test]
    fn test_threshold_is_policy() {
        let scheme = SchemeConstants {
            loan_percent_threshold: dec!(100000),
            ..SchemeConstants::default()
        };
        assert_eq!(read_loan_spec(dec!(5000), &scheme), LoanReading::Percent);
        assert_eq!(
            read_loan_spec(dec!(5000), &SchemeConstants::default()),
            LoanReading::Amount
        );
    }

    #[test]
    fn test_rejects_bad_capacity_and_negative_loan() {
        let scheme = SchemeConstants::default();
        assert!(resolve_loan(Decimal::ZERO, true, dec!(70), Decimal::ZERO, &scheme).is_err());
        assert!(resolve_loan(dec!(1), true, dec!(-1), Decimal::ZERO, &scheme).is_err());
    }
}
