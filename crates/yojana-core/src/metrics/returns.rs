use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::YojanaError;
use crate::types::{CashFlowSeries, Money, Years};
use crate::YojanaResult;

/// Constant yearly compounding rate, in percent, that grows
/// `investment_cost` into `cash_flow_sum` over `horizon` years.
pub fn annualized_return(
    cash_flow_sum: Money,
    investment_cost: Money,
    horizon: u32,
) -> YojanaResult<Decimal> {
    if horizon == 0 {
        return Err(YojanaError::InvalidInput {
            field: "horizon".into(),
            reason: "Horizon must be at least one year".into(),
        });
    }
    if investment_cost <= Decimal::ZERO {
        return Err(YojanaError::Domain(format!(
            "annualized return undefined for non-positive investment {investment_cost}"
        )));
    }

    let ratio = cash_flow_sum / investment_cost;
    if ratio < Decimal::ZERO {
        return Err(YojanaError::Domain(format!(
            "annualized return undefined: cumulative return {cash_flow_sum} is negative"
        )));
    }
    if ratio.is_zero() {
        // Total loss
        return Ok(dec!(-100));
    }

    let exponent = Decimal::ONE / Decimal::from(horizon);
    let growth = ratio.checked_powd(exponent).ok_or_else(|| {
        YojanaError::Domain(format!("{ratio}^(1/{horizon}) could not be evaluated"))
    })?;

    Ok((growth - Decimal::ONE) * dec!(100))
}

/// Years elapsed until cumulative cash flow first covers `investment_cost`,
/// interpolating linearly within the crossing year.
pub fn payback_year(series: &CashFlowSeries, investment_cost: Money) -> YojanaResult<Years> {
    if investment_cost <= Decimal::ZERO {
        return Err(YojanaError::Domain(format!(
            "payback undefined for non-positive investment {investment_cost}"
        )));
    }

    let mut cumulative = Decimal::ZERO;
    for (elapsed, point) in series.points.iter().enumerate() {
        let before = cumulative;
        cumulative += point.value;
        if cumulative >= investment_cost {
            // before < investment_cost <= cumulative, so point.value > 0
            let fraction = (investment_cost - before) / point.value;
            return Ok(Decimal::from(elapsed as u64) + fraction);
        }
    }

    Err(YojanaError::NeverRecouped {
        investment: investment_cost,
        recovered: cumulative,
        horizon: series.len() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_even_is_zero_percent() {
        let r = annualized_return(dec!(99000000), dec!(99000000), 25).unwrap();
        assert!(r.abs() < dec!(0.0000001));
    }

    #[test]
    fn test_doubling_over_one_year() {
        let r = annualized_return(dec!(200), dec!(100), 1).unwrap();
        assert_eq!(r, dec!(100));
    }

    #[test]
    fn test_known_compound_rate() {
        // 1.05^25 = 3.3863549408993...
        let r = annualized_return(dec!(338.63549408993), dec!(100), 25).unwrap();
        assert!((r - dec!(5)).abs() < dec!(0.0001), "got {r}");
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(
            annualized_return(dec!(100), Decimal::ZERO, 25),
            Err(YojanaError::Domain(_))
        ));
        assert!(matches!(
            annualized_return(dec!(-100), dec!(50), 25),
            Err(YojanaError::Domain(_))
        ));
    }

    #[test]
    fn test_payback_on_year_boundary() {
        let s = CashFlowSeries::from_values("n", vec![dec!(100); 25]);
        let y = payback_year(&s, dec!(300)).unwrap();
        assert_eq!(y, dec!(3));
        assert!(y.fract().is_zero());
    }

    #[test]
    fn test_payback_interpolates() {
        let s = CashFlowSeries::from_values("n", vec![dec!(100); 25]);
        assert_eq!(payback_year(&s, dec!(250)).unwrap(), dec!(2.5));
        assert_eq!(payback_year(&s, dec!(40)).unwrap(), dec!(0.4));
    }

    #[test]
    fn test_payback_skips_negative_years() {
        let mut values = vec![dec!(-50), dec!(-50)];
        values.extend(vec![dec!(100); 23]);
        let s = CashFlowSeries::from_values("n", values);
        // cumulative: -50, -100, 0, 100, 200 => crosses 150 in year 5
        assert_eq!(payback_year(&s, dec!(150)).unwrap(), dec!(4.5));
    }

    #[test]
    fn test_never_recouped() {
        let s = CashFlowSeries::from_values("n", vec![dec!(10); 25]);
        match payback_year(&s, dec!(1000)) {
            Err(YojanaError::NeverRecouped {
                recovered, horizon, ..
            }) => {
                assert_eq!(recovered, dec!(250));
                assert_eq!(horizon, 25);
            }
            other => panic!("expected NeverRecouped, got {other:?}"),
        }
    }
}
