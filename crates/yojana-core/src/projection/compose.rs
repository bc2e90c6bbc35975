use rust_decimal::Decimal;

use crate::error::YojanaError;
use crate::types::{CashFlowSeries, YearValue};
use crate::YojanaResult;

/// Gross return less EMI, year by year.
pub fn nominal_return(gross: &CashFlowSeries, emi: &CashFlowSeries) -> YojanaResult<CashFlowSeries> {
    gross.ensure_aligned(emi, "nominal return")?;
    let points = gross
        .points
        .iter()
        .zip(&emi.points)
        .map(|(g, e)| YearValue {
            year: g.year,
            value: g.value - e.value,
        })
        .collect();
    Ok(CashFlowSeries {
        label: "nominal_return".into(),
        points,
    })
}

/// Nominal return deflated by the cumulative inflation factor.
pub fn real_return(
    nominal: &CashFlowSeries,
    inflation_factors: &CashFlowSeries,
) -> YojanaResult<CashFlowSeries> {
    nominal.ensure_aligned(inflation_factors, "real return")?;
    let points = nominal
        .points
        .iter()
        .zip(&inflation_factors.points)
        .map(|(n, f)| {
            if f.value == Decimal::ZERO {
                return Err(YojanaError::DivisionByZero {
                    context: format!("inflation factor for year {}", f.year),
                });
            }
            Ok(YearValue {
                year: n.year,
                value: n.value / f.value,
            })
        })
        .collect::<YojanaResult<Vec<_>>>()?;
    Ok(CashFlowSeries {
        label: "real_return".into(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nominal_subtracts_emi() {
        let gross = CashFlowSeries::from_values("g", vec![dec!(100), dec!(100), dec!(100)]);
        let emi = CashFlowSeries::from_values("e", vec![dec!(40), dec!(40), dec!(0)]);
        let n = nominal_return(&gross, &emi).unwrap();
        assert_eq!(n.values(), vec![dec!(60), dec!(60), dec!(100)]);
        // inputs untouched
        assert_eq!(gross.values(), vec![dec!(100); 3]);
    }

    #[test]
    fn test_real_divides_by_factor() {
        let nominal = CashFlowSeries::from_values("n", vec![dec!(110), dec!(121)]);
        let factors = CashFlowSeries::from_values("f", vec![dec!(1.1), dec!(1.21)]);
        let r = real_return(&nominal, &factors).unwrap();
        assert_eq!(r.values(), vec![dec!(100), dec!(100)]);
    }

    #[test]
    fn test_length_mismatch() {
        let a = CashFlowSeries::from_values("a", vec![dec!(1); 25]);
        let b = CashFlowSeries::from_values("b", vec![dec!(1); 24]);
        assert!(matches!(
            nominal_return(&a, &b),
            Err(YojanaError::ShapeMismatch { .. })
        ));
        assert!(matches!(real_return(&a, &b), Err(YojanaError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_zero_factor() {
        let n = CashFlowSeries::from_values("n", vec![dec!(1)]);
        let f = CashFlowSeries::from_values("f", vec![dec!(0)]);
        assert!(matches!(
            real_return(&n, &f),
            Err(YojanaError::DivisionByZero { .. })
        ));
    }
}
