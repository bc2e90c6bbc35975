use crate::scheme::SchemeConstants;
use crate::time_value::compound_factor;
use crate::types::{CashFlowSeries, Rate};
use crate::YojanaResult;

/// Cumulative inflation factor `(1 + rate)^year` for each year of the scheme.
pub fn inflation_factors(rate: Rate, scheme: &SchemeConstants) -> YojanaResult<CashFlowSeries> {
    let values = (1..=scheme.horizon_years)
        .map(|year| compound_factor(rate, year))
        .collect::<YojanaResult<Vec<_>>>()?;
    Ok(CashFlowSeries::from_values("inflation_factor", values))
}
