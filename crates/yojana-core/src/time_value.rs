use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::YojanaError;
use crate::types::{Money, Rate};
use crate::YojanaResult;

/// Compound growth factor (1 + rate)^periods
pub fn compound_factor(rate: Rate, periods: u32) -> YojanaResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(YojanaError::InvalidInput {
            field: "rate".into(),
            reason: "Rate must be greater than -100%".into(),
        });
    }
    (Decimal::ONE + rate)
        .checked_powu(periods as u64)
        .ok_or_else(|| YojanaError::Domain(format!("(1 + {rate})^{periods} overflows")))
}

/// Level payment that amortises `principal` over `nper` periods at `rate`.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> YojanaResult<Money> {
    if nper == 0 {
        return Err(YojanaError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    // 1 - (1 + r)^-n, expressed with the positive power
    let denominator = Decimal::ONE - Decimal::ONE / factor;

    if denominator.is_zero() {
        return Err(YojanaError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(principal * rate / denominator)
}

/// Present value of `nper` level payments of `payment` discounted at `rate`.
pub fn annuity_present_value(payment: Money, rate: Rate, nper: u32) -> YojanaResult<Money> {
    if rate.is_zero() {
        return Ok(payment * Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    Ok(payment * (Decimal::ONE - Decimal::ONE / factor) / rate)
}
