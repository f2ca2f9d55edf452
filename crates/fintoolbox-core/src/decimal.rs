//! Checked decimal arithmetic for currency-scale values.
//!
//! `Decimal` is already an immutable 96-bit value type; these helpers turn
//! its overflow and divide-by-zero cases into [`FinToolboxError`] values so
//! that chained money arithmetic can use `?` instead of panicking.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::error::FinToolboxError;
use crate::types::Money;
use crate::FinToolboxResult;

/// Decimal places kept for displayed currency amounts.
pub const CURRENCY_DP: u32 = 2;

/// Decimal places kept for assessment scores.
pub const SCORE_DP: u32 = 1;

fn overflow(context: &str) -> FinToolboxError {
    FinToolboxError::Overflow {
        context: context.to_string(),
    }
}

pub fn add(a: Decimal, b: Decimal) -> FinToolboxResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow("addition"))
}

pub fn sub(a: Decimal, b: Decimal) -> FinToolboxResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow("subtraction"))
}

pub fn mul(a: Decimal, b: Decimal) -> FinToolboxResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow("multiplication"))
}

pub fn div(a: Decimal, b: Decimal) -> FinToolboxResult<Decimal> {
    if b.is_zero() {
        return Err(FinToolboxError::DivisionByZero {
            context: format!("{a} / 0"),
        });
    }
    a.checked_div(b).ok_or_else(|| overflow("division"))
}

/// Integer power by repeated multiplication, exact up to 28 significant digits.
pub fn powu(base: Decimal, exponent: u64) -> FinToolboxResult<Decimal> {
    base.checked_powu(exponent)
        .ok_or_else(|| overflow("integer power"))
}

/// Fractional power (`exp(ln(base) * exponent)`); `base` must be positive
/// unless the exponent is integral.
pub fn powd(base: Decimal, exponent: Decimal) -> FinToolboxResult<Decimal> {
    if exponent.is_integer() {
        if let Some(n) = exponent.to_i64() {
            return base.checked_powi(n).ok_or_else(|| overflow("power"));
        }
    }
    if base <= Decimal::ZERO {
        return Err(FinToolboxError::InvalidInput {
            field: "base".into(),
            reason: format!("fractional power of non-positive value {base}"),
        });
    }
    base.checked_powd(exponent)
        .ok_or_else(|| overflow("fractional power"))
}

/// Checked sum of an iterator of decimals.
pub fn sum<I>(values: I) -> FinToolboxResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| add(acc, v))
}

/// Round a money amount to cents, half away from zero.
pub fn round_currency(value: Money) -> Money {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a score to one decimal place, half away from zero.
pub fn round_score(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCORE_DP, RoundingStrategy::MidpointAwayFromZero)
}
