use rust_decimal_macros::dec;
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{CashFlowSchedule, Money};

/// Minimum number of entries for any return calculation.
pub const MIN_ENTRIES: usize = 2;

/// Largest accepted magnitude for a single cash-flow amount.
pub const MAX_ABS_AMOUNT: Money = dec!(100_000_000);

/// Structural acceptance checks, evaluated in a fixed order and
/// short-circuiting on the first failure:
///
/// 1. at least [`MIN_ENTRIES`] entries;
/// 2. per entry, in index order: non-negative period, then amount within
///    [`MAX_ABS_AMOUNT`];
/// 3. at least one positive, then at least one negative amount;
/// 4. no repeated period.
///
/// Callers rely on this precedence: the error surfaced to the user is always
/// the earliest rule that fails.
pub fn validate_cash_flow_schedule(schedule: &CashFlowSchedule) -> Result<(), ValidationError> {
    if schedule.len() < MIN_ENTRIES {
        return Err(ValidationError::TooFewEntries {
            count: schedule.len(),
        });
    }

    for (index, cf) in schedule.iter().enumerate() {
        if cf.period < 0 {
            return Err(ValidationError::NegativePeriod { index });
        }
        if cf.amount.abs() > MAX_ABS_AMOUNT {
            return Err(ValidationError::AmountOutOfRange { index });
        }
    }

    if !schedule.has_positive() {
        return Err(ValidationError::MissingPositiveFlow);
    }
    if !schedule.has_negative() {
        return Err(ValidationError::MissingNegativeFlow);
    }

    let mut seen = HashSet::with_capacity(schedule.len());
    for cf in schedule.iter() {
        if !seen.insert(cf.period) {
            return Err(ValidationError::DuplicatePeriod { period: cf.period });
        }
    }

    Ok(())
}
