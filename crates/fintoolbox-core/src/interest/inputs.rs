use rust_decimal_macros::dec;

use crate::error::FinToolboxError;
use crate::types::{Money, Rate};
use crate::FinToolboxResult;

pub const MIN_PRINCIPAL: Money = dec!(1000);
pub const MAX_PRINCIPAL: Money = dec!(100_000_000);
pub const MIN_RATE: Rate = dec!(0.001);
pub const MAX_RATE: Rate = dec!(0.20);
pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 50;

fn invalid(field: &str, reason: String) -> FinToolboxError {
    FinToolboxError::InvalidInput {
        field: field.to_string(),
        reason,
    }
}

pub fn validate_principal(principal: Money) -> FinToolboxResult<()> {
    if principal < MIN_PRINCIPAL || principal > MAX_PRINCIPAL {
        return Err(invalid(
            "principal",
            "Principal must be between 1,000 and 100,000,000".into(),
        ));
    }
    Ok(())
}

pub fn validate_rate(field: &str, rate: Rate) -> FinToolboxResult<()> {
    if rate < MIN_RATE || rate > MAX_RATE {
        return Err(invalid(field, "Rate must be between 0.1% and 20%".into()));
    }
    Ok(())
}

pub fn validate_years(years: u32) -> FinToolboxResult<()> {
    if !(MIN_YEARS..=MAX_YEARS).contains(&years) {
        return Err(invalid(
            "years",
            format!("Investment horizon must be between {MIN_YEARS} and {MAX_YEARS} years"),
        ));
    }
    Ok(())
}

/// Check every projection-form field, stopping at the first bad one.
///
/// Order: principal, simple rate, compound rate, years.
pub fn validate_projection_inputs(
    principal: Money,
    simple_rate: Rate,
    compound_rate: Rate,
    years: u32,
) -> FinToolboxResult<()> {
    validate_principal(principal)?;
    validate_rate("simple_rate", simple_rate)?;
    validate_rate("compound_rate", compound_rate)?;
    validate_years(years)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: FinToolboxResult<()>) -> String {
        match result {
            Err(FinToolboxError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_band_edges() {
        assert!(validate_projection_inputs(dec!(1000), dec!(0.001), dec!(0.20), 1).is_ok());
        assert!(validate_projection_inputs(dec!(100_000_000), dec!(0.2), dec!(0.001), 50).is_ok());
    }

    #[test]
    fn test_principal_out_of_range() {
        assert_eq!(field_of(validate_principal(dec!(999.99))), "principal");
        assert_eq!(field_of(validate_principal(dec!(100_000_000.01))), "principal");
    }

    #[test]
    fn test_rates_out_of_range() {
        assert_eq!(field_of(validate_rate("simple_rate", dec!(0.0009))), "simple_rate");
        assert_eq!(field_of(validate_rate("compound_rate", dec!(0.2001))), "compound_rate");
        assert!(validate_rate("simple_rate", dec!(0.03)).is_ok());
    }

    #[test]
    fn test_years_out_of_range() {
        assert_eq!(field_of(validate_years(0)), "years");
        assert_eq!(field_of(validate_years(51)), "years");
    }

    #[test]
    fn test_first_failure_wins() {
        // Both rates bad: the simple rate is reported
        let res = validate_projection_inputs(dec!(5000), dec!(0.5), dec!(0.5), 0);
        assert_eq!(field_of(res), "simple_rate");

        let res = validate_projection_inputs(dec!(5000), dec!(0.05), dec!(0.5), 0);
        assert_eq!(field_of(res), "compound_rate");

        let res = validate_projection_inputs(dec!(10), dec!(0.5), dec!(0.5), 0);
        assert_eq!(field_of(res), "principal");
    }
}
