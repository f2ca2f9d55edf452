use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::decimal;
use crate::interest::inputs::validate_projection_inputs;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinToolboxResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a side-by-side simple vs compound projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestInput {
    pub principal: Money,
    pub simple_rate: Rate,
    pub compound_rate: Rate,
    pub years: u32,
}

/// Balance at the end of `year`, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: u32,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestSeries {
    pub simple: Vec<SeriesPoint>,
    pub compound: Vec<SeriesPoint>,
    pub final_simple_amount: Money,
    pub final_compound_amount: Money,
    /// `final_compound_amount - final_simple_amount`
    pub difference: Money,
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// Simple interest: `P * (1 + r * t)`. Unrounded.
pub fn compute_simple_interest(principal: Money, rate: Rate, periods: u32) -> FinToolboxResult<Money> {
    let accrued = decimal::mul(rate, Decimal::from(periods))?;
    decimal::mul(principal, decimal::add(Decimal::ONE, accrued)?)
}

/// Compound interest: `P * (1 + r)^t`. Unrounded.
pub fn compute_compound_interest(
    principal: Money,
    rate: Rate,
    periods: u32,
) -> FinToolboxResult<Money> {
    let factor = decimal::powu(decimal::add(Decimal::ONE, rate)?, u64::from(periods))?;
    decimal::mul(principal, factor)
}

/// Year-by-year balances for both methods, `0..=years` inclusive.
///
/// Every point is computed from the principal directly and rounded on its
/// own, so the last point of each series is exactly the reported final
/// amount. Rates are not range-checked here.
pub fn compute_interest_series(
    principal: Money,
    simple_rate: Rate,
    compound_rate: Rate,
    years: u32,
) -> FinToolboxResult<InterestSeries> {
    let capacity = years as usize + 1;
    let mut simple = Vec::with_capacity(capacity);
    let mut compound = Vec::with_capacity(capacity);

    for year in 0..=years {
        let simple_amount = compute_simple_interest(principal, simple_rate, year)?;
        let compound_amount = compute_compound_interest(principal, compound_rate, year)?;
        simple.push(SeriesPoint {
            year,
            amount: decimal::round_currency(simple_amount),
        });
        compound.push(SeriesPoint {
            year,
            amount: decimal::round_currency(compound_amount),
        });
    }

    let final_simple_amount = simple.last().map(|p| p.amount).unwrap_or(principal);
    let final_compound_amount = compound.last().map(|p| p.amount).unwrap_or(principal);
    let difference = decimal::sub(final_compound_amount, final_simple_amount)?;

    Ok(InterestSeries {
        simple,
        compound,
        final_simple_amount,
        final_compound_amount,
        difference,
    })
}

/// Validate the projection form and build both series.
pub fn project_interest(
    input: &InterestInput,
) -> FinToolboxResult<ComputationOutput<InterestSeries>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_projection_inputs(
        input.principal,
        input.simple_rate,
        input.compound_rate,
        input.years,
    )?;

    let series = compute_interest_series(
        input.principal,
        input.simple_rate,
        input.compound_rate,
        input.years,
    )?;

    if series.difference < Decimal::ZERO {
        warnings.push(format!(
            "Simple-interest balance exceeds compound balance by {} because the simple rate is higher",
            -series.difference
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple A = P(1 + rt) vs compound A = P(1 + r)^t, annual steps, cents rounded per point",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "simple_rate": input.simple_rate.to_string(),
            "compound_rate": input.compound_rate.to_string(),
            "years": input.years,
        }),
        warnings,
        elapsed,
        series,
    ))
}
