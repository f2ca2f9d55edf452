use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

use crate::decimal;
use crate::error::FinToolboxError;
use crate::returns::cash_flow::validate_cash_flow_schedule;
use crate::returns::periodicity::{annualize, deannualize, Periodicity};
use crate::time_value::{self, growth_factor};
use crate::types::{with_metadata, CashFlowSchedule, ComputationOutput, Money, Rate};
use crate::FinToolboxResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MirrError {
    #[error("present value of negative cash flows is zero; MIRR cannot be computed")]
    NoNegativeFlows,
    #[error("cash flows must contain both investments (negative) and returns (positive) across at least one period")]
    InvalidCashFlowMix,
}

/// Outcome of one MIRR request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrResult {
    /// Effective annual MIRR
    pub rate: Option<Rate>,
    /// MIRR per cash-flow period, before annualization
    pub period_rate: Option<Rate>,
    /// Plain NPV of the schedule at the per-period financing rate
    pub npv_at_finance_rate: Option<Money>,
    pub error_kind: Option<MirrError>,
}

impl MirrResult {
    fn failed(error: MirrError) -> Self {
        Self {
            rate: None,
            period_rate: None,
            npv_at_finance_rate: None,
            error_kind: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrInput {
    pub cash_flows: CashFlowSchedule,
    /// Annual cost of funding the negative flows
    pub finance_rate: Rate,
    /// Annual rate earned on reinvested positive flows
    pub reinvest_rate: Rate,
    #[serde(default)]
    pub periodicity: Periodicity,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

fn check_rate(field: &str, rate: Rate) -> FinToolboxResult<()> {
    if rate <= dec!(-1) {
        return Err(FinToolboxError::InvalidInput {
            field: field.into(),
            reason: "Rate must be greater than -100%".into(),
        });
    }
    Ok(())
}

/// Modified IRR with separate financing and reinvestment rates.
///
/// Both annual rates are first brought down to per-period rates. Negative
/// flows are discounted to period 0 at the financing rate, positive flows
/// compounded to the horizon `n` at the reinvestment rate, and
/// `(FV / PV)^(1/n) - 1` is annualized exactly once.
///
/// Domain failures come back inside the result; `Err` means arithmetic
/// overflow or an unusable rate (e.g. at or below -100%).
pub fn compute_mirr(
    schedule: &CashFlowSchedule,
    finance_rate: Rate,
    reinvest_rate: Rate,
    periodicity: Periodicity,
) -> FinToolboxResult<MirrResult> {
    check_rate("finance_rate", finance_rate)?;
    check_rate("reinvest_rate", reinvest_rate)?;
    if !schedule.has_negative() {
        return Ok(MirrResult::failed(MirrError::NoNegativeFlows));
    }
    if !schedule.has_positive() {
        return Ok(MirrResult::failed(MirrError::InvalidCashFlowMix));
    }
    let horizon = schedule.horizon();
    if horizon <= 0 {
        return Ok(MirrResult::failed(MirrError::InvalidCashFlowMix));
    }

    let finance_per_period = deannualize(finance_rate, periodicity)?;
    let reinvest_per_period = deannualize(reinvest_rate, periodicity)?;

    let mut pv_negative = Decimal::ZERO;
    let mut fv_positive = Decimal::ZERO;
    for cf in schedule.iter() {
        if cf.amount < Decimal::ZERO {
            let discount = growth_factor(finance_per_period, cf.period)?;
            pv_negative = decimal::add(pv_negative, decimal::div(cf.amount.abs(), discount)?)?;
        } else if cf.amount > Decimal::ZERO {
            let compound = growth_factor(reinvest_per_period, horizon - cf.period)?;
            fv_positive = decimal::add(fv_positive, decimal::mul(cf.amount, compound)?)?;
        }
    }

    if pv_negative.is_zero() {
        return Ok(MirrResult::failed(MirrError::NoNegativeFlows));
    }

    let ratio = decimal::div(fv_positive, pv_negative)?;
    let exponent = decimal::div(Decimal::ONE, Decimal::from(horizon))?;
    let period_rate = decimal::sub(decimal::powd(ratio, exponent)?, Decimal::ONE)?;
    let rate = annualize(period_rate, periodicity)?;
    let npv_at_finance_rate = time_value::npv(finance_per_period, &schedule.items)?;

    debug!(
        "mirr: pv_negative={pv_negative} fv_positive={fv_positive} n={horizon} period_rate={period_rate} annual={rate}"
    );

    Ok(MirrResult {
        rate: Some(rate),
        period_rate: Some(period_rate),
        npv_at_finance_rate: Some(npv_at_finance_rate),
        error_kind: None,
    })
}

/// Validate then compute MIRR; validation failures are returned as `Err`.
pub fn analyze_mirr(input: &MirrInput) -> FinToolboxResult<ComputationOutput<MirrResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_cash_flow_schedule(&input.cash_flows)?;

    let result = compute_mirr(
        &input.cash_flows,
        input.finance_rate,
        input.reinvest_rate,
        input.periodicity,
    )?;
    if let Some(kind) = result.error_kind {
        warnings.push(format!("MIRR calculation warning: {kind}"));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "MIRR = (FV of positive flows at reinvestment rate / PV of negative flows at finance rate)^(1/n) - 1",
        &serde_json::json!({
            "finance_rate": input.finance_rate.to_string(),
            "reinvest_rate": input.reinvest_rate.to_string(),
            "periods_per_year": input.periodicity.periods_per_year(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CashFlowItem;

    const EPS: Decimal = dec!(0.0000001);

    #[test]
    fn test_mirr_yearly_hand_computed() {
        // FV = 300*1.12^2 + 400*1.12 + 500 = 1324.32; PV = 1000
        // MIRR = 1.32432^(1/3) - 1
        let s = CashFlowSchedule::from_amounts(&[dec!(-1000), dec!(300), dec!(400), dec!(500)]);
        let r = compute_mirr(&s, dec!(0.10), dec!(0.12), Periodicity::Yearly).unwrap();
        let rate = r.rate.unwrap();
        assert!((rate - dec!(0.0981566924)).abs() < EPS, "got {rate}");
        assert_eq!(r.rate, r.period_rate);
        // NPV at 10%: ≈ -21.0368
        let npv = r.npv_at_finance_rate.unwrap();
        assert!((npv - dec!(-21.0368)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_no_negative_flows() {
        let s = CashFlowSchedule::from_amounts(&[dec!(100), dec!(200)]);
        let r = compute_mirr(&s, dec!(0.1), dec!(0.1), Periodicity::Yearly).unwrap();
        assert_eq!(r.error_kind, Some(MirrError::NoNegativeFlows));
        assert_eq!(r.rate, None);
        assert_eq!(r.npv_at_finance_rate, None);
    }

    #[test]
    fn test_no_positive_flows() {
        let s = CashFlowSchedule::from_amounts(&[dec!(-100), dec!(-200)]);
        let r = compute_mirr(&s, dec!(0.1), dec!(0.1), Periodicity::Yearly).unwrap();
        assert_eq!(r.error_kind, Some(MirrError::InvalidCashFlowMix));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let s = CashFlowSchedule::new(vec![
            CashFlowItem::new(0, dec!(-100)),
            CashFlowItem::new(0, dec!(150)),
        ]);
        let r = compute_mirr(&s, dec!(0.1), dec!(0.1), Periodicity::Yearly).unwrap();
        assert_eq!(r.error_kind, Some(MirrError::InvalidCashFlowMix));
    }

    #[test]
    fn test_rates_at_minus_one_rejected_for_every_periodicity() {
        let s = CashFlowSchedule::from_amounts(&[dec!(-1000), dec!(600), dec!(600)]);
        for periodicity in [Periodicity::Yearly, Periodicity::Quarterly, Periodicity::Monthly] {
            match compute_mirr(&s, dec!(-1), dec!(0.1), periodicity) {
                Err(FinToolboxError::InvalidInput { field, .. }) => assert_eq!(field, "finance_rate"),
                other => panic!("expected InvalidInput, got {other:?}"),
            }
            match compute_mirr(&s, dec!(0.1), dec!(-1.5), periodicity) {
                Err(FinToolboxError::InvalidInput { field, .. }) => assert_eq!(field, "reinvest_rate"),
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_analyze_mirr_rejects_invalid_schedule() {
        let input = MirrInput {
            cash_flows: CashFlowSchedule::from_amounts(&[dec!(-100)]),
            finance_rate: dec!(0.08),
            reinvest_rate: dec!(0.08),
            periodicity: Periodicity::Monthly,
        };
        assert!(analyze_mirr(&input).is_err());
    }
}
