use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::returns::cash_flow::validate_cash_flow_schedule;
use crate::returns::periodicity::{deannualize, Periodicity};
use crate::time_value;
use crate::types::{with_metadata, CashFlowSchedule, ComputationOutput, Money, Rate};
use crate::FinToolboxResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvInput {
    pub cash_flows: CashFlowSchedule,
    /// Annual discount rate (cost of capital)
    pub discount_rate: Rate,
    #[serde(default)]
    pub periodicity: Periodicity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpvOutput {
    pub npv: Money,
    /// Discount rate actually applied per period
    pub period_rate: Rate,
}

/// NPV of a schedule at an annual discount rate, converted to the
/// schedule's periodicity by compounding equivalence.
pub fn compute_npv(
    schedule: &CashFlowSchedule,
    annual_rate: Rate,
    periodicity: Periodicity,
) -> FinToolboxResult<NpvOutput> {
    let period_rate = deannualize(annual_rate, periodicity)?;
    let npv = time_value::npv(period_rate, &schedule.items)?;
    Ok(NpvOutput { npv, period_rate })
}

pub fn analyze_npv(input: &NpvInput) -> FinToolboxResult<ComputationOutput<NpvOutput>> {
    let start = Instant::now();

    validate_cash_flow_schedule(&input.cash_flows)?;
    let output = compute_npv(&input.cash_flows, input.discount_rate, input.periodicity)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "NPV = sum(amount / (1 + r)^period), r = (1 + annual)^(1/n) - 1",
        &serde_json::json!({
            "discount_rate": input.discount_rate.to_string(),
            "periods_per_year": input.periodicity.periods_per_year(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_yearly_npv_uses_rate_directly() {
        let s = CashFlowSchedule::from_amounts(&[dec!(-1000), dec!(1210)]);
        let out = compute_npv(&s, dec!(0.10), Periodicity::Yearly).unwrap();
        assert_eq!(out.period_rate, dec!(0.10));
        assert_eq!(out.npv, dec!(100));
    }

    #[test]
    fn test_quarterly_npv_one_year_out() {
        // four quarters at the quarterly equivalent of 10% is one year at 10%
        let s = CashFlowSchedule::new(vec![
            crate::types::CashFlowItem::new(0, dec!(-1000)),
            crate::types::CashFlowItem::new(4, dec!(1100)),
        ]);
        let out = compute_npv(&s, dec!(0.10), Periodicity::Quarterly).unwrap();
        assert!(out.npv.abs() < dec!(0.000001), "got {}", out.npv);
    }

    #[test]
    fn test_analyze_npv_validates_first() {
        let input = NpvInput {
            cash_flows: CashFlowSchedule::from_amounts(&[dec!(10), dec!(20)]),
            discount_rate: dec!(0.05),
            periodicity: Periodicity::Yearly,
        };
        assert!(analyze_npv(&input).is_err());
    }
}
