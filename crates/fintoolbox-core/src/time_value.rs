use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal;
use crate::error::FinToolboxError;
use crate::types::{CashFlowItem, Money, Rate};
use crate::FinToolboxResult;

/// Discount factor `(1 + rate)^period` for a non-negative period.
pub fn growth_factor(rate: Rate, period: i64) -> FinToolboxResult<Decimal> {
    if period < 0 {
        return Err(FinToolboxError::InvalidInput {
            field: "period".into(),
            reason: format!("period {period} is before time zero"),
        });
    }
    decimal::powu(decimal::add(Decimal::ONE, rate)?, period as u64)
}

/// Net Present Value of cash flows placed at explicit periods
pub fn npv(rate: Rate, cash_flows: &[CashFlowItem]) -> FinToolboxResult<Money> {
    if rate <= dec!(-1) {
        return Err(FinToolboxError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let discounted = cash_flows
        .iter()
        .map(|cf| {
            let discount = growth_factor(rate, cf.period)?;
            if discount.is_zero() {
                return Err(FinToolboxError::DivisionByZero {
                    context: format!("NPV discount factor at period {}", cf.period),
                });
            }
            decimal::div(cf.amount, discount)
        })
        .collect::<FinToolboxResult<Vec<Money>>>()?;

    decimal::sum(discounted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CashFlowSchedule;
    use rust_decimal_macros::dec;

    #[test]
    fn test_npv_basic() {
        let cfs = CashFlowSchedule::from_amounts(&[dec!(-1000), dec!(300), dec!(400), dec!(500)]);
        let result = npv(dec!(0.10), &cfs.items).unwrap();
        // -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.0368
        assert!((result - dec!(-21.0368)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = CashFlowSchedule::from_amounts(&[dec!(-100), dec!(50), dec!(50), dec!(50)]);
        let result = npv(dec!(0.0), &cfs.items).unwrap();
        assert_eq!(result, dec!(50));
    }

    #[test]
    fn test_npv_sparse_periods() {
        // 1210 received two periods out is worth exactly 1000 today at 10%
        let cfs = vec![CashFlowItem::new(0, dec!(-1000)), CashFlowItem::new(2, dec!(1210))];
        assert_eq!(npv(dec!(0.10), &cfs).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_npv_rejects_total_loss_rate() {
        let cfs = vec![CashFlowItem::new(0, dec!(-1)), CashFlowItem::new(1, dec!(2))];
        assert!(npv(dec!(-1), &cfs).is_err());
    }

    #[test]
    fn test_npv_rejects_negative_period() {
        let cfs = vec![CashFlowItem::new(-1, dec!(-1)), CashFlowItem::new(1, dec!(2))];
        assert!(npv(dec!(0.05), &cfs).is_err());
    }
}
