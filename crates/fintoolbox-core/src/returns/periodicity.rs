use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal;
use crate::types::Rate;
use crate::FinToolboxResult;

/// Spacing between consecutive cash-flow periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    #[default]
    Yearly,
    Quarterly,
    Monthly,
}

impl Periodicity {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Periodicity::Yearly => 1,
            Periodicity::Quarterly => 4,
            Periodicity::Monthly => 12,
        }
    }
}

/// Per-period rate to effective annual rate: `(1 + r)^n - 1`.
pub fn annualize(period_rate: Rate, periodicity: Periodicity) -> FinToolboxResult<Rate> {
    if periodicity == Periodicity::Yearly {
        return Ok(period_rate);
    }
    let n = u64::from(periodicity.periods_per_year());
    let grown = decimal::powu(decimal::add(Decimal::ONE, period_rate)?, n)?;
    decimal::sub(grown, Decimal::ONE)
}

/// Effective annual rate to per-period rate: `(1 + r)^(1/n) - 1`.
pub fn deannualize(annual_rate: Rate, periodicity: Periodicity) -> FinToolboxResult<Rate> {
    if periodicity == Periodicity::Yearly {
        return Ok(annual_rate);
    }
    let exponent = decimal::div(Decimal::ONE, Decimal::from(periodicity.periods_per_year()))?;
    let root = decimal::powd(decimal::add(Decimal::ONE, annual_rate)?, exponent)?;
    decimal::sub(root, Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EPS: Decimal = dec!(0.000000001);

    #[test]
    fn test_yearly_is_identity() {
        assert_eq!(annualize(dec!(0.0731), Periodicity::Yearly).unwrap(), dec!(0.0731));
        assert_eq!(deannualize(dec!(0.0731), Periodicity::Yearly).unwrap(), dec!(0.0731));
    }

    #[test]
    fn test_annualize_monthly() {
        // 1% a month compounds to 12.6825...% a year
        let annual = annualize(dec!(0.01), Periodicity::Monthly).unwrap();
        assert!((annual - dec!(0.126825030131969720661201)).abs() < EPS);
    }

    #[test]
    fn test_annualize_quarterly_exact() {
        // 1.05^4 = 1.21550625
        assert_eq!(annualize(dec!(0.05), Periodicity::Quarterly).unwrap(), dec!(0.21550625));
    }

    #[test]
    fn test_deannualize_inverts_annualize() {
        for periodicity in [Periodicity::Quarterly, Periodicity::Monthly] {
            let per_period = deannualize(dec!(0.10), periodicity).unwrap();
            let back = annualize(per_period, periodicity).unwrap();
            assert!((back - dec!(0.10)).abs() < EPS, "{periodicity:?}: {back}");
        }
    }

    #[test]
    fn test_serde_names() {
        let p: Periodicity = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(p, Periodicity::Quarterly);
        assert_eq!(p.periods_per_year(), 4);
    }
}
