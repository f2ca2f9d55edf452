use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// A single cash flow, `period` steps after time zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowItem {
    pub period: i64,
    pub amount: Money,
}

impl CashFlowItem {
    pub fn new(period: i64, amount: Money) -> Self {
        Self { period, amount }
    }
}

/// Ordered cash flows for one calculation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowSchedule {
    pub items: Vec<CashFlowItem>,
}

impl CashFlowSchedule {
    pub fn new(items: Vec<CashFlowItem>) -> Self {
        Self { items }
    }

    /// Build a schedule from amounts at consecutive periods 0, 1, 2, ...
    pub fn from_amounts(amounts: &[Money]) -> Self {
        let items = amounts
            .iter()
            .enumerate()
            .map(|(t, amount)| CashFlowItem::new(t as i64, *amount))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CashFlowItem> {
        self.items.iter()
    }

    pub fn has_positive(&self) -> bool {
        self.items.iter().any(|cf| cf.amount > Decimal::ZERO)
    }

    pub fn has_negative(&self) -> bool {
        self.items.iter().any(|cf| cf.amount < Decimal::ZERO)
    }

    /// Largest period in the schedule (the horizon), or 0 when empty.
    pub fn horizon(&self) -> i64 {
        self.items.iter().map(|cf| cf.period).max().unwrap_or(0)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
