use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinToolboxError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Cash flow schedule rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinToolboxError {
    fn from(e: serde_json::Error) -> Self {
        FinToolboxError::SerializationError(e.to_string())
    }
}

/// Structural defects in a cash-flow schedule.
///
/// Only the first violated rule is ever reported; see
/// [`crate::returns::cash_flow::validate_cash_flow_schedule`] for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("at least 2 cash flow entries are required, got {count}")]
    TooFewEntries { count: usize },

    #[error("entry {}: period must not be negative", .index + 1)]
    NegativePeriod { index: usize },

    #[error("entry {}: amount must be between -100,000,000 and 100,000,000", .index + 1)]
    AmountOutOfRange { index: usize },

    #[error("cash flows must contain at least one positive amount (a return)")]
    MissingPositiveFlow,

    #[error("cash flows must contain at least one negative amount (an investment)")]
    MissingNegativeFlow,

    #[error("period {period} appears more than once")]
    DuplicatePeriod { period: i64 },
}
