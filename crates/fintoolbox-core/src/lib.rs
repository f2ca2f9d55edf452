pub mod decimal;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "interest")]
pub mod interest;

#[cfg(feature = "returns")]
pub mod returns;

#[cfg(feature = "assessment")]
pub mod assessment;

pub use error::{FinToolboxError, ValidationError};
pub use types::*;

/// Standard result type for all fintoolbox operations
pub type FinToolboxResult<T> = Result<T, FinToolboxError>;
