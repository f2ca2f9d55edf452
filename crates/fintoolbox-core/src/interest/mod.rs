pub mod inputs;
pub mod projection;

pub use projection::{
    compute_compound_interest, compute_interest_series, compute_simple_interest,
    project_interest,
};
