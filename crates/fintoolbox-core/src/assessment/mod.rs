pub mod catalog;
pub mod scoring;
pub mod suggestions;

pub use catalog::{max_possible_score, AssessmentQuestion, RiskCategory, QUESTIONS};
pub use scoring::{
    assess_household, compute_assessment, AssessmentAnswers, AssessmentInput, AssessmentResult,
    RiskTier,
};
