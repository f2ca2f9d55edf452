use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use super::catalog::{find_question, max_possible_score, RiskCategory, QUESTIONS};
use super::suggestions::{generate_suggestions, SelectedOptions};
use crate::decimal::round_score;
use crate::types::{with_metadata, ComputationOutput};

/// Question id to the selected option value. May be partial.
pub type AssessmentAnswers = BTreeMap<String, String>;

const LOW_TIER_MAX: Decimal = dec!(30);
const MEDIUM_TIER_MAX: Decimal = dec!(60);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Tier for a 0-100 score already rounded to one decimal place.
    pub fn from_score(score: Decimal) -> Self {
        if score <= LOW_TIER_MAX {
            RiskTier::Low
        } else if score <= MEDIUM_TIER_MAX {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskTier::Low => "Household finances are in good shape",
            RiskTier::Medium => "Household finances are under some pressure",
            RiskTier::High => "Household finances are under heavy pressure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Weighted risk score normalised to 0-100, one decimal place
    pub total_score: Decimal,
    pub risk_tier: RiskTier,
    pub tier_description: String,
    /// Raw option score per category; 0 where nothing was answered
    pub category_scores: BTreeMap<RiskCategory, Decimal>,
    pub suggestions: Vec<String>,
    pub answered_questions: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default)]
    pub answers: AssessmentAnswers,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Only answers naming a catalog question and one of its options count.
fn resolve_answers(answers: &AssessmentAnswers) -> SelectedOptions {
    QUESTIONS
        .iter()
        .filter_map(|q| {
            let option = answers.get(q.id).and_then(|value| q.option(value))?;
            Some((q.id, option.value))
        })
        .collect()
}

/// Score a (possibly partial) questionnaire. Unknown question ids and
/// option values are treated as unanswered.
pub fn compute_assessment(answers: &AssessmentAnswers) -> AssessmentResult {
    let selected = resolve_answers(answers);

    let mut weighted = Decimal::ZERO;
    let mut category_scores: BTreeMap<RiskCategory, Decimal> = RiskCategory::ALL
        .iter()
        .map(|c| (*c, Decimal::ZERO))
        .collect();

    for question in QUESTIONS {
        let Some(option) = selected
            .get(question.id)
            .and_then(|value| question.option(value))
        else {
            continue;
        };
        let score = Decimal::from(option.score);
        weighted += score * question.weight;
        // categories shared by two questions keep the later one
        category_scores.insert(question.category, score);
    }

    let total_score = round_score(weighted * dec!(100) / max_possible_score());
    let risk_tier = RiskTier::from_score(total_score);
    debug!(
        "assessment: answered={} weighted={weighted} score={total_score} tier={risk_tier:?}",
        selected.len()
    );

    AssessmentResult {
        total_score,
        risk_tier,
        tier_description: risk_tier.description().to_string(),
        category_scores,
        suggestions: generate_suggestions(&selected, risk_tier),
        answered_questions: selected.len(),
    }
}

/// Score a questionnaire and wrap it with methodology and warnings about
/// answers that were ignored or missing.
pub fn assess_household(input: &AssessmentInput) -> ComputationOutput<AssessmentResult> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for (id, value) in &input.answers {
        match find_question(id) {
            None => warnings.push(format!("Ignored answer for unknown question '{id}'")),
            Some(q) if q.option(value).is_none() => warnings.push(format!(
                "Ignored unknown option '{value}' for question '{id}'"
            )),
            Some(_) => {}
        }
    }

    let result = compute_assessment(&input.answers);
    if result.answered_questions < QUESTIONS.len() {
        warnings.push(format!(
            "{} of {} questions answered; unanswered questions add no risk",
            result.answered_questions,
            QUESTIONS.len()
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Weighted questionnaire: sum(option score x weight) / max possible x 100; tiers <=30 low, <=60 medium, else high",
        &serde_json::json!({
            "questions": QUESTIONS.len(),
            "max_possible_score": max_possible_score().to_string(),
        }),
        warnings,
        elapsed,
        result,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn answers(pairs: &[(&str, &str)]) -> AssessmentAnswers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_answers() {
        let r = compute_assessment(&AssessmentAnswers::new());
        assert_eq!(r.total_score, Decimal::ZERO);
        assert_eq!(r.risk_tier, RiskTier::Low);
        assert_eq!(r.answered_questions, 0);
        assert_eq!(r.category_scores.len(), 6);
        assert!(r.category_scores.values().all(|s| s.is_zero()));
        assert_eq!(r.suggestions.len(), 2);
    }

    #[test]
    fn test_renting_only() {
        // 50 * 1.5 / 381 * 100 = 19.685...
        let r = compute_assessment(&answers(&[("housing", "renting")]));
        assert_eq!(r.total_score, dec!(19.7));
        assert_eq!(r.category_scores[&RiskCategory::Housing], dec!(50));
    }

    #[test]
    fn test_mortgage_and_small_loan() {
        // (30 * 1.5 + 20 * 1.2) / 381 * 100 = 18.11...
        let r = compute_assessment(&answers(&[("housing", "own_with_loan"), ("loan", "small_loan")]));
        assert_eq!(r.total_score, dec!(18.1));
        assert_eq!(r.category_scores[&RiskCategory::Debt], dec!(20));
        assert_eq!(r.suggestions.len(), 3);
    }

    #[test]
    fn test_riskiest_answers_score_one_hundred() {
        let r = compute_assessment(&answers(&[
            ("housing", "renting"),
            ("loan", "heavy_loan"),
            ("elderly", "both_sides"),
            ("children", "multiple_children"),
            ("insurance", "minimal"),
            ("emergency_fund", "insufficient"),
            ("income_stability", "unstable"),
        ]));
        assert_eq!(r.total_score, dec!(100));
        assert_eq!(r.risk_tier, RiskTier::High);
        assert_eq!(r.answered_questions, 7);
        assert_eq!(r.suggestions.len(), 7);
    }

    #[test]
    fn test_family_category_takes_last_question() {
        let r = compute_assessment(&answers(&[("elderly", "both_sides"), ("children", "one_child")]));
        assert_eq!(r.category_scores[&RiskCategory::Family], dec!(15));

        let r = compute_assessment(&answers(&[("elderly", "both_sides")]));
        assert_eq!(r.category_scores[&RiskCategory::Family], dec!(30));
    }

    #[test]
    fn test_unknown_entries_are_ignored() {
        let r = compute_assessment(&answers(&[("pets", "dog"), ("housing", "castle")]));
        assert_eq!(r.total_score, Decimal::ZERO);
        assert_eq!(r.answered_questions, 0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_score(dec!(30.0)), RiskTier::Low);
        assert_eq!(RiskTier::from_score(dec!(30.1)), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(dec!(60.0)), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(dec!(60.1)), RiskTier::High);
    }

    #[test]
    fn test_assess_household_warnings() {
        let input = AssessmentInput {
            answers: answers(&[("housing", "renting"), ("pets", "cat"), ("loan", "lots")]),
        };
        let out = assess_household(&input);
        assert_eq!(out.result.answered_questions, 1);
        assert_eq!(out.warnings.len(), 3);
        assert!(out.warnings[0].contains("'loan'"));
        assert!(out.warnings[1].contains("'pets'"));
        assert!(out.warnings[2].starts_with("1 of 7"));
    }
}
