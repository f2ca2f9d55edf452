use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// Area of household finances a question measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Housing,
    Debt,
    Family,
    Insurance,
    Savings,
    Income,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 6] = [
        RiskCategory::Housing,
        RiskCategory::Debt,
        RiskCategory::Family,
        RiskCategory::Insurance,
        RiskCategory::Savings,
        RiskCategory::Income,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
    /// Risk points for choosing this option; higher is riskier
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssessmentQuestion {
    pub id: &'static str,
    pub category: RiskCategory,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
    pub weight: Decimal,
}

impl AssessmentQuestion {
    pub fn option(&self, value: &str) -> Option<&'static AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }
}

const fn opt(value: &'static str, label: &'static str, score: u32) -> AnswerOption {
    AnswerOption {
        value,
        label,
        score,
    }
}

// ---------------------------------------------------------------------------
// Questionnaire
// ---------------------------------------------------------------------------

pub static QUESTIONS: &[AssessmentQuestion] = &[
    AssessmentQuestion {
        id: "housing",
        category: RiskCategory::Housing,
        prompt: "What is your housing situation?",
        options: &[
            opt("own_no_loan", "Own, no mortgage", 10),
            opt("own_with_loan", "Own, with mortgage", 30),
            opt("renting", "Renting", 50),
        ],
        weight: dec!(1.5),
    },
    AssessmentQuestion {
        id: "loan",
        category: RiskCategory::Debt,
        prompt: "Apart from a mortgage, do you carry other loans?",
        options: &[
            opt("no_loan", "No loans", 0),
            opt("small_loan", "Small (< 30% of annual income)", 20),
            opt("heavy_loan", "Heavy (>= 30% of annual income)", 40),
        ],
        weight: dec!(1.2),
    },
    AssessmentQuestion {
        id: "elderly",
        category: RiskCategory::Family,
        prompt: "Do you support elderly parents?",
        options: &[
            opt("no", "No", 0),
            opt("one_side", "Yes, one side of the family", 15),
            opt("both_sides", "Yes, both sides of the family", 30),
        ],
        weight: dec!(1.0),
    },
    AssessmentQuestion {
        id: "children",
        category: RiskCategory::Family,
        prompt: "How many children do you raise?",
        options: &[
            opt("no_children", "None", 0),
            opt("one_child", "One", 15),
            opt("multiple_children", "Two or more", 30),
        ],
        weight: dec!(1.0),
    },
    AssessmentQuestion {
        id: "insurance",
        category: RiskCategory::Insurance,
        prompt: "How complete is your household insurance cover?",
        options: &[
            opt("comprehensive", "Comprehensive (critical illness, medical, accident, life)", 0),
            opt("partial", "Partial", 25),
            opt("minimal", "Social insurance only or none", 50),
        ],
        weight: dec!(1.8),
    },
    AssessmentQuestion {
        id: "emergency_fund",
        category: RiskCategory::Savings,
        prompt: "How large is your emergency fund?",
        options: &[
            opt("sufficient", "Sufficient (6+ months of expenses)", 0),
            opt("moderate", "Moderate (3-6 months of expenses)", 20),
            opt("insufficient", "Insufficient (< 3 months of expenses)", 40),
        ],
        weight: dec!(1.3),
    },
    AssessmentQuestion {
        id: "income_stability",
        category: RiskCategory::Income,
        prompt: "How stable is household income?",
        options: &[
            opt("stable", "Stable (two earners or steady business)", 0),
            opt("moderate", "Moderate (single earner or variable pay)", 25),
            opt("unstable", "Unstable (freelance or start-up)", 40),
        ],
        weight: dec!(1.4),
    },
];

pub fn find_question(id: &str) -> Option<&'static AssessmentQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Weighted score of a household that picks the riskiest option everywhere.
pub fn max_possible_score() -> Decimal {
    QUESTIONS
        .iter()
        .map(|q| Decimal::from(q.max_score()) * q.weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_max_possible_score() {
        assert_eq!(max_possible_score(), dec!(381));
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_every_category_is_covered() {
        for category in RiskCategory::ALL {
            assert!(
                QUESTIONS.iter().any(|q| q.category == category),
                "{category:?} has no question"
            );
        }
    }

    #[test]
    fn test_option_lookup() {
        let q = find_question("insurance").unwrap();
        assert_eq!(q.option("partial").map(|o| o.score), Some(25));
        assert!(q.option("Partial").is_none());
        assert!(find_question("pets").is_none());
    }
}
