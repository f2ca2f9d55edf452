use std::collections::BTreeMap;

use super::scoring::RiskTier;

/// Resolved answers: question id to a valid option value from the catalog.
pub type SelectedOptions = BTreeMap<&'static str, &'static str>;

/// Fires when every `(question, accepted values)` pair matches the
/// household's selected option.
struct Rule {
    when: &'static [(&'static str, &'static [&'static str])],
    text: &'static str,
}

impl Rule {
    fn fires(&self, selected: &SelectedOptions) -> bool {
        self.when.iter().all(|(question, accepted)| {
            selected
                .get(question)
                .is_some_and(|value| accepted.contains(value))
        })
    }
}

const HAS_ELDERLY: (&str, &[&str]) = ("elderly", &["one_side", "both_sides"]);
const HAS_CHILDREN: (&str, &[&str]) = ("children", &["one_child", "multiple_children"]);

/// One group per topic, in questionnaire order. Only the first firing rule
/// of a group contributes.
static RULE_GROUPS: &[&[Rule]] = &[
    &[
        Rule {
            when: &[("housing", &["renting"])],
            text: "Prioritise buying a home or building savings to make your assets more stable",
        },
        Rule {
            when: &[("housing", &["own_with_loan"])],
            text: "Keep an eye on mortgage rate changes and plan repayments carefully",
        },
    ],
    &[
        Rule {
            when: &[("loan", &["heavy_loan"])],
            text: "Debt pressure is high; pay down high-interest loans first to cut financial risk",
        },
        Rule {
            when: &[("loan", &["small_loan"])],
            text: "Keep borrowing under control and avoid over-leverage",
        },
    ],
    &[
        Rule {
            when: &[HAS_ELDERLY, HAS_CHILDREN],
            text: "Supporting parents and children at once: build solid family protection and an education fund",
        },
        Rule {
            when: &[HAS_ELDERLY],
            text: "Consider medical and accident cover for your parents to ease healthcare costs",
        },
        Rule {
            when: &[HAS_CHILDREN],
            text: "Consider an education fund and critical-illness cover for your children",
        },
    ],
    &[
        Rule {
            when: &[("insurance", &["minimal"])],
            text: "Insurance cover is seriously lacking; prioritise critical-illness, medical and accident cover",
        },
        Rule {
            when: &[("insurance", &["partial"])],
            text: "Insurance cover has gaps; add the missing types of protection",
        },
    ],
    &[
        Rule {
            when: &[("emergency_fund", &["insufficient"])],
            text: "Emergency fund is too small; hold at least 3-6 months of living expenses",
        },
        Rule {
            when: &[("emergency_fund", &["moderate"])],
            text: "Keep growing the emergency fund to improve resilience",
        },
    ],
    &[
        Rule {
            when: &[("income_stability", &["unstable"])],
            text: "Income is unstable; add passive income sources and favour low-risk investments",
        },
        Rule {
            when: &[("income_stability", &["moderate"])],
            text: "Invest in your career skills to make income more stable",
        },
    ],
];

pub const DEFAULT_SUGGESTION: &str =
    "Review your household finances regularly and adjust your plan in time";

fn closing_suggestion(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => {
            "Overall financial risk is high; fix the riskiest items first and draw up a full financial plan"
        }
        RiskTier::Medium => {
            "There is room for improvement; optimise your asset allocation step by step"
        }
        RiskTier::Low => {
            "Finances are in good shape; keep the current allocation and consider investing a little more"
        }
    }
}

/// Topic suggestions (or the default when none apply) followed by exactly
/// one closing suggestion for the tier. Never empty.
pub fn generate_suggestions(selected: &SelectedOptions, tier: RiskTier) -> Vec<String> {
    let mut suggestions: Vec<String> = RULE_GROUPS
        .iter()
        .filter_map(|group| group.iter().find(|rule| rule.fires(selected)))
        .map(|rule| rule.text.to_string())
        .collect();

    if suggestions.is_empty() {
        suggestions.push(DEFAULT_SUGGESTION.to_string());
    }
    suggestions.push(closing_suggestion(tier).to_string());
    suggestions
}
