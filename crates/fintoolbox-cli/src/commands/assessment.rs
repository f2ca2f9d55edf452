use clap::Args;
use serde_json::Value;

use fintoolbox_core::assessment::{assess_household, AssessmentInput, QUESTIONS};

use crate::input;

/// Arguments for the household risk assessment
#[derive(Args)]
pub struct AssessArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// One answer as question=option, repeatable (e.g. --answer housing=renting)
    #[arg(long = "answer", value_parser = parse_answer)]
    pub answers: Vec<(String, String)>,

    /// Print the questionnaire instead of scoring
    #[arg(long)]
    pub list_questions: bool,
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (question, option) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question=option, got '{raw}'"))?;
    Ok((question.trim().to_string(), option.trim().to_string()))
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.list_questions {
        return Ok(serde_json::to_value(QUESTIONS)?);
    }

    let assessment_input: AssessmentInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None if args.answers.is_empty() => {
            return Err("at least one --answer is required (or provide --input)".into());
        }
        None => AssessmentInput {
            answers: args.answers.into_iter().collect(),
        },
    };

    let result = assess_household(&assessment_input);
    Ok(serde_json::to_value(result)?)
}
