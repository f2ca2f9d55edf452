use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fintoolbox_core::interest::{project_interest, projection::InterestInput};

use crate::input;

/// Arguments for the simple vs compound interest projection
#[derive(Args)]
pub struct InterestArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Initial principal (1,000 - 100,000,000)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual simple-interest rate as a decimal (0.001 - 0.20)
    #[arg(long)]
    pub simple_rate: Option<Decimal>,

    /// Annual compound-interest rate as a decimal (0.001 - 0.20)
    #[arg(long)]
    pub compound_rate: Option<Decimal>,

    /// Use one rate for both methods
    #[arg(long, conflicts_with_all = ["simple_rate", "compound_rate"])]
    pub rate: Option<Decimal>,

    /// Horizon in whole years (1 - 50)
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_interest(args: InterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let interest_input: InterestInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let simple_rate = args.simple_rate.or(args.rate);
            let compound_rate = args.compound_rate.or(args.rate);
            InterestInput {
                principal: args
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                simple_rate: simple_rate
                    .ok_or("--simple-rate or --rate is required (or provide --input)")?,
                compound_rate: compound_rate
                    .ok_or("--compound-rate or --rate is required (or provide --input)")?,
                years: args.years.ok_or("--years is required (or provide --input)")?,
            }
        }
    };

    let result = project_interest(&interest_input)?;
    Ok(serde_json::to_value(result)?)
}
