use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fintoolbox_core::returns::irr::IrrInput;
use fintoolbox_core::returns::mirr::MirrInput;
use fintoolbox_core::returns::npv::NpvInput;
use fintoolbox_core::returns::{
    analyze_irr, analyze_mirr, analyze_npv, validate_cash_flow_schedule, Periodicity,
};
use fintoolbox_core::CashFlowSchedule;

use crate::input;

/// Spacing between cash-flow periods
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Frequency {
    Yearly,
    Quarterly,
    Monthly,
}

impl From<Frequency> for Periodicity {
    fn from(f: Frequency) -> Self {
        match f {
            Frequency::Yearly => Periodicity::Yearly,
            Frequency::Quarterly => Periodicity::Quarterly,
            Frequency::Monthly => Periodicity::Monthly,
        }
    }
}

/// Flags shared by every cash-flow command
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amounts for periods 0, 1, 2, ... (comma-separated, e.g. "-1000,300,400,500")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<Decimal>>,

    /// Period spacing of the cash flows
    #[arg(long, value_enum, default_value_t = Frequency::Yearly)]
    pub periodicity: Frequency,
}

impl ScheduleArgs {
    fn schedule(&self) -> Result<CashFlowSchedule, Box<dyn std::error::Error>> {
        let amounts = self
            .cash_flows
            .as_deref()
            .ok_or("--cash-flows is required (or provide --input)")?;
        Ok(CashFlowSchedule::from_amounts(amounts))
    }
}

/// Arguments for schedule validation
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
}

/// Arguments for the IRR calculation
#[derive(Args)]
pub struct IrrArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Starting per-period rate for the solver
    #[arg(long, allow_hyphen_values = true)]
    pub guess: Option<f64>,
}

/// Arguments for the MIRR calculation
#[derive(Args)]
pub struct MirrArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Annual rate paid to fund the outflows
    #[arg(long, allow_hyphen_values = true)]
    pub finance_rate: Option<Decimal>,

    /// Annual rate earned on reinvested inflows
    #[arg(long, allow_hyphen_values = true)]
    pub reinvest_rate: Option<Decimal>,
}

/// Arguments for the NPV calculation
#[derive(Args)]
pub struct NpvArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Annual discount rate
    #[arg(long, allow_hyphen_values = true)]
    pub discount_rate: Option<Decimal>,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule: CashFlowSchedule = match input::load::<Value>(args.schedule.input.as_deref())? {
        // accept either a bare schedule or any request object carrying one
        Some(Value::Object(mut map)) if map.contains_key("cash_flows") => {
            serde_json::from_value(map.remove("cash_flows").unwrap_or_default())?
        }
        Some(other) => serde_json::from_value(other)?,
        None => args.schedule.schedule()?,
    };

    validate_cash_flow_schedule(&schedule)?;
    Ok(json!({
        "result": {
            "valid": true,
            "entries": schedule.len(),
            "horizon": schedule.horizon(),
        }
    }))
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let irr_input: IrrInput = match input::load(args.schedule.input.as_deref())? {
        Some(parsed) => parsed,
        None => IrrInput {
            cash_flows: args.schedule.schedule()?,
            periodicity: args.schedule.periodicity.into(),
            guess: args.guess,
        },
    };

    let result = analyze_irr(&irr_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_mirr(args: MirrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mirr_input: MirrInput = match input::load(args.schedule.input.as_deref())? {
        Some(parsed) => parsed,
        None => MirrInput {
            cash_flows: args.schedule.schedule()?,
            finance_rate: args
                .finance_rate
                .ok_or("--finance-rate is required (or provide --input)")?,
            reinvest_rate: args
                .reinvest_rate
                .ok_or("--reinvest-rate is required (or provide --input)")?,
            periodicity: args.schedule.periodicity.into(),
        },
    };

    let result = analyze_mirr(&mirr_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let npv_input: NpvInput = match input::load(args.schedule.input.as_deref())? {
        Some(parsed) => parsed,
        None => NpvInput {
            cash_flows: args.schedule.schedule()?,
            discount_rate: args
                .discount_rate
                .ok_or("--discount-rate is required (or provide --input)")?,
            periodicity: args.schedule.periodicity.into(),
        },
    };

    let result = analyze_npv(&npv_input)?;
    Ok(serde_json::to_value(result)?)
}
