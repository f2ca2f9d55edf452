mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assessment::AssessArgs;
use commands::interest::InterestArgs;
use commands::returns::{IrrArgs, MirrArgs, NpvArgs, ValidateArgs};

/// Retail financial calculators with decimal precision
#[derive(Parser)]
#[command(
    name = "ftb",
    version,
    about = "Retail financial calculators with decimal precision",
    long_about = "Compare simple and compound interest, validate cash-flow schedules, \
                  compute IRR, MIRR and NPV over yearly, quarterly or monthly periods, \
                  and score a household financial-risk questionnaire."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project simple vs compound interest year by year
    Interest(InterestArgs),
    /// Check a cash-flow schedule without computing anything
    ValidateCashFlows(ValidateArgs),
    /// Internal rate of return (Newton-Raphson)
    Irr(IrrArgs),
    /// Modified IRR with finance and reinvestment rates
    Mirr(MirrArgs),
    /// Net present value at an annual discount rate
    Npv(NpvArgs),
    /// Score a household financial-risk questionnaire
    Assess(AssessArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Interest(args) => commands::interest::run_interest(args),
        Commands::ValidateCashFlows(args) => commands::returns::run_validate(args),
        Commands::Irr(args) => commands::returns::run_irr(args),
        Commands::Mirr(args) => commands::returns::run_mirr(args),
        Commands::Npv(args) => commands::returns::run_npv(args),
        Commands::Assess(args) => commands::assessment::run_assess(args),
        Commands::Version => {
            println!("ftb {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
