mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::investment::{AnalyzeArgs, CashFlowArgs, ExpensesArgs, MortgageArgs, RoiArgs};

/// Rental property investment calculations
#[derive(Parser)]
#[command(
    name = "rental",
    version,
    about = "Rental property investment calculations",
    long_about = "A CLI for analysing a rental property purchase with decimal precision. \
                  Computes the monthly mortgage payment, monthly operating expenses, \
                  annual cash flow and return on investment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation steps to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: mortgage, expenses, cash flow and ROI
    Analyze(AnalyzeArgs),
    /// Monthly mortgage payment
    Mortgage(MortgageArgs),
    /// Average monthly operating expenses
    Expenses(ExpensesArgs),
    /// Monthly and annual cash flow
    CashFlow(CashFlowArgs),
    /// Return on investment (%)
    Roi(RoiArgs),
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

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::investment::run_analyze(args),
        Commands::Mortgage(args) => commands::investment::run_mortgage(args),
        Commands::Expenses(args) => commands::investment::run_expenses(args),
        Commands::CashFlow(args) => commands::investment::run_cash_flow(args),
        Commands::Roi(args) => commands::investment::run_roi(args),
        Commands::Version => {
            println!("rental {}", env!("CARGO_PKG_VERSION"));
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
