mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::compare::CompareArgs;
use commands::project::ProjectArgs;
use commands::sensitivity::SensitivityArgs;
use yojana_core::SchemeConstants;

/// Cash-flow and return analysis for subsidised solar projects
#[derive(Parser)]
#[command(
    name = "yojana",
    version,
    about = "Cash-flow and return analysis for subsidised solar projects",
    long_about = "Projects the 25-year gross, EMI, nominal and inflation-adjusted \
                  cash flows of a solar generation project under the scheme, and \
                  derives annualized returns, payback years, scenario comparisons \
                  and sensitivity sweeps."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML or JSON file overriding scheme constants
    #[arg(long, global = true)]
    scheme: Option<String>,

    /// Log debug diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Year-by-year gross, EMI, nominal and real cash flows
    CashFlows(ProjectArgs),
    /// Annualized return and payback year
    Returns(ProjectArgs),
    /// Investor outlay after loan and subsidy
    Investment(ProjectArgs),
    /// Compare DCR vs non-DCR, or nominal vs real
    Compare(CompareArgs),
    /// Sweep one input and report a return metric at each point
    Sensitivity(SensitivityArgs),
    /// Print the scheme constants in effect
    Scheme,
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

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scheme(path: Option<&str>) -> Result<SchemeConstants, Box<dyn std::error::Error>> {
    let scheme = match path {
        Some(p) => input::file::read_scheme(p)?,
        None => SchemeConstants::default(),
    };
    scheme.validate()?;
    Ok(scheme)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let scheme = match load_scheme(cli.scheme.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::CashFlows(args) => commands::project::run_cash_flows(args, &scheme),
        Commands::Returns(args) => commands::project::run_returns(args, &scheme),
        Commands::Investment(args) => commands::project::run_investment(args, &scheme),
        Commands::Compare(args) => commands::compare::run_compare(args, &scheme),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args, &scheme),
        Commands::Scheme => serde_json::to_value(&scheme).map_err(Into::into),
        Commands::Version => {
            println!("yojana {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            if let Some(serde_json::Value::Array(warnings)) = value.get("warnings") {
                for w in warnings.iter().filter_map(|w| w.as_str()) {
                    tracing::warn!("{w}");
                }
            }
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
