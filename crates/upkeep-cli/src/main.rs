//! # upkeep CLI entry point
//!
//! Parses arguments, resolves configuration, installs logging and
//! dispatches to the subcommand handlers in the library crate.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use upkeep_cli::config::{Config, LogFormat};
use upkeep_cli::context::Context;
use upkeep_cli::output::{exit_code, user_message, EXIT_INTERNAL};
use upkeep_cli::personnel::{run_personnel, PersonnelArgs};
use upkeep_cli::property::{run_property, PropertyArgs};
use upkeep_cli::reporting::{run_analytics, run_dashboard, run_report, AnalyticsArgs, ReportArgs};
use upkeep_cli::work_order::{run_work_order, WorkOrderArgs};

/// Property maintenance records: properties, personnel, work orders and
/// the reports built from them.
#[derive(Parser, Debug)]
#[command(name = "upkeep", version, about, long_about = None)]
struct Cli {
    /// More log output. Repeat for more (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the collection files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log line format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage properties and their maintenance history.
    Property(PropertyArgs),

    /// Manage employees and contractors.
    Personnel(PersonnelArgs),

    /// Manage work orders, notes, attachments and assignment.
    WorkOrder(WorkOrderArgs),

    /// Maintenance trend, contractor performance and key metrics.
    Analytics(AnalyticsArgs),

    /// Headline counts for the current data.
    Dashboard,

    /// Export a report as CSV.
    Report(ReportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::resolve(cli.config.as_deref(), cli.data_dir.clone(), cli.log_format)
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::from(EXIT_INTERNAL);
        }
    };

    init_tracing(cli.verbose, config.log_format);
    tracing::debug!(data_dir = %config.data_dir.display(), "upkeep starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = Context::open(config)
        .map_err(anyhow::Error::from)
        .and_then(|ctx| dispatch(&cli.command, &ctx, &mut out));
    let _ = out.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = exit_code(&e);
            if code == EXIT_INTERNAL {
                tracing::error!("{e:#}");
            } else {
                tracing::debug!("{e:#}");
            }
            eprintln!("{}", user_message(&e));
            ExitCode::from(code)
        }
    }
}

fn dispatch(command: &Commands, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Commands::Property(args) => run_property(args, ctx, out),
        Commands::Personnel(args) => run_personnel(args, ctx, out),
        Commands::WorkOrder(args) => run_work_order(args, ctx, out),
        Commands::Analytics(args) => run_analytics(args, ctx, out),
        Commands::Dashboard => run_dashboard(ctx, out),
        Commands::Report(args) => run_report(args, ctx, out),
    }
}

/// `RUST_LOG` wins; otherwise `-v` steps up from `info`. Logs go to stderr
/// so stdout stays machine-readable.
fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.with_target(false).init(),
        LogFormat::Json => builder.json().init(),
    }
}
