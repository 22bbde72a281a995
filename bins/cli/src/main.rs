//! Divvy CLI
//!
//! Reads a group snapshot (JSON) and prints balances, suggested settlements or
//! a per-member summary.

mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use divvy_core::{BalanceEngine, Group};
use divvy_shared::config::{LogConfig, OutputFormat};
use divvy_shared::types::Currency;
use divvy_shared::{AppConfig, AppError};

use report::Report;

#[derive(Parser, Debug)]
#[command(name = "divvy", version)]
#[command(about = "Balances and debt simplification for shared-expense groups")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Net balance of every member.
    Balances(ReportArgs),
    /// Fewest transfers that settle the group.
    SettleUp(ReportArgs),
    /// Balance of every member with what they pay and receive.
    Summary(ReportArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Group snapshot (JSON).
    file: PathBuf,
    /// Output format; defaults to `display.format` from configuration.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Currency for display; defaults to the group's own.
    #[arg(long)]
    currency: Option<Currency>,
    /// Fail when member balances do not cancel out.
    #[arg(long)]
    strict: bool,
}

impl Command {
    fn args(&self) -> &ReportArgs {
        match self {
            Self::Balances(args) | Self::SettleUp(args) | Self::Summary(args) => args,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log);

    let output = run(&cli.command, &config).inspect_err(|err| {
        if let Some(app_err) = err.downcast_ref::<AppError>() {
            error!(code = app_err.error_code(), "{app_err}");
        }
    })?;
    print!("{output}");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // Reports go to stdout, logs to stderr.
    if log.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(command: &Command, config: &AppConfig) -> anyhow::Result<String> {
    let args = command.args();
    let (group, snapshot_currency) = load_group(&args.file)?;
    info!(
        group = %group.id,
        members = group.members.len(),
        expenses = group.expenses.len(),
        settlements = group.settlements.len(),
        "loaded group"
    );

    let currency = args
        .currency
        .or(snapshot_currency)
        .unwrap_or(config.display.currency);
    let format = args.format.unwrap_or(config.display.format);
    let strict = args.strict || config.engine.strict;
    let engine = BalanceEngine::from_config(&config.engine);
    debug!(tolerance = %engine.tolerance(), strict, "engine ready");

    let report = build_report(command, &engine, &group, strict).map_err(AppError::from)?;
    match format {
        OutputFormat::Text => Ok(report.to_text(&group.members, currency)),
        OutputFormat::Json => Ok(report.to_json()? + "\n"),
    }
}

fn build_report(
    command: &Command,
    engine: &BalanceEngine,
    group: &Group,
    strict: bool,
) -> Result<Report, divvy_core::BalanceError> {
    let balances =
        engine.calculate_member_balances(&group.members, &group.expenses, &group.settlements);

    Ok(match command {
        Command::Balances(_) => Report::Balances(balances),
        Command::SettleUp(_) if strict => Report::SettleUp(engine.try_simplify_debts(&balances)?),
        Command::SettleUp(_) => Report::SettleUp(engine.simplify_debts(&balances)),
        Command::Summary(_) if strict => Report::Summary(engine.try_balance_summary(
            &group.members,
            &group.expenses,
            &group.settlements,
        )?),
        Command::Summary(_) => Report::Summary(engine.balance_summary(
            &group.members,
            &group.expenses,
            &group.settlements,
        )),
    })
}

fn load_group(path: &Path) -> anyhow::Result<(Group, Option<Currency>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_group(&raw).with_context(|| format!("invalid group snapshot in {}", path.display()))
}

/// Parses a snapshot, reporting the currency only when the snapshot names one.
///
/// A `null` currency counts as unnamed.
fn parse_group(raw: &str) -> anyhow::Result<(Group, Option<Currency>)> {
    let mut value: serde_json::Value = serde_json::from_str(raw)?;
    let named = value
        .get("currency")
        .is_some_and(|currency| !currency.is_null());
    if !named {
        if let Some(object) = value.as_object_mut() {
            object.remove("currency");
        }
    }
    let group: Group = serde_json::from_value(value)?;
    let currency = named.then_some(group.currency);
    Ok((group, currency))
}
