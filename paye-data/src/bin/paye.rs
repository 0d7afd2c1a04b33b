use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use paye_core::{UserInput, compute, validate_input};
use paye_data::{CONFIG_ENV_VAR, ConfigLoader, parse_amount, parse_rate, render_report};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// PAYE calculator for salaried employees.
///
/// Amounts are monthly unless `--annual` is given; `--rent` is always the
/// yearly rent. Amounts accept thousands separators (`1,200,000`) and rates
/// accept fractions (`0.08`) or percentages (`8%`).
#[derive(Debug, Parser)]
#[command(name = "paye")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML tax configuration; the built-in 2026 schedule is used when absent.
    #[arg(long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Treat income and other deductions as annual figures.
    #[arg(long, default_value_t = false)]
    annual: bool,

    /// Employee name.
    #[arg(long)]
    name: String,

    /// Basic salary.
    #[arg(long, value_parser = parse_amount)]
    basic: Decimal,

    /// Housing allowance.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    housing: Decimal,

    /// Transport allowance.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    transport: Decimal,

    /// Any other allowances.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    other_allowances: Decimal,

    /// Bonuses.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    bonuses: Decimal,

    /// Pension rate on basic salary; defaults to the config's rate.
    #[arg(long, value_parser = parse_rate)]
    pension_rate: Option<Decimal>,

    /// NHF rate on basic salary; defaults to the config's rate.
    #[arg(long, value_parser = parse_rate)]
    nhf_rate: Option<Decimal>,

    /// Other flat deductions, same periodicity as income.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    other_deductions: Decimal,

    /// Rent paid over the year.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    rent: Decimal,

    /// Do not claim rent relief even when rent is paid.
    #[arg(long, default_value_t = false)]
    no_rent_relief: bool,

    /// State of residence.
    #[arg(long, default_value = "Lagos")]
    state: String,

    /// Compute even when the input breaks an entry rule.
    #[arg(long, default_value_t = false)]
    skip_validation: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Writes to stderr so the report on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ConfigLoader::resolve(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load tax config: {}", path.display()),
            None => "Failed to build default tax config".to_string(),
        }
    })?;

    let input = UserInput {
        employee_name: cli.name,
        is_annual_mode: cli.annual,
        basic_salary: cli.basic,
        housing_allowance: cli.housing,
        transport_allowance: cli.transport,
        other_allowances: cli.other_allowances,
        bonuses: cli.bonuses,
        pension_rate: cli.pension_rate.unwrap_or(config.pension_default_rate),
        nhf_rate: cli.nhf_rate.unwrap_or(config.nhf_default_rate),
        other_deductions: cli.other_deductions,
        annual_rent: cli.rent,
        claims_rent_relief: !cli.no_rent_relief && cli.rent > Decimal::ZERO,
        state_of_residence: cli.state,
    };
    debug!(?input, "built input");

    let report = validate_input(&input);
    if !report.is_valid() {
        for violation in &report.violations {
            eprintln!("{violation}");
        }
        if !cli.skip_validation {
            bail!("input failed validation ({} problem(s))", report.violations.len());
        }
        warn!("computing despite validation failures");
    }

    let result = compute(&input, &config);
    print!("{}", render_report(&input, &result, &config));

    Ok(())
}
