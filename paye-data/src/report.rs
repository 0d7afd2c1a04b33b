//! Plain-text rendering of a [`CalculationResult`].
//!
//! Every figure comes straight from the result; nothing is recomputed here.

use std::fmt::{self, Write};

use paye_core::calculations::common::{format_naira, format_percent};
use paye_core::{CalculationResult, TaxBand, TaxConfig, UserInput};

fn band_range(band: &TaxBand) -> String {
    match band.upper_bound {
        Some(upper) => format!("{} - {}", format_naira(band.lower_bound), format_naira(upper)),
        None => format!("above {}", format_naira(band.lower_bound)),
    }
}

fn line(
    out: &mut String,
    label: &str,
    annual: String,
    monthly: Option<String>,
) -> fmt::Result {
    writeln!(
        out,
        "{label:<28}{annual:>16}{:>16}",
        monthly.unwrap_or_default()
    )
}

/// Renders the summary, band breakdown and explanation for one employee.
pub fn render_report(
    input: &UserInput,
    result: &CalculationResult,
    config: &TaxConfig,
) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_report(&mut out, input, result, config);
    out
}

fn write_report(
    out: &mut String,
    input: &UserInput,
    result: &CalculationResult,
    config: &TaxConfig,
) -> fmt::Result {
    let name = if input.employee_name.trim().is_empty() {
        "(unnamed)"
    } else {
        input.employee_name.trim()
    };
    writeln!(out, "PAYE computation for {name} ({})", input.state_of_residence)?;
    writeln!(
        out,
        "Tax framework: {} (effective {})",
        config.version_name, config.effective_date
    )?;
    writeln!(out)?;

    writeln!(out, "{:<28}{:>16}{:>16}", "", "Annual", "Monthly")?;
    line(
        out,
        "Gross income",
        format_naira(result.gross_annual),
        Some(format_naira(result.gross_monthly)),
    )?;
    line(out, "Pension", format_naira(result.annual_pension), None)?;
    line(out, "NHF", format_naira(result.annual_nhf), None)?;
    line(
        out,
        "Other deductions",
        format_naira(result.annual_other_deductions),
        None,
    )?;
    line(out, "Rent relief", format_naira(result.rent_relief), None)?;
    line(
        out,
        "Total allowable deductions",
        format_naira(result.total_allowable_deductions),
        None,
    )?;
    line(
        out,
        "Chargeable income",
        format_naira(result.chargeable_income),
        None,
    )?;
    line(
        out,
        "PAYE",
        format_naira(result.annual_paye),
        Some(format_naira(result.monthly_paye)),
    )?;
    line(
        out,
        "Net pay",
        format_naira(result.annual_net_pay),
        Some(format_naira(result.monthly_net_pay)),
    )?;
    writeln!(
        out,
        "{:<28}{:>16}",
        "Effective rate",
        format_percent(result.effective_rate())
    )?;

    writeln!(out)?;
    writeln!(out, "Band breakdown")?;
    if result.band_breakdown.is_empty() {
        writeln!(out, "  (no bands configured)")?;
    }
    for entry in &result.band_breakdown {
        writeln!(
            out,
            "  {:<32}{:>8}{:>16}{:>16}",
            band_range(&entry.band),
            format_percent(entry.band.rate),
            format_naira(entry.taxable_in_band),
            format_naira(entry.tax_paid)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", result.explanation)
}
