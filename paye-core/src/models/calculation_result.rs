use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBand;

/// The slice of chargeable income that fell into one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandBreakdown {
    pub band: TaxBand,
    pub taxable_in_band: Decimal,
    pub tax_paid: Decimal,
}

/// Snapshot produced by one engine run.
///
/// All amounts are unrounded; only `explanation` carries display rounding.
/// Consumers render these fields as-is rather than recomputing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub gross_annual: Decimal,
    pub gross_monthly: Decimal,

    pub annual_pension: Decimal,
    pub annual_nhf: Decimal,
    pub annual_other_deductions: Decimal,

    /// Annual rent as declared, echoed for reporting.
    pub rent_paid: Decimal,
    pub rent_relief: Decimal,

    pub total_allowable_deductions: Decimal,
    pub chargeable_income: Decimal,

    pub annual_paye: Decimal,
    pub monthly_paye: Decimal,

    pub annual_net_pay: Decimal,
    pub monthly_net_pay: Decimal,

    pub explanation: String,

    /// One entry per band visited, in ascending band order.
    pub band_breakdown: Vec<BandBreakdown>,
}

impl CalculationResult {
    /// Annual PAYE as a fraction of gross annual income, or zero when the
    /// ratio is undefined or outside the `Decimal` range.
    pub fn effective_rate(&self) -> Decimal {
        self.annual_paye
            .checked_div(self.gross_annual)
            .unwrap_or(Decimal::ZERO)
    }

    /// The highest band that received any of the chargeable income.
    pub fn marginal_band(&self) -> Option<&TaxBand> {
        self.band_breakdown
            .iter()
            .rev()
            .find(|entry| entry.taxable_in_band > Decimal::ZERO)
            .map(|entry| &entry.band)
    }
}
