//! The PAYE engine.
//!
//! A computation runs in a fixed order:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annualize the five income fields (x12 in monthly mode) into gross annual income |
//! | 2    | Pension and NHF off annual basic salary; annualize other deductions |
//! | 3    | Rent relief: percent of annual rent, capped, only when claimed |
//! | 4    | Chargeable income: gross minus all reliefs, floored at zero |
//! | 5    | Apportion chargeable income across the bands in ascending order |
//! | 6    | Monthly PAYE and monthly gross (annual / 12) |
//! | 7    | Net pay: gross minus PAYE, pension, NHF and other deductions |
//! | 8    | Explanation text with display-rounded amounts |
//!
//! Rent relief lowers the tax base but is not a cash outflow, so step 7
//! does not subtract it.
//!
//! Sums and products saturate at the `Decimal` range, so no input can make
//! a computation panic.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::{TaxConfig, UserInput, compute};
//!
//! let input = UserInput {
//!     employee_name: "Ada".to_string(),
//!     basic_salary: dec!(60000),
//!     housing_allowance: dec!(0),
//!     transport_allowance: dec!(0),
//!     other_allowances: dec!(0),
//!     claims_rent_relief: false,
//!     ..UserInput::default()
//! };
//!
//! let result = compute(&input, &TaxConfig::default());
//!
//! assert_eq!(result.gross_annual, dec!(720000));
//! assert_eq!(result.chargeable_income, dec!(644400));
//! assert_eq!(result.annual_paye, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::{MONTHS_PER_YEAR, format_naira, format_percent, max, min};
use crate::{BandBreakdown, CalculationResult, TaxConfig, UserInput};

/// Computes PAYE for `input` under `config`.
///
/// Shorthand for `PayeCalculator::new(config).calculate(input)`.
pub fn compute(
    input: &UserInput,
    config: &TaxConfig,
) -> CalculationResult {
    PayeCalculator::new(config).calculate(input)
}

/// Statutory and other reliefs, all annual.
#[derive(Debug, Clone, Copy)]
struct Reliefs {
    pension: Decimal,
    nhf: Decimal,
    other_deductions: Decimal,
    rent: Decimal,
}

impl Reliefs {
    fn total(&self) -> Decimal {
        self.pension
            .saturating_add(self.nhf)
            .saturating_add(self.other_deductions)
            .saturating_add(self.rent)
    }
}

/// Calculator bound to one tax configuration.
///
/// Holds no state between calls; the same calculator may be shared by any
/// number of callers.
#[derive(Debug, Clone)]
pub struct PayeCalculator<'a> {
    config: &'a TaxConfig,
}

impl<'a> PayeCalculator<'a> {
    pub fn new(config: &'a TaxConfig) -> Self {
        Self { config }
    }

    /// Runs the full computation. Never fails: degenerate inputs such as
    /// zero income or an empty band list give zero-valued results.
    pub fn calculate(
        &self,
        input: &UserInput,
    ) -> CalculationResult {
        let gross_annual = input.gross_annual();
        let reliefs = self.reliefs(input);

        let total_allowable_deductions = reliefs.total();
        let chargeable_income = self.chargeable_income(gross_annual, total_allowable_deductions);
        debug!(
            %gross_annual,
            %total_allowable_deductions,
            %chargeable_income,
            "computed chargeable income"
        );

        let (annual_paye, band_breakdown) = self.apportion(chargeable_income);
        let monthly_paye = annual_paye / MONTHS_PER_YEAR;

        let annual_net_pay = self.net_pay(gross_annual, annual_paye, &reliefs);
        let monthly_net_pay = annual_net_pay / MONTHS_PER_YEAR;

        let explanation = self.explanation(
            gross_annual,
            &reliefs,
            chargeable_income,
            annual_paye,
            monthly_net_pay,
        );

        CalculationResult {
            gross_annual,
            gross_monthly: gross_annual / MONTHS_PER_YEAR,
            annual_pension: reliefs.pension,
            annual_nhf: reliefs.nhf,
            annual_other_deductions: reliefs.other_deductions,
            rent_paid: input.annual_rent,
            rent_relief: reliefs.rent,
            total_allowable_deductions,
            chargeable_income,
            annual_paye,
            monthly_paye,
            annual_net_pay,
            monthly_net_pay,
            explanation,
            band_breakdown,
        }
    }

    /// Pension and NHF are levied on basic salary only, never on gross.
    fn reliefs(
        &self,
        input: &UserInput,
    ) -> Reliefs {
        let periods = input.periods_per_year();
        let annual_basic = input.basic_salary.saturating_mul(periods);

        Reliefs {
            pension: annual_basic.saturating_mul(input.pension_rate),
            nhf: annual_basic.saturating_mul(input.nhf_rate),
            other_deductions: input.other_deductions.saturating_mul(periods),
            rent: self.rent_relief(input.claims_rent_relief, input.annual_rent),
        }
    }

    /// `annual_rent` is already annual and is never scaled.
    fn rent_relief(
        &self,
        claims_rent_relief: bool,
        annual_rent: Decimal,
    ) -> Decimal {
        if !claims_rent_relief || annual_rent <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let relief = min(
            annual_rent.saturating_mul(self.config.rent_relief_percent),
            self.config.rent_relief_cap,
        );
        max(relief, Decimal::ZERO)
    }

    fn chargeable_income(
        &self,
        gross_annual: Decimal,
        total_allowable_deductions: Decimal,
    ) -> Decimal {
        max(
            gross_annual.saturating_sub(total_allowable_deductions),
            Decimal::ZERO,
        )
    }

    /// Walks the bands bottom-up, taxing each slice at its band's rate.
    ///
    /// Every visited band is recorded, including ones that receive nothing,
    /// up to the band that exhausts the chargeable income.
    fn apportion(
        &self,
        chargeable_income: Decimal,
    ) -> (Decimal, Vec<BandBreakdown>) {
        let mut remaining = chargeable_income;
        let mut annual_paye = Decimal::ZERO;
        let mut breakdown = Vec::with_capacity(self.config.bands.len());

        for band in self.config.sorted_bands() {
            let fits = match band.width() {
                Some(width) => min(remaining, width),
                None => remaining,
            };
            let taxable_in_band = max(fits, Decimal::ZERO);
            let tax_paid = taxable_in_band.saturating_mul(band.rate);

            annual_paye = annual_paye.saturating_add(tax_paid);
            remaining = remaining.saturating_sub(taxable_in_band);
            trace!(band = %band.id, %taxable_in_band, %tax_paid, "applied band");

            breakdown.push(BandBreakdown {
                band: band.clone(),
                taxable_in_band,
                tax_paid,
            });

            if remaining <= Decimal::ZERO {
                break;
            }
        }

        (annual_paye, breakdown)
    }

    fn net_pay(
        &self,
        gross_annual: Decimal,
        annual_paye: Decimal,
        reliefs: &Reliefs,
    ) -> Decimal {
        gross_annual
            .saturating_sub(annual_paye)
            .saturating_sub(reliefs.pension)
            .saturating_sub(reliefs.nhf)
            .saturating_sub(reliefs.other_deductions)
    }

    fn explanation(
        &self,
        gross_annual: Decimal,
        reliefs: &Reliefs,
        chargeable_income: Decimal,
        annual_paye: Decimal,
        monthly_net_pay: Decimal,
    ) -> String {
        format!(
            "Based on a gross annual income of {}, your taxable (chargeable) income was \
             determined by subtracting statutory reliefs: Pension ({}), NHF ({}), other \
             deductions ({}) and Rent Relief of {} ({} of rent, capped at {}). This left a \
             Chargeable Income of {}. Applying the progressive PAYE bands resulted in a total \
             annual tax of {}, leaving you with a monthly take-home pay of {}.",
            format_naira(gross_annual),
            format_naira(reliefs.pension),
            format_naira(reliefs.nhf),
            format_naira(reliefs.other_deductions),
            format_naira(reliefs.rent),
            format_percent(self.config.rent_relief_percent),
            format_naira(self.config.rent_relief_cap),
            format_naira(chargeable_income),
            format_naira(annual_paye),
            format_naira(monthly_net_pay),
        )
    }
}
