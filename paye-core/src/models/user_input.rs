use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::TaxConfig;
use crate::calculations::common::MONTHS_PER_YEAR;

/// One individual's declared figures for a single PAYE computation.
///
/// The five income fields and `other_deductions` share one periodicity,
/// selected by `is_annual_mode`. `annual_rent` is always annual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub employee_name: String,

    /// When false, income fields and `other_deductions` are monthly figures.
    pub is_annual_mode: bool,

    pub basic_salary: Decimal,
    pub housing_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub other_allowances: Decimal,
    pub bonuses: Decimal,

    /// Pension contribution rate, applied to basic salary only.
    pub pension_rate: Decimal,

    /// National Housing Fund rate, applied to basic salary only.
    pub nhf_rate: Decimal,

    /// Flat deduction in the same periodicity as income.
    pub other_deductions: Decimal,

    /// Rent paid over the year, regardless of `is_annual_mode`.
    pub annual_rent: Decimal,

    /// Rent relief is only granted when this is set.
    pub claims_rent_relief: bool,

    pub state_of_residence: String,
}

impl Default for UserInput {
    /// The figures a fresh entry form starts with.
    fn default() -> Self {
        Self {
            employee_name: String::new(),
            is_annual_mode: false,
            basic_salary: dec!(250000),
            housing_allowance: dec!(50000),
            transport_allowance: dec!(30000),
            other_allowances: dec!(20000),
            bonuses: dec!(0),
            pension_rate: dec!(0.08),
            nhf_rate: dec!(0.025),
            other_deductions: dec!(0),
            annual_rent: dec!(1200000),
            claims_rent_relief: true,
            state_of_residence: "Lagos".to_string(),
        }
    }
}

impl UserInput {
    /// Builds the record a bulk payroll run produces for one employee row.
    ///
    /// Amounts are monthly except `annual_rent`. Statutory rates come from
    /// the config defaults and rent relief is claimed whenever rent is paid.
    pub fn bulk_employee(
        name: impl Into<String>,
        monthly_basic: Decimal,
        monthly_housing: Decimal,
        monthly_transport: Decimal,
        annual_rent: Decimal,
        config: &TaxConfig,
    ) -> Self {
        Self {
            employee_name: name.into(),
            is_annual_mode: false,
            basic_salary: monthly_basic,
            housing_allowance: monthly_housing,
            transport_allowance: monthly_transport,
            other_allowances: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            pension_rate: config.pension_default_rate,
            nhf_rate: config.nhf_default_rate,
            other_deductions: Decimal::ZERO,
            annual_rent,
            claims_rent_relief: annual_rent > Decimal::ZERO,
            ..Self::default()
        }
    }

    /// Multiplier that takes a periodic figure to its annual value.
    pub fn periods_per_year(&self) -> Decimal {
        if self.is_annual_mode {
            Decimal::ONE
        } else {
            MONTHS_PER_YEAR
        }
    }

    /// Sum of the five income fields, annualized.
    ///
    /// Saturates at the `Decimal` range instead of overflowing.
    pub fn gross_annual(&self) -> Decimal {
        self.basic_salary
            .saturating_add(self.housing_allowance)
            .saturating_add(self.transport_allowance)
            .saturating_add(self.other_allowances)
            .saturating_add(self.bonuses)
            .saturating_mul(self.periods_per_year())
    }
}
