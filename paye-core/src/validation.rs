//! Pre-computation checks on a [`UserInput`].
//!
//! The engine computes from whatever numbers it is handed. Business rules
//! such as "a name is required" belong to the entry flow, which runs
//! [`validate_input`] first and shows each [`FieldViolation`] beside its field.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::UserInput;

/// The input field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputField {
    EmployeeName,
    BasicSalary,
    HousingAllowance,
    TransportAllowance,
    OtherAllowances,
    Bonuses,
    PensionRate,
    NhfRate,
    OtherDeductions,
    AnnualRent,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmployeeName => "employee_name",
            Self::BasicSalary => "basic_salary",
            Self::HousingAllowance => "housing_allowance",
            Self::TransportAllowance => "transport_allowance",
            Self::OtherAllowances => "other_allowances",
            Self::Bonuses => "bonuses",
            Self::PensionRate => "pension_rate",
            Self::NhfRate => "nhf_rate",
            Self::OtherDeductions => "other_deductions",
            Self::AnnualRent => "annual_rent",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::EmployeeName => "Name",
            Self::BasicSalary => "Basic salary",
            Self::HousingAllowance => "Housing allowance",
            Self::TransportAllowance => "Transport allowance",
            Self::OtherAllowances => "Other allowances",
            Self::Bonuses => "Bonuses",
            Self::PensionRate => "Pension rate",
            Self::NhfRate => "NHF rate",
            Self::OtherDeductions => "Other deductions",
            Self::AnnualRent => "Annual rent",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule broken by an input, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: InputField,
    pub message: String,
}

impl FieldViolation {
    fn new(
        field: InputField,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one input, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first message recorded against `field`, if any.
    pub fn message_for(
        &self,
        field: InputField,
    ) -> Option<&str> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.as_str())
    }
}

/// Checks `input` against the entry-form rules.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::{InputField, UserInput, validate_input};
///
/// let input = UserInput {
///     employee_name: "  ".to_string(),
///     basic_salary: dec!(0),
///     ..UserInput::default()
/// };
///
/// let report = validate_input(&input);
///
/// assert!(!report.is_valid());
/// assert_eq!(
///     report.message_for(InputField::BasicSalary),
///     Some("Basic salary must be greater than zero.")
/// );
/// ```
pub fn validate_input(input: &UserInput) -> ValidationReport {
    let mut violations = Vec::new();

    if input.employee_name.trim().is_empty() {
        violations.push(FieldViolation::new(
            InputField::EmployeeName,
            "Please enter your name.",
        ));
    }

    if input.basic_salary <= Decimal::ZERO {
        violations.push(FieldViolation::new(
            InputField::BasicSalary,
            "Basic salary must be greater than zero.",
        ));
    }

    let amounts = [
        (InputField::HousingAllowance, input.housing_allowance),
        (InputField::TransportAllowance, input.transport_allowance),
        (InputField::OtherAllowances, input.other_allowances),
        (InputField::Bonuses, input.bonuses),
        (InputField::OtherDeductions, input.other_deductions),
    ];
    for (field, amount) in amounts {
        if amount < Decimal::ZERO {
            violations.push(FieldViolation::new(
                field,
                format!("{} cannot be negative.", field.label()),
            ));
        }
    }

    for (field, rate) in [
        (InputField::PensionRate, input.pension_rate),
        (InputField::NhfRate, input.nhf_rate),
    ] {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            violations.push(FieldViolation::new(
                field,
                format!("{} must be between 0% and 100%.", field.label()),
            ));
        }
    }

    if input.annual_rent < Decimal::ZERO {
        violations.push(FieldViolation::new(
            InputField::AnnualRent,
            "Annual rent cannot be negative.",
        ));
    } else if input.claims_rent_relief && input.annual_rent > input.gross_annual() {
        violations.push(FieldViolation::new(
            InputField::AnnualRent,
            "Rent cannot exceed your total gross income.",
        ));
    }

    if !violations.is_empty() {
        debug!(count = violations.len(), "input failed validation");
    }

    ValidationReport { violations }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_input() -> UserInput {
        UserInput {
            employee_name: "Jane Smith".to_string(),
            ..UserInput::default()
        }
    }

    #[test]
    fn valid_input_has_no_violations() {
        let report = validate_input(&valid_input());

        assert!(report.is_valid());
        assert_eq!(report, ValidationReport::default());
    }

    #[test]
    fn blank_name_is_rejected() {
        let input = UserInput {
            employee_name: "   ".to_string(),
            ..valid_input()
        };

        let report = validate_input(&input);

        assert_eq!(
            report.violations,
            vec![FieldViolation::new(
                InputField::EmployeeName,
                "Please enter your name."
            )]
        );
    }

    #[test]
    fn zero_basic_salary_is_rejected() {
        let input = UserInput {
            basic_salary: dec!(0),
            ..valid_input()
        };

        let report = validate_input(&input);

        assert_eq!(
            report.message_for(InputField::BasicSalary),
            Some("Basic salary must be greater than zero.")
        );
    }

    #[test]
    fn rent_above_gross_is_rejected_when_claimed() {
        let input = UserInput {
            annual_rent: dec!(5000000),
            ..valid_input()
        };

        let report = validate_input(&input);

        assert_eq!(
            report.message_for(InputField::AnnualRent),
            Some("Rent cannot exceed your total gross income.")
        );
    }

    #[test]
    fn rent_above_gross_is_allowed_when_not_claimed() {
        let input = UserInput {
            annual_rent: dec!(5000000),
            claims_rent_relief: false,
            ..valid_input()
        };

        assert!(validate_input(&input).is_valid());
    }

    #[test]
    fn rent_is_compared_with_annualized_gross() {
        // 350,000 a month is 4,200,000 a year
        let input = UserInput {
            annual_rent: dec!(4200000),
            ..valid_input()
        };

        assert!(validate_input(&input).is_valid());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let input = UserInput {
            housing_allowance: dec!(-1),
            bonuses: dec!(-5),
            ..valid_input()
        };

        let report = validate_input(&input);

        let fields: Vec<InputField> = report.violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec![InputField::HousingAllowance, InputField::Bonuses]);
        assert_eq!(
            report.message_for(InputField::Bonuses),
            Some("Bonuses cannot be negative.")
        );
    }

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        let input = UserInput {
            pension_rate: dec!(1.5),
            nhf_rate: dec!(-0.01),
            ..valid_input()
        };

        let report = validate_input(&input);

        assert_eq!(
            report.message_for(InputField::PensionRate),
            Some("Pension rate must be between 0% and 100%.")
        );
        assert_eq!(
            report.message_for(InputField::NhfRate),
            Some("NHF rate must be between 0% and 100%.")
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let input = UserInput {
            employee_name: String::new(),
            basic_salary: dec!(-10),
            annual_rent: dec!(-1),
            ..valid_input()
        };

        let report = validate_input(&input);

        assert_eq!(report.violations.len(), 3);
    }

    #[test]
    fn violation_display_names_field() {
        let violation = FieldViolation::new(InputField::AnnualRent, "Annual rent cannot be negative.");

        assert_eq!(
            violation.to_string(),
            "annual_rent: Annual rent cannot be negative."
        );
    }
}
