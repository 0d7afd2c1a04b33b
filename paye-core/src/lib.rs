//! PAYE computation for salaried individuals under a configurable
//! progressive band schedule.
//!
//! The entry point is [`compute`], a pure function of a [`UserInput`] and a
//! [`TaxConfig`]. Input checks live in [`validation`] and are run by callers
//! before computing; the engine itself accepts any numeric input.

pub mod batch;
pub mod calculations;
pub mod models;
pub mod validation;

pub use batch::{BatchOutcome, BatchSummary, compute_batch};
pub use calculations::{PayeCalculator, compute};
pub use models::*;
pub use validation::{FieldViolation, InputField, ValidationReport, validate_input};
