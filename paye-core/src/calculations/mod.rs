//! PAYE calculation logic.
//!
//! [`paye`] holds the engine; [`common`] holds the clamping and formatting
//! helpers it shares with report rendering.

pub mod common;
pub mod paye;

pub use paye::{PayeCalculator, compute};
