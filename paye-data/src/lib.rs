//! Configuration loading, argument parsing helpers and text reports for the
//! `paye` command-line front end.

pub mod amount;
pub mod config_loader;
pub mod report;

pub use amount::{ParseAmountError, parse_amount, parse_rate};
pub use config_loader::{CONFIG_ENV_VAR, ConfigLoadError, ConfigLoader};
pub use report::render_report;
