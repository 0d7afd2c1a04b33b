mod calculation_result;
mod tax_band;
mod tax_config;
mod user_input;

pub use calculation_result::{BandBreakdown, CalculationResult};
pub use tax_band::TaxBand;
pub use tax_config::{TaxConfig, TaxConfigError};
pub use user_input::UserInput;
