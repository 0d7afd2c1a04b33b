use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBand;

/// Errors reported by [`TaxConfig::validate`].
///
/// The engine itself never validates a config; these are for whoever
/// authors or loads one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxConfigError {
    /// The schedule has no bands at all.
    #[error("tax schedule has no bands")]
    NoBands,

    /// A band rate lies outside [0, 1].
    #[error("band '{id}' rate must be between 0 and 1, got {rate}")]
    InvalidBandRate { id: String, rate: Decimal },

    /// A band starts below zero.
    #[error("band '{id}' lower bound must be non-negative, got {lower_bound}")]
    NegativeLowerBound { id: String, lower_bound: Decimal },

    /// A bounded band whose upper edge does not exceed its lower edge.
    #[error("band '{id}' upper bound {upper_bound} must exceed lower bound {lower_bound}")]
    EmptyBand {
        id: String,
        lower_bound: Decimal,
        upper_bound: Decimal,
    },

    /// Consecutive bands leave a gap or overlap.
    #[error("band '{id}' should start at {expected}, starts at {found}")]
    NotContiguous {
        id: String,
        expected: Decimal,
        found: Decimal,
    },

    /// An unbounded band that is not the topmost band.
    #[error("band '{0}' is unbounded but is not the top band")]
    UnboundedBandNotLast(String),

    /// The topmost band has an upper bound.
    #[error("top band '{0}' must be unbounded")]
    TopBandBounded(String),

    /// The rent relief percentage lies outside [0, 1].
    #[error("rent relief percent must be between 0 and 1, got {0}")]
    InvalidRentReliefPercent(Decimal),

    /// The rent relief cap is negative.
    #[error("rent relief cap must be non-negative, got {0}")]
    InvalidRentReliefCap(Decimal),

    /// The default NHF rate lies outside [0, 1].
    #[error("default NHF rate must be between 0 and 1, got {0}")]
    InvalidNhfDefaultRate(Decimal),

    /// The default pension rate lies outside [0, 1].
    #[error("default pension rate must be between 0 and 1, got {0}")]
    InvalidPensionDefaultRate(Decimal),
}

/// The active PAYE ruleset: band schedule, rent relief terms and the
/// default statutory contribution rates.
///
/// `version_name` and `effective_date` are descriptive only. Fields missing
/// when deserializing fall back to [`TaxConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Progressive bands. Order is not significant; the engine sorts them.
    pub bands: Vec<TaxBand>,

    /// Fraction of annual rent allowed as relief.
    pub rent_relief_percent: Decimal,

    /// Absolute ceiling on rent relief.
    pub rent_relief_cap: Decimal,

    /// Suggested National Housing Fund rate for new inputs.
    pub nhf_default_rate: Decimal,

    /// Suggested pension contribution rate for new inputs.
    pub pension_default_rate: Decimal,

    pub version_name: String,
    pub effective_date: NaiveDate,
}

impl Default for TaxConfig {
    /// The 2026 Nigeria Tax Act schedule.
    fn default() -> Self {
        Self {
            bands: vec![
                TaxBand::new("1", dec!(0), Some(dec!(800000)), dec!(0)),
                TaxBand::new("2", dec!(800000), Some(dec!(2000000)), dec!(0.10)),
                TaxBand::new("3", dec!(2000000), Some(dec!(4000000)), dec!(0.15)),
                TaxBand::new("4", dec!(4000000), Some(dec!(7000000)), dec!(0.19)),
                TaxBand::new("5", dec!(7000000), Some(dec!(12000000)), dec!(0.22)),
                TaxBand::new("6", dec!(12000000), None, dec!(0.25)),
            ],
            rent_relief_percent: dec!(0.20),
            rent_relief_cap: dec!(500000),
            nhf_default_rate: dec!(0.025),
            pension_default_rate: dec!(0.08),
            version_name: "NTA 2026 Framework v1.0".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
        }
    }
}

impl TaxConfig {
    /// Bands ordered by ascending `lower_bound`.
    ///
    /// The sort is stable: bands sharing a `lower_bound` keep the order
    /// they were given in.
    pub fn sorted_bands(&self) -> Vec<&TaxBand> {
        let mut bands: Vec<&TaxBand> = self.bands.iter().collect();
        bands.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
        bands
    }

    /// A copy with the bands stored in ascending order, as a config editor
    /// saves them.
    pub fn sorted(&self) -> Self {
        let bands = self.sorted_bands().into_iter().cloned().collect();
        self.with_bands(bands)
    }

    pub fn with_bands(
        &self,
        bands: Vec<TaxBand>,
    ) -> Self {
        Self {
            bands,
            ..self.clone()
        }
    }

    pub fn with_band_added(
        &self,
        band: TaxBand,
    ) -> Self {
        let mut bands = self.bands.clone();
        bands.push(band);
        self.with_bands(bands)
    }

    /// A copy without the band carrying `id`. Unknown ids leave the bands unchanged.
    pub fn with_band_removed(
        &self,
        id: &str,
    ) -> Self {
        let bands = self.bands.iter().filter(|b| b.id != id).cloned().collect();
        self.with_bands(bands)
    }

    /// A copy where the band sharing `band.id` is replaced by `band`.
    pub fn with_band_updated(
        &self,
        band: TaxBand,
    ) -> Self {
        let bands = self
            .bands
            .iter()
            .map(|b| if b.id == band.id { band.clone() } else { b.clone() })
            .collect();
        self.with_bands(bands)
    }

    /// Checks that the schedule is a contiguous partition of income with an
    /// unbounded top band and that every rate is a fraction.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxConfigError`] found.
    pub fn validate(&self) -> Result<(), TaxConfigError> {
        if !is_fraction(self.rent_relief_percent) {
            return Err(TaxConfigError::InvalidRentReliefPercent(
                self.rent_relief_percent,
            ));
        }
        if self.rent_relief_cap < Decimal::ZERO {
            return Err(TaxConfigError::InvalidRentReliefCap(self.rent_relief_cap));
        }
        if !is_fraction(self.nhf_default_rate) {
            return Err(TaxConfigError::InvalidNhfDefaultRate(self.nhf_default_rate));
        }
        if !is_fraction(self.pension_default_rate) {
            return Err(TaxConfigError::InvalidPensionDefaultRate(
                self.pension_default_rate,
            ));
        }

        let bands = self.sorted_bands();
        let Some(top) = bands.last() else {
            return Err(TaxConfigError::NoBands);
        };

        let mut previous_upper: Option<Decimal> = None;
        for (idx, band) in bands.iter().enumerate() {
            if !is_fraction(band.rate) {
                return Err(TaxConfigError::InvalidBandRate {
                    id: band.id.clone(),
                    rate: band.rate,
                });
            }
            if band.lower_bound < Decimal::ZERO {
                return Err(TaxConfigError::NegativeLowerBound {
                    id: band.id.clone(),
                    lower_bound: band.lower_bound,
                });
            }
            if let Some(expected) = previous_upper {
                if band.lower_bound != expected {
                    return Err(TaxConfigError::NotContiguous {
                        id: band.id.clone(),
                        expected,
                        found: band.lower_bound,
                    });
                }
            }
            match band.upper_bound {
                Some(upper) if upper <= band.lower_bound => {
                    return Err(TaxConfigError::EmptyBand {
                        id: band.id.clone(),
                        lower_bound: band.lower_bound,
                        upper_bound: upper,
                    });
                }
                None if idx + 1 < bands.len() => {
                    return Err(TaxConfigError::UnboundedBandNotLast(band.id.clone()));
                }
                _ => {}
            }
            previous_upper = band.upper_bound;
        }

        if !top.is_unbounded() {
            return Err(TaxConfigError::TopBandBounded(top.id.clone()));
        }

        Ok(())
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
