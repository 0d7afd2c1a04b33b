use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bracket of a progressive PAYE schedule.
///
/// `upper_bound` of `None` marks the unbounded top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub id: String,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    pub fn new(
        id: impl Into<String>,
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// Width of the band, or `None` when the band is unbounded.
    ///
    /// A misconfigured band whose upper edge sits below its lower edge
    /// yields a negative width; callers clamp it.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound
            .map(|upper| upper.saturating_sub(self.lower_bound))
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn width_of_bounded_band() {
        let band = TaxBand::new("2", dec!(800000), Some(dec!(2000000)), dec!(0.10));

        assert_eq!(band.width(), Some(dec!(1200000)));
        assert!(!band.is_unbounded());
    }

    #[test]
    fn width_of_unbounded_band_is_none() {
        let band = TaxBand::new("6", dec!(12000000), None, dec!(0.25));

        assert_eq!(band.width(), None);
        assert!(band.is_unbounded());
    }

    #[test]
    fn inverted_band_has_negative_width() {
        let band = TaxBand::new("x", dec!(500), Some(dec!(100)), dec!(0.10));

        assert_eq!(band.width(), Some(dec!(-400)));
    }
}
