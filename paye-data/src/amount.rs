use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a command-line amount cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace, a leading naira sign and thousands separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('₦').unwrap_or(trimmed);
    trimmed.replace(',', "")
}

/// Parses an amount such as `250000`, `1,200,000` or `₦45,000.50`.
///
/// Empty input is treated as zero.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a rate given either as a fraction (`0.08`) or a percentage (`8%`).
pub fn parse_rate(s: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = s.trim();
    match trimmed.strip_suffix('%') {
        Some(percent) => Ok(parse_amount(percent)? / Decimal::ONE_HUNDRED),
        None => parse_amount(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,200,000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("45,000.50").unwrap(), dec!(45000.50));
    }

    #[test]
    fn parse_amount_strips_currency_sign() {
        assert_eq!(parse_amount("₦250,000").unwrap(), dec!(250000));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  60000  ").unwrap(), dec!(60000));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        let err = parse_amount("abc").unwrap_err();

        assert!(err.to_string().starts_with("invalid amount 'abc'"));
    }

    #[test]
    fn parse_rate_accepts_fraction_and_percent() {
        assert_eq!(parse_rate("0.08").unwrap(), dec!(0.08));
        assert_eq!(parse_rate("8%").unwrap(), dec!(0.08));
        assert_eq!(parse_rate("2.5%").unwrap(), dec!(0.025));
    }
}
