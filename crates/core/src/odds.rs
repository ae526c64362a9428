//! Conversion between decimal and American odds.

use crate::error::{Result, WagerError};
use crate::validation::ensure_decimal_odds;

/// Converts decimal odds to an American odds string.
///
/// Prices at or above 2.0 become `+N` (profit per 100 staked); shorter
/// prices become `-N` (stake needed to profit 100).
///
/// # Errors
/// Returns `InvalidOdds` when `decimal <= 1.0` or is not finite.
///
/// # Examples
/// ```
/// use betedge_core::odds::decimal_to_american;
///
/// assert_eq!(decimal_to_american(2.0).unwrap(), "+100");
/// assert_eq!(decimal_to_american(1.5).unwrap(), "-200");
/// assert_eq!(decimal_to_american(3.25).unwrap(), "+225");
/// ```
pub fn decimal_to_american(decimal: f64) -> Result<String> {
    let decimal = ensure_decimal_odds("decimal", decimal)?;

    if decimal >= 2.0 {
        let american = ((decimal - 1.0) * 100.0).round() as i64;
        Ok(format!("+{american}"))
    } else {
        let american = (-100.0 / (decimal - 1.0)).round() as i64;
        Ok(american.to_string())
    }
}

/// Parses an American odds string (`+150`, `150`, `-200`) into decimal odds.
///
/// # Errors
/// Returns `InvalidOdds` when the text is not a number or its magnitude is
/// below 100.
///
/// # Examples
/// ```
/// use betedge_core::odds::american_to_decimal;
///
/// assert!((american_to_decimal("+150").unwrap() - 2.5).abs() < 1e-12);
/// assert!((american_to_decimal("-200").unwrap() - 1.5).abs() < 1e-12);
/// ```
pub fn american_to_decimal(american: &str) -> Result<f64> {
    let trimmed = american.trim();
    let value: f64 = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|_| {
            WagerError::invalid_odds_with(
                "american",
                trimmed,
                "American odds must be a number such as +150 or -200",
            )
        })?;

    if !value.is_finite() || value.abs() < 100.0 {
        return Err(WagerError::invalid_odds_with(
            "american",
            trimmed,
            "American odds must be at least +100 or at most -100",
        ));
    }

    if value > 0.0 {
        Ok(1.0 + value / 100.0)
    } else {
        Ok(1.0 + 100.0 / value.abs())
    }
}

/// Probability implied by decimal odds, `1 / decimal`, margin included.
///
/// # Errors
/// Returns `InvalidOdds` when `decimal <= 1.0` or is not finite.
pub fn implied_probability(decimal: f64) -> Result<f64> {
    let decimal = ensure_decimal_odds("decimal", decimal)?;
    Ok(1.0 / decimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // ============================================
    // Decimal -> American
    // ============================================

    #[test]
    fn even_money_is_plus_100() {
        assert_eq!(decimal_to_american(2.0).unwrap(), "+100");
    }

    #[test]
    fn favourite_is_negative() {
        assert_eq!(decimal_to_american(1.5).unwrap(), "-200");
        assert_eq!(decimal_to_american(1.909_090_909).unwrap(), "-110");
        assert_eq!(decimal_to_american(1.25).unwrap(), "-400");
    }

    #[test]
    fn underdog_is_positive() {
        assert_eq!(decimal_to_american(2.1).unwrap(), "+110");
        assert_eq!(decimal_to_american(11.0).unwrap(), "+1000");
    }

    #[test]
    fn decimal_at_or_below_one_is_rejected() {
        for value in [1.0, 0.5, 0.0, -3.0, f64::NAN] {
            let err = decimal_to_american(value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidOdds);
        }
    }

    // ============================================
    // American -> Decimal
    // ============================================

    #[test]
    fn parses_signed_and_unsigned() {
        assert!((american_to_decimal("+110").unwrap() - 2.1).abs() < 1e-12);
        assert!((american_to_decimal("110").unwrap() - 2.1).abs() < 1e-12);
        assert!((american_to_decimal(" -400 ").unwrap() - 1.25).abs() < 1e-12);
        assert!((american_to_decimal("-100").unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_garbage_and_small_magnitudes() {
        for text in ["", "abc", "+", "+50", "-99", "0", "NaN", "inf"] {
            let err = american_to_decimal(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidOdds, "text {text:?}");
            assert_eq!(err.field(), "american");
        }
    }

    #[test]
    fn round_trip_recovers_decimal() {
        for decimal in [1.2, 1.5, 1.8, 1.91, 2.0, 2.05, 2.5, 3.4, 7.0, 15.5] {
            let american = decimal_to_american(decimal).unwrap();
            let back = american_to_decimal(&american).unwrap();
            // Rounding to whole American points loses at most half a point.
            assert!(
                (back - decimal).abs() < 0.01,
                "{decimal} -> {american} -> {back}"
            );
        }
    }

    // ============================================
    // Implied probability
    // ============================================

    #[test]
    fn implied_probability_is_reciprocal() {
        assert!((implied_probability(2.0).unwrap() - 0.5).abs() < 1e-12);
        assert!((implied_probability(4.0).unwrap() - 0.25).abs() < 1e-12);
        assert!(implied_probability(1.0).is_err());
    }
}
