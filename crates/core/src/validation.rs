//! Input guards shared by every calculator.
//!
//! Each guard either returns the value unchanged or the precise
//! [`WagerError`] for the field. None of them clamp, round or default.

use crate::error::{Result, WagerError};

/// Requires `0 < value < 1`. NaN and both boundaries are rejected.
///
/// # Errors
/// Returns [`WagerError::InvalidProbability`] otherwise.
///
/// # Examples
/// ```
/// use betedge_core::validation::ensure_probability;
///
/// assert!(ensure_probability("probability", 0.55).is_ok());
/// assert!(ensure_probability("probability", 0.0).is_err());
/// assert!(ensure_probability("probability", 1.0).is_err());
/// ```
pub fn ensure_probability(field: &str, value: f64) -> Result<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(WagerError::invalid_probability(field, value))
    }
}

/// Requires a finite stake strictly above zero.
///
/// # Errors
/// Returns [`WagerError::InvalidStake`] otherwise.
pub fn ensure_stake(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WagerError::invalid_stake(field, value))
    }
}

/// Requires finite decimal odds strictly above 1.0.
///
/// # Errors
/// Returns [`WagerError::InvalidOdds`] otherwise.
pub fn ensure_decimal_odds(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 1.0 {
        Ok(value)
    } else {
        Err(WagerError::invalid_odds(field, value))
    }
}

/// Requires a finite value strictly above zero.
///
/// # Errors
/// Returns [`WagerError::InvalidInput`] otherwise.
pub fn ensure_positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WagerError::invalid_input(field, value, "must be greater than 0"))
    }
}

/// Requires a finite value at or above zero.
///
/// # Errors
/// Returns [`WagerError::InvalidInput`] otherwise.
pub fn ensure_non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(WagerError::invalid_input(
            field,
            value,
            "must be greater than or equal to 0",
        ))
    }
}

/// Requires `value <= max`, used for the ledger's plausibility limits.
///
/// # Errors
/// Returns [`WagerError::InvalidInput`] otherwise.
pub fn ensure_at_most(field: &str, value: f64, max: f64) -> Result<f64> {
    if value <= max {
        Ok(value)
    } else {
        Err(WagerError::invalid_input(
            field,
            value,
            format!("must not exceed {max}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // ============================================
    // Probability
    // ============================================

    #[test]
    fn probability_accepts_interior_values() {
        assert_eq!(ensure_probability("p", 0.5).unwrap(), 0.5);
        assert_eq!(ensure_probability("p", 1e-9).unwrap(), 1e-9);
        assert_eq!(ensure_probability("p", 0.999_999).unwrap(), 0.999_999);
    }

    #[test]
    fn probability_rejects_boundaries_and_nan() {
        for value in [0.0, 1.0, -0.1, 1.1, f64::NAN, f64::INFINITY] {
            let err = ensure_probability("p", value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidProbability, "value {value}");
            assert_eq!(err.field(), "p");
        }
    }

    // ============================================
    // Stake and odds
    // ============================================

    #[test]
    fn stake_must_be_positive_and_finite() {
        assert!(ensure_stake("stake", 0.01).is_ok());
        for value in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                ensure_stake("stake", value).unwrap_err().kind(),
                ErrorKind::InvalidStake
            );
        }
    }

    #[test]
    fn odds_must_exceed_one() {
        assert!(ensure_decimal_odds("odds", 1.01).is_ok());
        for value in [1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                ensure_decimal_odds("odds", value).unwrap_err().kind(),
                ErrorKind::InvalidOdds
            );
        }
    }

    // ============================================
    // Generic ranges
    // ============================================

    #[test]
    fn non_negative_allows_zero() {
        assert!(ensure_non_negative("rollover", 0.0).is_ok());
        assert!(ensure_non_negative("rollover", -0.5).is_err());
        assert!(ensure_non_negative("rollover", f64::NAN).is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(ensure_positive("bankroll", 0.0).is_err());
        assert!(ensure_positive("bankroll", 1.0).is_ok());
    }

    #[test]
    fn at_most_reports_limit() {
        let err = ensure_at_most("stake", 200_000.0, 100_000.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.constraint().contains("100000"));
        assert!(ensure_at_most("stake", 100_000.0, 100_000.0).is_ok());
    }
}
