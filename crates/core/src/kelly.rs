//! Kelly Criterion stake sizing for fixed-odds bets.
//!
//! Sizes a single bet from the bettor's probability estimate and the decimal
//! price on offer, optionally scaled down (fractional Kelly) and capped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WagerError};
use crate::types::{OddsQuote, Probability};
use crate::validation::{ensure_decimal_odds, ensure_positive};

/// Kelly Criterion bet sizer for decimal odds.
///
/// With net odds `b = O - 1`, win probability `p` and `q = 1 - p`:
/// ```text
/// f* = (b*p - q) / b
/// ```
/// The fraction is clipped to `[0, 1]`; a non-positive raw value means there
/// is no edge and nothing should be staked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KellySizer {
    /// Fraction of Kelly to use (1.0 = full Kelly, 0.25 = quarter Kelly)
    pub multiplier: f64,
    /// Optional absolute cap on the recommended stake
    pub max_stake: Option<f64>,
}

impl Default for KellySizer {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            max_stake: None,
        }
    }
}

/// Result of Kelly bet sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KellyResult {
    /// Kelly fraction of bankroll, clipped to [0, 1]
    pub fraction: f64,
    /// Stake to place: fraction × multiplier × bankroll, capped
    pub recommended_size: f64,
    /// Unclipped Kelly fraction, negative when the bet has no edge
    pub raw_fraction: f64,
    /// Fractional Kelly multiplier that was applied
    pub multiplier: f64,
    pub reason: KellyReason,
}

/// Why a Kelly calculation did or did not recommend a stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KellyReason {
    /// Positive edge - stake recommended
    PositiveEdge,
    /// Probability exactly matches the price - no edge
    NoEdge,
    /// Price too short for the estimated probability
    NegativeEdge,
}

impl KellySizer {
    /// Creates a sizer with a fractional multiplier and optional cap.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `multiplier` is outside (0, 1] or
    /// `max_stake` is not positive.
    pub fn new(multiplier: f64, max_stake: Option<f64>) -> Result<Self> {
        if !(multiplier > 0.0 && multiplier <= 1.0) {
            return Err(WagerError::invalid_input(
                "multiplier",
                multiplier,
                "fractional Kelly multiplier must be in (0, 1]",
            ));
        }
        if let Some(cap) = max_stake {
            ensure_positive("max_stake", cap)?;
        }
        Ok(Self {
            multiplier,
            max_stake,
        })
    }

    /// Calculates the Kelly fraction and recommended stake.
    ///
    /// # Errors
    /// `InvalidProbability`, `InvalidOdds`, or `InvalidInput` for a
    /// non-positive bankroll.
    pub fn size(&self, odds: &OddsQuote, probability: f64, bankroll: f64) -> Result<KellyResult> {
        let result = self.size_at_price(odds.price_decimal, probability, bankroll)?;
        debug!(
            bookmaker = %odds.bookmaker,
            outcome = %odds.outcome_name,
            recommended_size = result.recommended_size,
            "Kelly stake sized for quote"
        );
        Ok(result)
    }

    /// Same as [`size`](Self::size) for a bare decimal price.
    ///
    /// # Errors
    /// `InvalidProbability`, `InvalidOdds`, or `InvalidInput` for a
    /// non-positive bankroll.
    pub fn size_at_price(
        &self,
        price_decimal: f64,
        probability: f64,
        bankroll: f64,
    ) -> Result<KellyResult> {
        let p = Probability::new(probability)?;
        let price = ensure_decimal_odds("price_decimal", price_decimal)?;
        let bankroll = ensure_positive("bankroll", bankroll)?;

        let raw_fraction = Self::full_kelly(price, p);
        let fraction = raw_fraction.clamp(0.0, 1.0);

        let mut recommended_size = fraction * self.multiplier * bankroll;
        if let Some(cap) = self.max_stake {
            recommended_size = recommended_size.min(cap);
        }

        let reason = if raw_fraction > 0.0 {
            KellyReason::PositiveEdge
        } else if raw_fraction == 0.0 {
            KellyReason::NoEdge
        } else {
            KellyReason::NegativeEdge
        };

        debug!(
            price,
            probability = p.value(),
            raw_fraction,
            fraction,
            recommended_size,
            "Kelly stake sized"
        );

        Ok(KellyResult {
            fraction,
            recommended_size,
            raw_fraction,
            multiplier: self.multiplier,
            reason,
        })
    }

    /// Unclipped Kelly fraction `(b*p - q) / b` for decimal odds.
    #[must_use]
    pub fn full_kelly(price_decimal: f64, probability: Probability) -> f64 {
        let b = price_decimal - 1.0;
        (b * probability.value() - probability.complement()) / b
    }
}

/// Calculates full-Kelly sizing with no cap.
///
/// # Errors
/// See [`KellySizer::size`].
///
/// # Examples
/// ```
/// use betedge_core::{calculate_kelly, OddsQuote};
/// use chrono::Utc;
///
/// let quote = OddsQuote::new("fanduel", "Yankees", 2.0, Utc::now()).unwrap();
/// let kelly = calculate_kelly(&quote, 0.6, 1000.0).unwrap();
///
/// // (1 * 0.6 - 0.4) / 1 = 0.2
/// assert!((kelly.fraction - 0.2).abs() < 1e-12);
/// assert!((kelly.recommended_size - 200.0).abs() < 1e-9);
/// ```
pub fn calculate_kelly(odds: &OddsQuote, probability: f64, bankroll: f64) -> Result<KellyResult> {
    KellySizer::default().size(odds, probability, bankroll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::Utc;

    fn quote(price: f64) -> OddsQuote {
        OddsQuote::new("betmgm", "Boston Celtics", price, Utc::now()).unwrap()
    }

    // ============================================
    // Basic Kelly Formula Tests
    // ============================================

    #[test]
    fn kelly_even_money_with_edge() {
        let result = calculate_kelly(&quote(2.0), 0.6, 10_000.0).unwrap();
        assert!((result.fraction - 0.2).abs() < 1e-12);
        assert!((result.recommended_size - 2000.0).abs() < 1e-9);
        assert_eq!(result.reason, KellyReason::PositiveEdge);
    }

    #[test]
    fn bare_price_matches_quote_sizing() {
        let sizer = KellySizer::new(0.5, Some(150.0)).unwrap();
        let by_quote = sizer.size(&quote(2.5), 0.45, 1000.0).unwrap();
        let by_price = sizer.size_at_price(2.5, 0.45, 1000.0).unwrap();
        assert_eq!(by_quote, by_price);
        assert_eq!(
            sizer.size_at_price(1.0, 0.45, 1000.0).unwrap_err().kind(),
            ErrorKind::InvalidOdds
        );
    }

    #[test]
    fn kelly_underdog_price() {
        // b = 1.5, p = 0.45: (1.5*0.45 - 0.55) / 1.5 = 0.125 / 1.5
        let result = calculate_kelly(&quote(2.5), 0.45, 1000.0).unwrap();
        assert!((result.fraction - 0.125 / 1.5).abs() < 1e-12);
        assert!((result.recommended_size - 1000.0 * 0.125 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn kelly_no_edge_at_fair_price() {
        let result = calculate_kelly(&quote(2.0), 0.5, 1000.0).unwrap();
        assert_eq!(result.fraction, 0.0);
        assert_eq!(result.recommended_size, 0.0);
        assert_eq!(result.reason, KellyReason::NoEdge);
    }

    #[test]
    fn kelly_negative_edge_clips_to_zero() {
        let result = calculate_kelly(&quote(1.5), 0.5, 1000.0).unwrap();
        // b = 0.5: (0.25 - 0.5) / 0.5 = -0.5
        assert!((result.raw_fraction + 0.5).abs() < 1e-12);
        assert_eq!(result.fraction, 0.0);
        assert_eq!(result.recommended_size, 0.0);
        assert_eq!(result.reason, KellyReason::NegativeEdge);
    }

    #[test]
    fn kelly_fraction_always_within_unit_interval() {
        let prices = [1.01, 1.1, 1.5, 1.91, 2.0, 3.0, 10.0, 101.0, 1000.0];
        let probabilities = [0.001, 0.05, 0.3, 0.5, 0.7, 0.95, 0.999_999];
        for price in prices {
            for p in probabilities {
                let result = calculate_kelly(&quote(price), p, 500.0).unwrap();
                assert!(
                    (0.0..=1.0).contains(&result.fraction),
                    "price {price} p {p} -> {}",
                    result.fraction
                );
                assert!(result.recommended_size >= 0.0);
                assert!(result.recommended_size <= 500.0);
            }
        }
    }

    // ============================================
    // Fractional Kelly and Cap Tests
    // ============================================

    #[test]
    fn quarter_kelly_reduces_stake() {
        let sizer = KellySizer::new(0.25, None).unwrap();
        let result = sizer.size(&quote(2.0), 0.6, 10_000.0).unwrap();
        // Full Kelly 0.2 -> quarter 0.05 -> 500
        assert!((result.fraction - 0.2).abs() < 1e-12);
        assert!((result.recommended_size - 500.0).abs() < 1e-9);
        assert_eq!(result.multiplier, 0.25);
    }

    #[test]
    fn max_stake_caps_recommendation() {
        let sizer = KellySizer::new(1.0, Some(300.0)).unwrap();
        let result = sizer.size(&quote(2.0), 0.7, 10_000.0).unwrap();
        assert_eq!(result.recommended_size, 300.0);
    }

    #[test]
    fn invalid_multiplier_rejected() {
        for m in [0.0, -0.5, 1.5, f64::NAN] {
            let err = KellySizer::new(m, None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert_eq!(err.field(), "multiplier");
        }
        assert!(KellySizer::new(0.5, Some(0.0)).is_err());
    }

    // ============================================
    // Input Validation
    // ============================================

    #[test]
    fn kelly_rejects_boundary_probability() {
        for p in [0.0, 1.0] {
            let err = calculate_kelly(&quote(2.0), p, 1000.0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidProbability);
        }
    }

    #[test]
    fn kelly_rejects_bad_literal_odds() {
        let mut q = quote(2.0);
        q.price_decimal = 1.0;
        let err = calculate_kelly(&q, 0.6, 1000.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOdds);
    }

    #[test]
    fn kelly_rejects_non_positive_bankroll() {
        for bankroll in [0.0, -100.0] {
            let err = calculate_kelly(&quote(2.0), 0.6, bankroll).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert_eq!(err.field(), "bankroll");
        }
    }
}
