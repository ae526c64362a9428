//! Value objects shared by the calculators.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::{ensure_decimal_odds, ensure_probability, ensure_stake};

// =============================================================================
// Odds Quote
// =============================================================================

/// A single bookmaker price for one outcome, as observed at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    /// Bookmaker key or display name.
    pub bookmaker: String,
    /// Outcome the price is for (team name, "Draw", ...).
    pub outcome_name: String,
    /// Decimal odds, always above 1.0.
    pub price_decimal: f64,
    /// When the bookmaker last updated this price.
    pub observed_at: DateTime<Utc>,
}

impl OddsQuote {
    /// Creates a quote, rejecting decimal odds at or below 1.0.
    ///
    /// # Errors
    /// Returns `InvalidOdds` if `price_decimal <= 1.0` or is not finite.
    pub fn new(
        bookmaker: impl Into<String>,
        outcome_name: impl Into<String>,
        price_decimal: f64,
        observed_at: DateTime<Utc>,
    ) -> Result<Self> {
        ensure_decimal_odds("price_decimal", price_decimal)?;
        Ok(Self {
            bookmaker: bookmaker.into(),
            outcome_name: outcome_name.into(),
            price_decimal,
            observed_at,
        })
    }

    /// Net odds `b`: profit per unit staked on a win.
    #[must_use]
    pub fn net_odds(&self) -> f64 {
        self.price_decimal - 1.0
    }

    /// Age of the quote in whole seconds at `now`. Negative when the quote
    /// claims to come from the future.
    #[must_use]
    pub fn age_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.age(now).num_seconds()
    }

    /// Exact age of the quote at `now`, sub-second precision included.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.observed_at
    }

    /// True when the quote is strictly older than `limit_seconds` at `now`.
    ///
    /// Compares the full duration, so 60.9s is older than a 60s limit.
    #[must_use]
    pub fn is_older_than(&self, now: DateTime<Utc>, limit_seconds: i64) -> bool {
        exceeds_age(self.age(now), limit_seconds)
    }
}

/// True when `age` is strictly greater than `limit_seconds`.
///
/// A limit too large for a `Duration` is never exceeded.
#[must_use]
pub fn exceeds_age(age: Duration, limit_seconds: i64) -> bool {
    Duration::try_seconds(limit_seconds).is_some_and(|limit| age > limit)
}

// =============================================================================
// Probability Estimate
// =============================================================================

/// A user-supplied win probability strictly inside (0, 1).
///
/// Never derived from odds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Validates and wraps a probability.
    ///
    /// # Errors
    /// Returns `InvalidProbability` for 0, 1, NaN or anything outside (0, 1).
    pub fn new(value: f64) -> Result<Self> {
        ensure_probability("probability", value).map(Self)
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Probability of the complementary outcome.
    #[must_use]
    pub fn complement(self) -> f64 {
        1.0 - self.0
    }
}

impl TryFrom<f64> for Probability {
    type Error = crate::error::WagerError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Wager Input
// =============================================================================

/// Validated inputs of a single-wager calculation, echoed back in results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerInput {
    pub odds: OddsQuote,
    pub probability: Probability,
    pub stake: f64,
}

impl WagerInput {
    /// Validates probability, stake and odds, in that order.
    ///
    /// # Errors
    /// Returns the first violated precondition.
    pub fn new(odds: OddsQuote, probability: f64, stake: f64) -> Result<Self> {
        let probability = Probability::new(probability)?;
        ensure_stake("stake", stake)?;
        // Quotes can be built with a struct literal, so re-check the price.
        ensure_decimal_odds("price_decimal", odds.price_decimal)?;
        Ok(Self {
            odds,
            probability,
            stake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_767_225_600 + secs, 0).unwrap()
    }

    #[test]
    fn quote_rejects_even_money_or_less() {
        let err = OddsQuote::new("draftkings", "Lakers", 1.0, at(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOdds);
        assert_eq!(err.field(), "price_decimal");
    }

    #[test]
    fn quote_age_counts_whole_seconds() {
        let quote = OddsQuote::new("fanduel", "Celtics", 1.91, at(0)).unwrap();
        assert_eq!(quote.age_seconds(at(45)), 45);
        assert_eq!(quote.age_seconds(at(0) + Duration::milliseconds(59_900)), 59);
        assert_eq!(quote.age_seconds(at(-5)), -5);
    }

    #[test]
    fn quote_age_limit_uses_fractional_seconds() {
        let quote = OddsQuote::new("fanduel", "Home", 1.9, at(0)).unwrap();
        assert!(!quote.is_older_than(at(60), 60));
        assert!(quote.is_older_than(at(0) + Duration::milliseconds(60_001), 60));
        assert!(quote.is_older_than(at(0) + Duration::milliseconds(60_900), 60));
        assert!(!quote.is_older_than(at(-5), 0));
        assert!(!quote.is_older_than(at(1_000), i64::MAX));
        assert!((quote.net_odds() - 0.91).abs() < 1e-12);
    }

    #[test]
    fn probability_deserialization_is_validated() {
        let ok: Probability = serde_json::from_str("0.52").unwrap();
        assert_eq!(ok.value(), 0.52);
        assert!(serde_json::from_str::<Probability>("1.0").is_err());
        assert!(serde_json::from_str::<Probability>("0").is_err());
    }

    #[test]
    fn wager_input_checks_probability_before_stake() {
        let quote = OddsQuote::new("betmgm", "Jets", 2.5, at(0)).unwrap();
        let err = WagerInput::new(quote.clone(), 1.0, -1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProbability);

        let err = WagerInput::new(quote, 0.4, 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStake);
    }

    #[test]
    fn wager_input_rechecks_literal_quotes() {
        let quote = OddsQuote {
            bookmaker: "bovada".to_string(),
            outcome_name: "Draw".to_string(),
            price_decimal: 0.9,
            observed_at: at(0),
        };
        let err = WagerInput::new(quote, 0.4, 10.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOdds);
    }
}
