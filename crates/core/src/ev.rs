//! Expected value of a single straight cash bet.
//!
//! Uses the bettor's own probability estimate, never the probability implied
//! by the odds. Every result carries its inputs, the formula used and the age
//! of the odds so it can be audited later.
//!
//! ```text
//! payout_if_win = stake * (O - 1)
//! EV            = P * payout_if_win - (1 - P) * stake
//! EV%           = EV / stake * 100
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{Result, WagerError};
use crate::types::{OddsQuote, WagerInput};

/// Identifier of the EV identity reported in [`EvResult::formula_used`].
pub const EV_FORMULA: &str = "EV = P × stake × (O − 1) − (1 − P) × stake";

/// Bet types the engine deliberately does not model.
pub const EXCLUDED_FEATURES: [&str; 5] = [
    "bonus_bets",
    "matched_betting",
    "insurance",
    "hedging",
    "parlays",
];

/// Result of an EV calculation with full provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvResult {
    /// Expected profit in cash; negative for a losing proposition.
    pub ev_cash: f64,
    /// Expected profit per unit staked, in percent.
    pub ev_percent: f64,
    pub formula_used: String,
    /// Snapshot of the validated inputs.
    pub inputs: WagerInput,
    pub odds_age_seconds: i64,
    /// The `now` the calculation was evaluated at.
    pub calculated_at: DateTime<Utc>,
    pub warnings: Vec<String>,
    pub excluded_features: Vec<String>,
}

impl EvResult {
    /// Returns true if the bet has positive expectation.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.ev_cash > 0.0
    }
}

/// EV calculator with configurable staleness thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvEngine {
    config: EngineConfig,
}

impl EvEngine {
    /// Creates an engine with the default 60s rejection / 30s warning thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom thresholds.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Calculates the expected value of a straight bet.
    ///
    /// Preconditions are checked in order: probability, stake, odds, quote
    /// timestamp not in the future, staleness. Age is compared with
    /// sub-second precision: a quote exactly at the maximum age is accepted,
    /// anything older is rejected.
    ///
    /// # Errors
    /// `InvalidProbability`, `InvalidStake`, `InvalidOdds`, `InvalidInput`
    /// (future timestamp) or `StaleOdds`.
    pub fn calculate(
        &self,
        odds: &OddsQuote,
        probability: f64,
        stake: f64,
        now: DateTime<Utc>,
    ) -> Result<EvResult> {
        let inputs = WagerInput::new(odds.clone(), probability, stake)?;

        let odds_age_seconds = odds.age_seconds(now);
        if odds.observed_at > now {
            return Err(WagerError::invalid_input(
                "observed_at",
                odds.observed_at.to_rfc3339(),
                "odds timestamp cannot be after the calculation time",
            ));
        }
        if odds.is_older_than(now, self.config.max_odds_age_seconds) {
            warn!(
                bookmaker = %odds.bookmaker,
                outcome = %odds.outcome_name,
                age_seconds = odds_age_seconds,
                max_age_seconds = self.config.max_odds_age_seconds,
                "Rejecting EV calculation on stale odds"
            );
            return Err(WagerError::StaleOdds {
                age_seconds: odds_age_seconds,
                max_age_seconds: self.config.max_odds_age_seconds,
            });
        }

        let p = inputs.probability.value();
        let payout_if_win = stake * odds.net_odds();
        let ev_cash = p * payout_if_win - inputs.probability.complement() * stake;
        let ev_percent = ev_cash / stake * 100.0;

        let mut warnings = Vec::new();
        if odds.is_older_than(now, self.config.aging_warning_seconds) {
            warnings.push(format!(
                "Odds are {odds_age_seconds} seconds old. Consider refreshing for more current data."
            ));
        }

        debug!(
            bookmaker = %odds.bookmaker,
            outcome = %odds.outcome_name,
            price = odds.price_decimal,
            probability = p,
            stake,
            ev_cash,
            ev_percent,
            odds_age_seconds,
            "EV calculated"
        );

        Ok(EvResult {
            ev_cash,
            ev_percent,
            formula_used: EV_FORMULA.to_string(),
            inputs,
            odds_age_seconds,
            calculated_at: now,
            warnings,
            excluded_features: EXCLUDED_FEATURES.iter().map(ToString::to_string).collect(),
        })
    }
}

/// Calculates EV with the default thresholds.
///
/// # Errors
/// See [`EvEngine::calculate`].
///
/// # Examples
/// ```
/// use betedge_core::{calculate_ev, OddsQuote};
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// let quote = OddsQuote::new("draftkings", "Lakers", 2.10, now - Duration::seconds(10)).unwrap();
/// let result = calculate_ev(&quote, 0.52, 100.0, now).unwrap();
///
/// // 0.52 * 110 - 0.48 * 100 = 9.2
/// assert!((result.ev_cash - 9.2).abs() < 1e-9);
/// assert!(result.warnings.is_empty());
/// ```
pub fn calculate_ev(
    odds: &OddsQuote,
    probability: f64,
    stake: f64,
    now: DateTime<Utc>,
) -> Result<EvResult> {
    EvEngine::new().calculate(odds, probability, stake, now)
}
