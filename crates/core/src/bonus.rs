//! Valuation of bonus (free) bets under a simplified rollover model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WagerError};
use crate::validation::{ensure_decimal_odds, ensure_non_negative, ensure_positive};

/// Probability of the bonus wager winning assumed by the model.
pub const ASSUMED_WIN_PROBABILITY: f64 = 0.5;

/// Caveat attached to every bonus valuation.
pub const FIFTY_PERCENT_CAVEAT: &str = "Simplified model: assumes a 50% chance of the bonus wager \
     winning. This is a modeling assumption, not a probability derived from the odds.";

/// Expected value of a bonus bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusBetResult {
    /// Profit if the wager wins, after any payout cap.
    pub potential_win: f64,
    /// Turnover required before the bonus converts to cash (informational).
    pub rollover_amount: f64,
    pub ev: f64,
    /// `(potential_win + bonus) / bonus`.
    pub effective_odds: f64,
    /// Whether the sportsbook's max-win cap reduced the payout.
    pub capped: bool,
    pub caveats: Vec<String>,
}

/// Values a bonus bet.
///
/// # Errors
/// Returns `InvalidInput` when `bonus_amount <= 0`, `odds <= 1.0`,
/// `rollover_multiplier < 0` or `max_win <= 0`.
///
/// # Examples
/// ```
/// use betedge_core::calculate_bonus;
///
/// let result = calculate_bonus(100.0, 2.5, 1.0, None).unwrap();
/// assert_eq!(result.potential_win, 150.0);
/// assert_eq!(result.ev, 25.0);
/// ```
pub fn calculate_bonus(
    bonus_amount: f64,
    odds: f64,
    rollover_multiplier: f64,
    max_win: Option<f64>,
) -> Result<BonusBetResult> {
    let bonus_amount = ensure_positive("bonus_amount", bonus_amount)?;
    let odds = ensure_decimal_odds("odds", odds).map_err(|_| {
        WagerError::invalid_input("odds", odds, "decimal odds must be greater than 1.0")
    })?;
    let rollover_multiplier = ensure_non_negative("rollover_multiplier", rollover_multiplier)?;
    let max_win = max_win
        .map(|cap| ensure_positive("max_win", cap))
        .transpose()?;

    let raw_win = bonus_amount * (odds - 1.0);
    let (potential_win, capped) = match max_win {
        Some(cap) if raw_win > cap => (cap, true),
        _ => (raw_win, false),
    };

    let rollover_amount = bonus_amount * rollover_multiplier;
    let ev = ASSUMED_WIN_PROBABILITY * potential_win - (1.0 - ASSUMED_WIN_PROBABILITY) * bonus_amount;
    let effective_odds = (potential_win + bonus_amount) / bonus_amount;

    let mut caveats = vec![FIFTY_PERCENT_CAVEAT.to_string()];
    if capped {
        caveats.push(format!(
            "Payout capped at {potential_win:.2} by the sportsbook's maximum win limit."
        ));
    }

    debug!(
        bonus_amount,
        odds,
        rollover_amount,
        potential_win,
        capped,
        ev,
        "Bonus bet valued"
    );

    Ok(BonusBetResult {
        potential_win,
        rollover_amount,
        ev,
        effective_odds,
        capped,
        caveats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn uncapped_bonus() {
        let result = calculate_bonus(100.0, 2.5, 1.0, None).unwrap();
        assert_eq!(result.potential_win, 150.0);
        assert_eq!(result.rollover_amount, 100.0);
        assert_eq!(result.ev, 25.0);
        assert_eq!(result.effective_odds, 2.5);
        assert!(!result.capped);
    }

    #[test]
    fn max_win_caps_payout() {
        let result = calculate_bonus(100.0, 5.0, 3.0, Some(250.0)).unwrap();
        assert_eq!(result.potential_win, 250.0);
        assert!(result.capped);
        assert_eq!(result.rollover_amount, 300.0);
        assert_eq!(result.ev, 0.5 * 250.0 - 0.5 * 100.0);
        assert_eq!(result.effective_odds, 3.5);
        assert_eq!(result.caveats.len(), 2);
    }

    #[test]
    fn cap_above_raw_win_has_no_effect() {
        let result = calculate_bonus(50.0, 2.0, 0.0, Some(1000.0)).unwrap();
        assert_eq!(result.potential_win, 50.0);
        assert!(!result.capped);
        assert_eq!(result.rollover_amount, 0.0);
        assert_eq!(result.ev, 0.0);
    }

    #[test]
    fn fifty_percent_assumption_is_always_surfaced() {
        let result = calculate_bonus(20.0, 1.8, 1.0, None).unwrap();
        assert!(result.caveats.iter().any(|c| c.contains("50%")));
        assert!(result.ev < 0.0);
    }

    #[test]
    fn invalid_terms_are_rejected() {
        let cases = [
            (0.0, 2.0, 1.0, None, "bonus_amount"),
            (-10.0, 2.0, 1.0, None, "bonus_amount"),
            (100.0, 1.0, 1.0, None, "odds"),
            (100.0, 2.0, -1.0, None, "rollover_multiplier"),
            (100.0, 2.0, 1.0, Some(0.0), "max_win"),
        ];
        for (bonus, odds, rollover, max_win, field) in cases {
            let err = calculate_bonus(bonus, odds, rollover, max_win).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "field {field}");
            assert_eq!(err.field(), field);
        }
    }
}
