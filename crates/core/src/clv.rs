//! Closing line value: how the entry price compares with the market's final
//! price for the same outcome.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::ensure_decimal_odds;

/// Direction of line movement relative to the bettor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClvDirection {
    /// Entry price beat the close.
    Favorable,
    /// Closing price was better than the entry.
    Unfavorable,
    /// No movement.
    Neutral,
}

/// Closing line value of a single bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClvResult {
    /// `(implied_close - implied_bet) / implied_bet`, as a ratio.
    pub result: f64,
    /// `result` expressed in percent.
    pub percent: f64,
    pub implied_prob_bet: f64,
    pub implied_prob_close: f64,
    pub direction: ClvDirection,
    pub interpretation: String,
}

/// Calculates closing line value from the decimal odds at bet time and at close.
///
/// Positive CLV means the market's implied probability rose after the bet, so
/// the bettor locked in a better price than the closing line.
///
/// # Errors
/// Returns `InvalidOdds` if either price is not above 1.0.
///
/// # Examples
/// ```
/// use betedge_core::{calculate_clv, ClvDirection};
///
/// let clv = calculate_clv(2.10, 1.90).unwrap();
/// assert!((clv.percent - 10.526).abs() < 0.01);
/// assert_eq!(clv.direction, ClvDirection::Favorable);
/// ```
pub fn calculate_clv(bet_odds: f64, closing_odds: f64) -> Result<ClvResult> {
    let bet_odds = ensure_decimal_odds("bet_odds", bet_odds)?;
    let closing_odds = ensure_decimal_odds("closing_odds", closing_odds)?;

    let implied_prob_bet = 1.0 / bet_odds;
    let implied_prob_close = 1.0 / closing_odds;
    let clv = (implied_prob_close - implied_prob_bet) / implied_prob_bet;
    let percent = clv * 100.0;

    let direction = if clv > 0.0 {
        ClvDirection::Favorable
    } else if clv < 0.0 {
        ClvDirection::Unfavorable
    } else {
        ClvDirection::Neutral
    };

    let interpretation = match direction {
        ClvDirection::Favorable => format!(
            "Positive CLV ({percent:+.2}%) is favorable: the closing line implied a higher \
             probability than your entry price, so you got better value than the closing market."
        ),
        ClvDirection::Unfavorable => format!(
            "Negative CLV ({percent:+.2}%) is unfavorable: the closing line implied a lower \
             probability than your entry price, so the closing market offered better value."
        ),
        ClvDirection::Neutral => {
            "Zero CLV: the line closed at your entry price. Positive CLV would be favorable, \
             negative unfavorable."
                .to_string()
        }
    };

    Ok(ClvResult {
        result: clv,
        percent,
        implied_prob_bet,
        implied_prob_close,
        direction,
        interpretation,
    })
}
