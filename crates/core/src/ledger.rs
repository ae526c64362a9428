//! Post-hoc analytics for recorded bets.
//!
//! A [`BetSlip`] is a bet as it sits in the bettor's ledger: the price taken,
//! the stake, and optionally the closing price and the bettor's own
//! probability estimate at the time and how the bet settled. [`analyze_bet`] runs the CLV, EV and
//! Kelly calculators over it and keeps a human-readable breakdown of each step
//! so the numbers can be checked by hand.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clv::calculate_clv;
use crate::error::{Result, WagerError};
use crate::kelly::KellySizer;
use crate::types::Probability;
use crate::validation::{ensure_at_most, ensure_decimal_odds, ensure_positive, ensure_stake};

/// Highest decimal price a ledger entry may record.
pub const MAX_LEDGER_ODDS: f64 = 1000.0;

/// Largest stake a ledger entry may record.
pub const MAX_LEDGER_STAKE: f64 = 100_000.0;

/// Largest bankroll accepted for Kelly sizing on a ledger entry.
pub const MAX_LEDGER_BANKROLL: f64 = 1_000_000_000.0;

/// A recorded bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSlip {
    /// Decimal odds taken.
    pub odds: f64,
    pub stake: f64,
    #[serde(default)]
    pub closing_odds: Option<f64>,
    /// The bettor's own win probability at bet time.
    #[serde(default)]
    pub probability: Option<f64>,
    /// Bankroll for Kelly sizing; the stake is used when absent.
    #[serde(default)]
    pub bankroll: Option<f64>,
    /// Settlement, once the event is over.
    #[serde(default)]
    pub result: Option<BetOutcome>,
}

/// One audited calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub formula: String,
    pub calculation: String,
    pub steps: Vec<String>,
    pub interpretation: String,
}

/// Per-metric breakdown. A block is present only when the metric was computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationBreakdown {
    pub clv: Option<CalculationStep>,
    pub expected_value: Option<CalculationStep>,
    pub kelly: Option<CalculationStep>,
}

/// Analytics for a recorded bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetAnalytics {
    /// Closing line value in percent, 3 dp.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub clv: Option<Decimal>,
    /// EV in percent of stake, 2 dp.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub expected_value: Option<Decimal>,
    /// Recommended Kelly stake, 2 dp.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub kelly_size: Option<Decimal>,
    /// Profit or loss, 2 dp. Present only for settled bets.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub realized_profit: Option<Decimal>,
    pub breakdown: CalculationBreakdown,
}

/// How a settled bet ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetOutcome {
    Win,
    Lose,
    Push,
}

impl BetOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BetOutcome::Win => "win",
            BetOutcome::Lose => "lose",
            BetOutcome::Push => "push",
        }
    }
}

impl std::fmt::Display for BetOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BetOutcome {
    type Err = WagerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(BetOutcome::Win),
            "lose" | "loss" => Ok(BetOutcome::Lose),
            "push" => Ok(BetOutcome::Push),
            other => Err(WagerError::invalid_input(
                "result",
                other,
                "result must be one of: win, lose, push",
            )),
        }
    }
}

/// Profit or loss of a settled bet.
///
/// # Errors
/// `InvalidOdds` or `InvalidStake` for out-of-range inputs.
pub fn realized_profit(odds: f64, stake: f64, outcome: BetOutcome) -> Result<f64> {
    let odds = ensure_decimal_odds("odds", odds)?;
    let stake = ensure_stake("stake", stake)?;
    Ok(match outcome {
        BetOutcome::Win => stake * (odds - 1.0),
        BetOutcome::Lose => -stake,
        BetOutcome::Push => 0.0,
    })
}

/// Computes CLV, EV and Kelly size for a recorded bet.
///
/// EV and Kelly need the bettor's own probability and are `None` without it.
/// Realized profit is `None` until the slip carries a result.
///
/// # Errors
/// Any validation failure on the slip's fields.
pub fn analyze_bet(slip: &BetSlip) -> Result<BetAnalytics> {
    let odds = ledger_odds("odds", slip.odds)?;
    let stake = ensure_stake("stake", slip.stake)?;
    let stake = ensure_at_most("stake", stake, MAX_LEDGER_STAKE)?;
    let closing_odds = slip
        .closing_odds
        .map(|c| ledger_odds("closing_odds", c))
        .transpose()?;
    let probability = slip.probability.map(Probability::new).transpose()?;
    let bankroll = slip
        .bankroll
        .map(|b| {
            ensure_positive("bankroll", b)
                .and_then(|b| ensure_at_most("bankroll", b, MAX_LEDGER_BANKROLL))
        })
        .transpose()?
        .unwrap_or(stake);

    let mut breakdown = CalculationBreakdown::default();

    let clv = match closing_odds {
        Some(close) => {
            let result = calculate_clv(odds, close)?;
            let rounded = round_dp("clv", result.percent, 3)?;
            breakdown.clv = Some(CalculationStep {
                formula: "CLV = (1/closing_odds − 1/bet_odds) / (1/bet_odds)".to_string(),
                calculation: format!(
                    "(1/{close} − 1/{odds}) / (1/{odds}) = {:.6}",
                    result.result
                ),
                steps: vec![
                    format!("Implied probability at bet: 1 / {odds} = {:.4}", result.implied_prob_bet),
                    format!(
                        "Implied probability at close: 1 / {close} = {:.4}",
                        result.implied_prob_close
                    ),
                    format!(
                        "Relative change: ({:.4} − {:.4}) / {:.4} = {:.6}",
                        result.implied_prob_close,
                        result.implied_prob_bet,
                        result.implied_prob_bet,
                        result.result
                    ),
                    format!("As percent: {:.3}%", result.percent),
                ],
                interpretation: result.interpretation,
            });
            Some(rounded)
        }
        None => None,
    };

    let (expected_value, kelly_size) = match probability {
        Some(p) => {
            let (ev, ev_step) = ev_percent(odds, p);
            breakdown.expected_value = Some(ev_step);
            let (size, kelly_step) = kelly_size(odds, p, bankroll)?;
            breakdown.kelly = Some(kelly_step);
            (
                Some(round_dp("expected_value", ev, 2)?),
                Some(round_dp("kelly_size", size, 2)?),
            )
        }
        None => (None, None),
    };

    let profit = slip
        .result
        .map(|outcome| {
            realized_profit(odds, stake, outcome).and_then(|p| round_dp("realized_profit", p, 2))
        })
        .transpose()?;

    debug!(
        odds,
        stake,
        ?clv,
        ?expected_value,
        ?kelly_size,
        ?profit,
        "Bet analyzed"
    );

    Ok(BetAnalytics {
        clv,
        expected_value,
        kelly_size,
        realized_profit: profit,
        breakdown,
    })
}

fn ledger_odds(field: &str, value: f64) -> Result<f64> {
    let value = ensure_decimal_odds(field, value)?;
    if value > MAX_LEDGER_ODDS {
        return Err(WagerError::invalid_odds_with(
            field,
            value.to_string(),
            format!("decimal odds must not exceed {MAX_LEDGER_ODDS}"),
        ));
    }
    Ok(value)
}

fn ev_percent(odds: f64, p: Probability) -> (f64, CalculationStep) {
    let win = p.value() * (odds - 1.0);
    let loss = p.complement();
    let ev = (win - loss) * 100.0;

    let step = CalculationStep {
        formula: "EV% = (P × (O − 1) − (1 − P)) × 100".to_string(),
        calculation: format!("({} × {:.4} − {:.4}) × 100 = {ev:.2}%", p.value(), odds - 1.0, loss),
        steps: vec![
            format!("Your probability: P = {}", p.value()),
            format!("Net odds: {odds} − 1 = {:.4}", odds - 1.0),
            format!("Expected win per unit: {win:.4}"),
            format!("Expected loss per unit: {loss:.4}"),
        ],
        interpretation: if ev > 0.0 {
            format!("Expected profit of {ev:.2}% of the stake over the long run.")
        } else if ev < 0.0 {
            format!("Expected loss of {:.2}% of the stake over the long run.", -ev)
        } else {
            "Break-even bet: no expected profit or loss.".to_string()
        },
    };
    (ev, step)
}

fn kelly_size(odds: f64, p: Probability, bankroll: f64) -> Result<(f64, CalculationStep)> {
    let b = odds - 1.0;
    let kelly = KellySizer::default().size_at_price(odds, p.value(), bankroll)?;
    let (raw, fraction, size) = (kelly.raw_fraction, kelly.fraction, kelly.recommended_size);

    let step = CalculationStep {
        formula: "f* = (b × p − q) / b".to_string(),
        calculation: format!(
            "({b:.4} × {} − {:.4}) / {b:.4} = {raw:.4}",
            p.value(),
            p.complement()
        ),
        steps: vec![
            format!("Net odds: b = {odds} − 1 = {b:.4}"),
            format!("Win probability: p = {}", p.value()),
            format!("Loss probability: q = {:.4}", p.complement()),
            format!("Kelly fraction (clipped to [0, 1]): {fraction:.4}"),
            format!("Kelly size: {fraction:.4} × {bankroll} = {size:.2}"),
        ],
        interpretation: if fraction > 0.0 {
            format!(
                "Suggests staking {:.2}% of the bankroll ({size:.2}).",
                fraction * 100.0
            )
        } else {
            "No edge at this price: Kelly recommends no stake.".to_string()
        },
    };
    Ok((size, step))
}

fn round_dp(field: &str, value: f64, dp: u32) -> Result<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(dp).normalize())
        .ok_or_else(|| {
            WagerError::invalid_input(field, value, "result is outside the representable range")
        })
}
