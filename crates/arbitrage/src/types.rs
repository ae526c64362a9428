//! Shared types for arbitrage detection.

use serde::{Deserialize, Serialize};

// =============================================================================
// Best Prices
// =============================================================================

/// Best available price for one outcome slot across all bookmakers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestQuote {
    /// Display name of the bookmaker offering the price.
    pub bookmaker: String,
    pub outcome_name: String,
    pub price_decimal: f64,
}

impl BestQuote {
    /// Implied probability of the price, `1 / price`.
    #[must_use]
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.price_decimal
    }
}

/// Best price per outcome slot for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPrices {
    pub outcome1: BestQuote,
    pub outcome2: BestQuote,
    /// Bookmakers that quoted both slots.
    pub eligible_bookmakers: usize,
}

impl BestPrices {
    /// Sum of the two implied probabilities. Below 1.0 means arbitrage.
    #[must_use]
    pub fn total_implied_probability(&self) -> f64 {
        self.outcome1.implied_probability() + self.outcome2.implied_probability()
    }
}

// =============================================================================
// Arbitrage Opportunity
// =============================================================================

/// A guaranteed-profit allocation across two bookmakers.
///
/// Stake percentages describe a notional 100-unit total stake. Staking in
/// that proportion pays the same amount whichever outcome wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub event_id: String,
    /// `"Away @ Home"`.
    pub event_description: String,
    pub outcome1: BestQuote,
    pub outcome2: BestQuote,
    pub total_implied_probability: f64,
    /// Guaranteed return on total stake, in percent.
    pub profit_percent: f64,
    pub stake1_percent: f64,
    pub stake2_percent: f64,
}

impl ArbitrageOpportunity {
    /// Splits `total_stake` across the two legs.
    #[must_use]
    pub fn stakes_for(&self, total_stake: f64) -> (f64, f64) {
        (
            total_stake * self.stake1_percent / 100.0,
            total_stake * self.stake2_percent / 100.0,
        )
    }

    /// Payout received whichever outcome wins, for a given total stake.
    #[must_use]
    pub fn guaranteed_payout(&self, total_stake: f64) -> f64 {
        total_stake / self.total_implied_probability
    }

    /// Profit locked in for a given total stake.
    #[must_use]
    pub fn guaranteed_profit(&self, total_stake: f64) -> f64 {
        self.guaranteed_payout(total_stake) - total_stake
    }
}

// =============================================================================
// Detection Summary
// =============================================================================

/// Summary of a scan for monitoring and reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    /// Events examined.
    pub events_scanned: usize,
    /// Events without two bookmakers quoting both outcomes.
    pub events_skipped: usize,
    /// Opportunities at or above the edge threshold.
    pub opportunities_found: usize,
    /// Highest profit among reported opportunities.
    pub best_profit_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opportunity() -> ArbitrageOpportunity {
        let total = 1.0 / 2.10 + 1.0 / 2.20;
        ArbitrageOpportunity {
            event_id: "evt".to_string(),
            event_description: "Away @ Home".to_string(),
            outcome1: BestQuote {
                bookmaker: "A".to_string(),
                outcome_name: "Home".to_string(),
                price_decimal: 2.10,
            },
            outcome2: BestQuote {
                bookmaker: "B".to_string(),
                outcome_name: "Away".to_string(),
                price_decimal: 2.20,
            },
            total_implied_probability: total,
            profit_percent: (1.0 / total - 1.0) * 100.0,
            stake1_percent: (1.0 / 2.10) / total * 100.0,
            stake2_percent: (1.0 / 2.20) / total * 100.0,
        }
    }

    #[test]
    fn stakes_pay_out_equally() {
        let opp = opportunity();
        let (s1, s2) = opp.stakes_for(1000.0);
        assert!((s1 + s2 - 1000.0).abs() < 1e-9);
        assert!((s1 * 2.10 - s2 * 2.20).abs() < 1e-9);
        assert!((s1 * 2.10 - opp.guaranteed_payout(1000.0)).abs() < 1e-9);
    }

    #[test]
    fn guaranteed_profit_matches_percent() {
        let opp = opportunity();
        let profit = opp.guaranteed_profit(100.0);
        assert!((profit - opp.profit_percent).abs() < 1e-9);
    }

    #[test]
    fn opportunity_serialization() {
        let opp = opportunity();
        let json = serde_json::to_string(&opp).unwrap();
        let back: ArbitrageOpportunity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opp);
    }
}
