//! Cross-bookmaker arbitrage detection for two-outcome markets.
//!
//! For each event the detector takes the best price per outcome slot across
//! all bookmakers. If the implied probabilities of those two prices sum to
//! less than one, staking both legs in proportion to their implied
//! probability locks in a profit whichever side wins.

use betedge_core::{ArbitrageConfig, Event, Result, WagerError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::types::{ArbitrageOpportunity, BestPrices, BestQuote, DetectionSummary};

// =============================================================================
// Detection Configuration
// =============================================================================

/// Configuration for arbitrage detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum guaranteed profit, in percent, for an opportunity to be reported.
    pub min_edge_percent: f64,
}

impl DetectorConfig {
    /// Sets the minimum edge.
    #[must_use]
    pub fn with_min_edge_percent(mut self, edge: f64) -> Self {
        self.min_edge_percent = edge;
        self
    }

    /// Checks the edge threshold.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the threshold is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        validate_min_edge(self.min_edge_percent).map(|_| ())
    }
}

impl From<&ArbitrageConfig> for DetectorConfig {
    fn from(config: &ArbitrageConfig) -> Self {
        Self {
            min_edge_percent: config.min_edge_percent,
        }
    }
}

fn validate_min_edge(min_edge_percent: f64) -> Result<f64> {
    if min_edge_percent.is_finite() && min_edge_percent >= 0.0 {
        Ok(min_edge_percent)
    } else {
        Err(WagerError::invalid_input(
            "min_edge_percent",
            min_edge_percent,
            "must be a finite number greater than or equal to 0",
        ))
    }
}

// =============================================================================
// Arbitrage Detector
// =============================================================================

/// Detects two-outcome arbitrage across bookmakers.
#[derive(Debug, Clone, Default)]
pub struct ArbitrageDetector {
    config: DetectorConfig,
}

impl ArbitrageDetector {
    /// Creates a detector that reports every opportunity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector with a custom configuration.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an invalid edge threshold.
    pub fn with_config(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Finds the best price for outcome slots 0 and 1 in a single pass.
    ///
    /// Slots line up by position across bookmakers. A strictly higher price
    /// replaces the current best, so the first bookmaker seen keeps ties.
    /// Bookmakers quoting fewer than two outcomes, or an invalid price in
    /// either slot, are ignored. Returns `None` if fewer than two bookmakers
    /// remain.
    #[must_use]
    pub fn best_prices(event: &Event) -> Option<BestPrices> {
        let mut best: Option<(BestQuote, BestQuote)> = None;
        let mut eligible = 0usize;

        for book in &event.bookmakers {
            let (Some(first), Some(second)) = (book.outcomes.first(), book.outcomes.get(1)) else {
                trace!(
                    event_id = %event.id,
                    bookmaker = %book.key,
                    outcomes = book.outcomes.len(),
                    "Bookmaker lacks two outcomes"
                );
                continue;
            };
            if !is_valid_price(first.price) || !is_valid_price(second.price) {
                trace!(event_id = %event.id, bookmaker = %book.key, "Bookmaker has an invalid price");
                continue;
            }
            eligible += 1;

            let quote = |name: &str, price: f64| BestQuote {
                bookmaker: book.title.clone(),
                outcome_name: name.to_string(),
                price_decimal: price,
            };

            best = Some(match best.take() {
                None => (quote(&first.name, first.price), quote(&second.name, second.price)),
                Some((best1, best2)) => (
                    if first.price > best1.price_decimal {
                        quote(&first.name, first.price)
                    } else {
                        best1
                    },
                    if second.price > best2.price_decimal {
                        quote(&second.name, second.price)
                    } else {
                        best2
                    },
                ),
            });
        }

        if eligible < 2 {
            trace!(event_id = %event.id, eligible, "Skipping event with fewer than two bookmakers");
            return None;
        }

        best.map(|(outcome1, outcome2)| BestPrices {
            outcome1,
            outcome2,
            eligible_bookmakers: eligible,
        })
    }

    /// Computes the arbitrage for an event, ignoring the edge threshold.
    #[must_use]
    pub fn evaluate(event: &Event) -> Option<ArbitrageOpportunity> {
        Self::best_prices(event).and_then(|best| opportunity_from(event, best))
    }

    /// Detects an arbitrage opportunity meeting the configured edge.
    #[must_use]
    pub fn detect(&self, event: &Event) -> Option<ArbitrageOpportunity> {
        let opp = Self::evaluate(event)?;

        if opp.profit_percent < self.config.min_edge_percent {
            debug!(
                event_id = %event.id,
                profit_percent = opp.profit_percent,
                min_edge_percent = self.config.min_edge_percent,
                "Arbitrage below edge threshold"
            );
            return None;
        }

        info!(
            event_id = %opp.event_id,
            event = %opp.event_description,
            bookmaker1 = %opp.outcome1.bookmaker,
            price1 = opp.outcome1.price_decimal,
            bookmaker2 = %opp.outcome2.bookmaker,
            price2 = opp.outcome2.price_decimal,
            profit_percent = opp.profit_percent,
            "Arbitrage opportunity detected"
        );

        Some(opp)
    }

    /// Scans many events and ranks every arbitrage by profit.
    ///
    /// All computed opportunities are kept so the result can be re-filtered
    /// with [`ArbitrageScan::above`] without scanning again.
    #[must_use]
    pub fn scan(&self, events: &[Event]) -> ArbitrageScan {
        let mut all = Vec::new();
        let mut skipped = 0usize;

        for event in events {
            let Some(best) = Self::best_prices(event) else {
                skipped += 1;
                continue;
            };
            if let Some(opp) = opportunity_from(event, best) {
                all.push(opp);
            }
        }

        all.sort_by(|a, b| b.profit_percent.total_cmp(&a.profit_percent));

        let mut scan = ArbitrageScan {
            min_edge_percent: self.config.min_edge_percent,
            all,
            summary: DetectionSummary {
                events_scanned: events.len(),
                events_skipped: skipped,
                ..DetectionSummary::default()
            },
        };
        scan.refresh_summary();

        info!(
            events_scanned = scan.summary.events_scanned,
            events_skipped = scan.summary.events_skipped,
            opportunities = scan.summary.opportunities_found,
            best_profit_percent = ?scan.summary.best_profit_percent,
            "Arbitrage scan complete"
        );

        scan
    }
}

fn opportunity_from(event: &Event, best: BestPrices) -> Option<ArbitrageOpportunity> {
    let implied1 = best.outcome1.implied_probability();
    let implied2 = best.outcome2.implied_probability();
    let total = implied1 + implied2;

    if total >= 1.0 {
        trace!(
            event_id = %event.id,
            best1 = best.outcome1.price_decimal,
            best2 = best.outcome2.price_decimal,
            total_implied = total,
            "No arbitrage - implied probabilities sum to 1 or more"
        );
        return None;
    }

    Some(ArbitrageOpportunity {
        event_id: event.id.clone(),
        event_description: event.description(),
        outcome1: best.outcome1,
        outcome2: best.outcome2,
        total_implied_probability: total,
        profit_percent: (1.0 / total - 1.0) * 100.0,
        stake1_percent: implied1 / total * 100.0,
        stake2_percent: implied2 / total * 100.0,
    })
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 1.0
}

// =============================================================================
// Scan Result
// =============================================================================

/// Ranked result of scanning many events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageScan {
    min_edge_percent: f64,
    /// Every computed opportunity, best first.
    all: Vec<ArbitrageOpportunity>,
    pub summary: DetectionSummary,
}

impl ArbitrageScan {
    /// Opportunities at or above the scan's edge threshold, best first.
    #[must_use]
    pub fn opportunities(&self) -> Vec<&ArbitrageOpportunity> {
        self.iter_above(self.min_edge_percent).collect()
    }

    /// Opportunities at or above a different edge threshold.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an invalid threshold.
    pub fn above(&self, min_edge_percent: f64) -> Result<Vec<&ArbitrageOpportunity>> {
        let min_edge_percent = validate_min_edge(min_edge_percent)?;
        Ok(self.iter_above(min_edge_percent).collect())
    }

    /// Changes the edge threshold in place and refreshes the summary.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an invalid threshold.
    pub fn refilter(&mut self, min_edge_percent: f64) -> Result<()> {
        self.min_edge_percent = validate_min_edge(min_edge_percent)?;
        self.refresh_summary();
        Ok(())
    }

    /// The threshold currently applied.
    #[must_use]
    pub fn min_edge_percent(&self) -> f64 {
        self.min_edge_percent
    }

    /// Consumes the scan, returning the opportunities above the threshold.
    #[must_use]
    pub fn into_opportunities(self) -> Vec<ArbitrageOpportunity> {
        let min = self.min_edge_percent;
        self.all
            .into_iter()
            .filter(|o| o.profit_percent >= min)
            .collect()
    }

    fn iter_above(&self, min_edge_percent: f64) -> impl Iterator<Item = &ArbitrageOpportunity> {
        self.all
            .iter()
            .filter(move |o| o.profit_percent >= min_edge_percent)
    }

    fn refresh_summary(&mut self) {
        let reported = self.opportunities();
        let found = reported.len();
        let best = reported.first().map(|o| o.profit_percent);
        self.summary.opportunities_found = found;
        self.summary.best_profit_percent = best;
    }
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Finds an arbitrage for one event at or above `min_edge_percent`.
///
/// Events that cannot be evaluated (fewer than two bookmakers with both
/// outcomes) return `Ok(None)`.
///
/// # Errors
/// Returns `InvalidInput` if `min_edge_percent` is negative or not finite.
pub fn find_arbitrage(event: &Event, min_edge_percent: f64) -> Result<Option<ArbitrageOpportunity>> {
    let detector = ArbitrageDetector::with_config(
        DetectorConfig::default().with_min_edge_percent(min_edge_percent),
    )?;
    Ok(detector.detect(event))
}

/// Scans events and ranks opportunities by profit, best first.
///
/// # Errors
/// Returns `InvalidInput` if `min_edge_percent` is negative or not finite.
pub fn scan(events: &[Event], min_edge_percent: f64) -> Result<ArbitrageScan> {
    let detector = ArbitrageDetector::with_config(
        DetectorConfig::default().with_min_edge_percent(min_edge_percent),
    )?;
    Ok(detector.scan(events))
}
