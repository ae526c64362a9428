//! Two-outcome arbitrage detection across bookmakers.
//!
//! When bookmakers disagree enough on an event, backing each outcome at the
//! bookmaker offering the best price can guarantee a profit:
//!
//! ```text
//! Bookmaker A: Home @ 2.10,  Away @ 2.05
//! Bookmaker B: Home @ 2.00,  Away @ 2.20
//!
//! Best prices:   Home @ 2.10 (A), Away @ 2.20 (B)
//! Implied total: 1/2.10 + 1/2.20 = 0.9307
//! Profit:        1/0.9307 - 1   = 7.44%
//! Stakes:        51.16% on Home at A, 48.84% on Away at B
//! ```
//!
//! # Example
//!
//! ```ignore
//! use betedge_arbitrage::{find_arbitrage, scan};
//!
//! if let Some(opp) = find_arbitrage(&event, 1.0)? {
//!     let (home, away) = opp.stakes_for(500.0);
//!     println!("{}: {:.2}% profit", opp.event_description, opp.profit_percent);
//! }
//!
//! let ranked = scan(&events, 0.5)?;
//! for opp in ranked.opportunities() {
//!     println!("{} {:.2}%", opp.event_id, opp.profit_percent);
//! }
//! ```
//!
//! Only two-way markets are handled. Outcome slots are matched by position,
//! so callers must pass events whose bookmakers list outcomes in the same
//! order, as the normalized feed does.

pub mod detector;
pub mod types;

pub use detector::{find_arbitrage, scan, ArbitrageDetector, ArbitrageScan, DetectorConfig};
pub use types::{ArbitrageOpportunity, BestPrices, BestQuote, DetectionSummary};
