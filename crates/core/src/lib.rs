//! Core wagering analytics: odds conversion, expected value, Kelly sizing,
//! closing line value, bonus-bet valuation and odds-feed normalization.
//!
//! Every calculator is a pure function of its inputs. The current time is
//! always passed in, never read from the clock.

pub mod bonus;
pub mod clv;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod ev;
pub mod feed;
pub mod kelly;
pub mod ledger;
pub mod odds;
pub mod types;
pub mod validation;

pub use bonus::{calculate_bonus, BonusBetResult};
pub use clv::{calculate_clv, ClvDirection, ClvResult};
pub use config::{AppConfig, ArbitrageConfig, EngineConfig, FeedConfig, ServerConfig};
pub use config_loader::ConfigLoader;
pub use error::{ErrorKind, Result, WagerError};
pub use ev::{calculate_ev, EvEngine, EvResult, EV_FORMULA, EXCLUDED_FEATURES};
pub use feed::{
    normalize_events, BookmakerQuotes, Event, FeedStats, NormalizedFeed, OutcomePrice, RawEvent,
};
pub use kelly::{calculate_kelly, KellyReason, KellyResult, KellySizer};
pub use ledger::{analyze_bet, realized_profit, BetAnalytics, BetOutcome, BetSlip};
pub use odds::{american_to_decimal, decimal_to_american, implied_probability};
pub use types::{exceeds_age, OddsQuote, Probability, WagerInput};
