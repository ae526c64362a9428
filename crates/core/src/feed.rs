//! Odds-feed snapshot model and normalization.
//!
//! The feed itself (HTTP client, caching, quotas) lives outside this crate.
//! Callers hand over a raw snapshot in the upstream odds-API shape and get
//! back only events whose quotes are complete, current and from supported
//! bookmakers. Rejections are counted, never raised.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::types::{exceeds_age, OddsQuote};

// =============================================================================
// Normalized Snapshot
// =============================================================================

/// One outcome price inside a bookmaker's market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomePrice {
    pub name: String,
    /// Decimal odds.
    pub price: f64,
}

/// A bookmaker's quotes for one event's head-to-head market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerQuotes {
    pub key: String,
    pub title: String,
    pub last_update: DateTime<Utc>,
    /// Outcomes in feed order; slot 0 and 1 line up across bookmakers.
    pub outcomes: Vec<OutcomePrice>,
}

impl BookmakerQuotes {
    /// Builds an [`OddsQuote`] for the outcome at `index`.
    ///
    /// Returns `None` if the slot does not exist.
    ///
    /// # Errors
    /// Returns `InvalidOdds` if the stored price is not above 1.0.
    pub fn quote(&self, index: usize) -> Option<Result<OddsQuote>> {
        self.outcomes.get(index).map(|outcome| {
            OddsQuote::new(
                self.title.clone(),
                outcome.name.clone(),
                outcome.price,
                self.last_update,
            )
        })
    }

    /// Returns true if the bookmaker quotes at least a two-way market.
    #[must_use]
    pub fn is_two_way(&self) -> bool {
        self.outcomes.len() >= 2
    }
}

/// A sporting event with quotes from one or more bookmakers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub sport_key: String,
    #[serde(default)]
    pub sport_title: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    pub bookmakers: Vec<BookmakerQuotes>,
}

impl Event {
    /// Human-readable matchup, `"Away @ Home"`.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }

    /// Finds a bookmaker by key.
    #[must_use]
    pub fn bookmaker(&self, key: &str) -> Option<&BookmakerQuotes> {
        self.bookmakers.iter().find(|b| b.key == key)
    }
}

// =============================================================================
// Raw Feed Shape
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOutcome {
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMarket {
    pub key: Option<String>,
    #[serde(default)]
    pub outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBookmaker {
    pub key: Option<String>,
    pub title: Option<String>,
    pub last_update: Option<String>,
    #[serde(default)]
    pub markets: Vec<RawMarket>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: Option<String>,
    pub sport_key: Option<String>,
    pub sport_title: Option<String>,
    pub commence_time: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    #[serde(default)]
    pub bookmakers: Vec<RawBookmaker>,
}

// =============================================================================
// Normalization
// =============================================================================

/// Counters for everything dropped during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedStats {
    pub events_received: usize,
    pub events_kept: usize,
    pub events_incomplete: usize,
    pub events_without_bookmakers: usize,
    pub bookmakers_unsupported: usize,
    pub bookmakers_incomplete: usize,
    pub bookmakers_stale: usize,
    pub bookmakers_future: usize,
    pub bookmakers_too_few_outcomes: usize,
    pub outcomes_invalid: usize,
}

/// Result of normalizing a raw snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeed {
    pub events: Vec<Event>,
    pub stats: FeedStats,
}

/// Normalizes a raw odds snapshot as seen at `now`.
///
/// Keeps events with an id, sport, both teams and a parseable start time;
/// bookmakers that are supported, complete, at most `max_odds_age_seconds`
/// old and not timestamped in the future; markets matching
/// `config.market_key`; outcomes with a name and a price above 1.0; and
/// bookmakers left with at least two outcomes. Events with no surviving
/// bookmaker are dropped.
#[must_use]
pub fn normalize_events(raw: &[RawEvent], config: &FeedConfig, now: DateTime<Utc>) -> NormalizedFeed {
    let mut stats = FeedStats {
        events_received: raw.len(),
        ..FeedStats::default()
    };
    let mut events = Vec::new();

    for raw_event in raw {
        let Some(mut event) = parse_event_header(raw_event) else {
            stats.events_incomplete += 1;
            debug!(event_id = ?raw_event.id, "Skipping incomplete event");
            continue;
        };

        for raw_book in &raw_event.bookmakers {
            if let Some(book) = normalize_bookmaker(raw_book, config, now, &mut stats) {
                event.bookmakers.push(book);
            }
        }

        if event.bookmakers.is_empty() {
            stats.events_without_bookmakers += 1;
            debug!(event_id = %event.id, "Skipping event with no valid bookmakers");
            continue;
        }

        events.push(event);
    }

    stats.events_kept = events.len();
    debug!(
        received = stats.events_received,
        kept = stats.events_kept,
        "Odds snapshot normalized"
    );

    NormalizedFeed { events, stats }
}

fn parse_event_header(raw: &RawEvent) -> Option<Event> {
    let id = non_empty(raw.id.as_deref())?;
    let sport_key = non_empty(raw.sport_key.as_deref())?;
    let sport_title = non_empty(raw.sport_title.as_deref())?;
    let home_team = non_empty(raw.home_team.as_deref())?;
    let away_team = non_empty(raw.away_team.as_deref())?;
    let commence_time = parse_timestamp(raw.commence_time.as_deref()?)?;

    Some(Event {
        id,
        sport_key,
        sport_title,
        commence_time,
        home_team,
        away_team,
        bookmakers: Vec::new(),
    })
}

fn normalize_bookmaker(
    raw: &RawBookmaker,
    config: &FeedConfig,
    now: DateTime<Utc>,
    stats: &mut FeedStats,
) -> Option<BookmakerQuotes> {
    let Some(key) = non_empty(raw.key.as_deref()) else {
        stats.bookmakers_incomplete += 1;
        return None;
    };
    if !config.supports(&key) {
        stats.bookmakers_unsupported += 1;
        return None;
    }

    let title = non_empty(raw.title.as_deref());
    let last_update = raw.last_update.as_deref().and_then(parse_timestamp);
    let (Some(title), Some(last_update)) = (title, last_update) else {
        stats.bookmakers_incomplete += 1;
        return None;
    };

    if last_update > now {
        stats.bookmakers_future += 1;
        return None;
    }
    let age = now - last_update;
    if exceeds_age(age, config.max_odds_age_seconds) {
        stats.bookmakers_stale += 1;
        debug!(
            bookmaker = %key,
            age_ms = age.num_milliseconds(),
            "Dropping stale bookmaker quotes"
        );
        return None;
    }

    let mut outcomes = Vec::new();
    for market in raw
        .markets
        .iter()
        .filter(|m| m.key.as_deref() == Some(config.market_key.as_str()))
    {
        for raw_outcome in &market.outcomes {
            match (non_empty(raw_outcome.name.as_deref()), raw_outcome.price) {
                (Some(name), Some(price)) if price.is_finite() && price > 1.0 => {
                    outcomes.push(OutcomePrice { name, price });
                }
                _ => stats.outcomes_invalid += 1,
            }
        }
    }

    if outcomes.len() < 2 {
        stats.bookmakers_too_few_outcomes += 1;
        return None;
    }

    Some(BookmakerQuotes {
        key,
        title,
        last_update,
        outcomes,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
