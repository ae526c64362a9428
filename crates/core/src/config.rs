use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub arbitrage: ArbitrageConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Returns `host:port` for binding.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Staleness thresholds for the EV engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Odds older than this are rejected outright.
    pub max_odds_age_seconds: i64,
    /// Odds older than this produce a non-fatal warning.
    pub aging_warning_seconds: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_odds_age_seconds: 60,
            aging_warning_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrageConfig {
    /// Minimum guaranteed profit, in percent, for an opportunity to be reported.
    pub min_edge_percent: f64,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            min_edge_percent: 0.0,
        }
    }
}

/// Rules applied when normalizing a raw odds-feed snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Only markets with this key are kept.
    pub market_key: String,
    /// Bookmaker quotes older than this are dropped.
    pub max_odds_age_seconds: i64,
    /// Bookmaker keys accepted from the feed.
    pub supported_bookmakers: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            market_key: "h2h".to_string(),
            max_odds_age_seconds: 60,
            supported_bookmakers: [
                "draftkings",
                "fanduel",
                "betmgm",
                "williamhill_us",
                "bovada",
                "pointsbetus",
                "betrivers",
                "wynnbet",
                "unibet",
                "betus",
                "mybookieag",
                "betonlineag",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

impl FeedConfig {
    #[must_use]
    pub fn supports(&self, bookmaker_key: &str) -> bool {
        self.supported_bookmakers
            .iter()
            .any(|key| key == bookmaker_key)
    }
}
