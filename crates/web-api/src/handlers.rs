use axum::{
    extract::{Query, State},
    Json,
};
use betedge_arbitrage::{ArbitrageDetector, ArbitrageOpportunity, DetectionSummary, DetectorConfig};
use betedge_core::{
    american_to_decimal, analyze_bet, calculate_bonus, calculate_clv, decimal_to_american,
    implied_probability, normalize_events, BetAnalytics, BetSlip, BonusBetResult, ClvResult,
    EvEngine, EvResult, Event, KellyResult, KellySizer, NormalizedFeed, OddsQuote, RawEvent,
    WagerError, EXCLUDED_FEATURES,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::server::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub supported_features: Vec<String>,
    pub excluded_features: Vec<String>,
    pub constraints: Constraints,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Constraints {
    pub max_odds_age_seconds: i64,
    pub aging_warning_seconds: i64,
    pub market: String,
    pub supported_bookmakers: Vec<String>,
}

const SUPPORTED_FEATURES: [&str; 8] = [
    "expected_value",
    "kelly_sizing",
    "closing_line_value",
    "bonus_bet_valuation",
    "arbitrage_detection",
    "odds_conversion",
    "odds_normalization",
    "bet_analytics",
];

/// Reports service status and the engine's operating constraints.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = &state.config;
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        supported_features: SUPPORTED_FEATURES.iter().map(ToString::to_string).collect(),
        excluded_features: EXCLUDED_FEATURES.iter().map(ToString::to_string).collect(),
        constraints: Constraints {
            max_odds_age_seconds: config.engine.max_odds_age_seconds,
            aging_warning_seconds: config.engine.aging_warning_seconds,
            market: config.feed.market_key.clone(),
            supported_bookmakers: config.feed.supported_bookmakers.clone(),
        },
    })
}

// =============================================================================
// Expected Value
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct EvRequest {
    pub odds: f64,
    pub true_probability: f64,
    pub cash_stake: f64,
    pub odds_timestamp: DateTime<Utc>,
    pub odds_source: String,
    pub event_description: Option<String>,
    pub outcome_name: Option<String>,
    pub bookmaker_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvResponse {
    #[serde(flatten)]
    pub result: EvResult,
    pub odds_source: String,
    pub event_description: Option<String>,
    pub outcome_name: Option<String>,
    pub bookmaker_name: Option<String>,
}

/// Calculates the expected value of a straight cash bet.
///
/// # Errors
/// Returns 422 for invalid inputs or odds older than the configured maximum.
pub async fn calculate_ev(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EvRequest>,
) -> ApiResult<EvResponse> {
    // Built as a literal so the engine reports errors in its own order.
    let quote = OddsQuote {
        bookmaker: req
            .bookmaker_name
            .clone()
            .unwrap_or_else(|| req.odds_source.clone()),
        outcome_name: req.outcome_name.clone().unwrap_or_default(),
        price_decimal: req.odds,
        observed_at: req.odds_timestamp,
    };

    let engine = EvEngine::with_config(state.config.engine);
    let result = engine.calculate(&quote, req.true_probability, req.cash_stake, Utc::now())?;

    Ok(Json(EvResponse {
        result,
        odds_source: req.odds_source,
        event_description: req.event_description,
        outcome_name: req.outcome_name,
        bookmaker_name: req.bookmaker_name,
    }))
}

// =============================================================================
// Kelly
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct KellyRequest {
    pub odds: f64,
    pub probability: f64,
    pub bankroll: f64,
    pub multiplier: Option<f64>,
    pub max_stake: Option<f64>,
}

/// Sizes a bet with the (optionally fractional) Kelly Criterion.
///
/// # Errors
/// Returns 422 for invalid inputs.
pub async fn calculate_kelly(Json(req): Json<KellyRequest>) -> ApiResult<KellyResult> {
    let sizer = KellySizer::new(req.multiplier.unwrap_or(1.0), req.max_stake)?;
    let quote = OddsQuote {
        bookmaker: String::new(),
        outcome_name: String::new(),
        price_decimal: req.odds,
        observed_at: Utc::now(),
    };
    Ok(Json(sizer.size(&quote, req.probability, req.bankroll)?))
}

// =============================================================================
// CLV
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ClvRequest {
    pub bet_odds: f64,
    pub closing_odds: f64,
}

/// Calculates closing line value.
///
/// # Errors
/// Returns 422 for invalid odds.
pub async fn calculate_clv_handler(Json(req): Json<ClvRequest>) -> ApiResult<ClvResult> {
    Ok(Json(calculate_clv(req.bet_odds, req.closing_odds)?))
}

// =============================================================================
// Bonus Bets
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct BonusRequest {
    pub bonus_amount: f64,
    pub odds: f64,
    pub rollover_multiplier: f64,
    pub max_win: Option<f64>,
}

/// Values a bonus bet.
///
/// # Errors
/// Returns 422 for invalid terms.
pub async fn calculate_bonus_handler(Json(req): Json<BonusRequest>) -> ApiResult<BonusBetResult> {
    Ok(Json(calculate_bonus(
        req.bonus_amount,
        req.odds,
        req.rollover_multiplier,
        req.max_win,
    )?))
}

// =============================================================================
// Arbitrage
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ArbitrageScanRequest {
    pub event: Event,
    pub min_edge_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArbitrageScanResponse {
    pub opportunity: Option<ArbitrageOpportunity>,
}

#[derive(Debug, Deserialize)]
pub struct ArbitrageScanAllRequest {
    pub events: Vec<Event>,
    pub min_edge_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArbitrageScanAllResponse {
    pub opportunities: Vec<ArbitrageOpportunity>,
    pub summary: DetectionSummary,
}

fn detector(state: &AppState, min_edge_percent: Option<f64>) -> Result<ArbitrageDetector, WagerError> {
    let config = DetectorConfig::from(&state.config.arbitrage);
    let config = match min_edge_percent {
        Some(edge) => config.with_min_edge_percent(edge),
        None => config,
    };
    ArbitrageDetector::with_config(config)
}

/// Checks one event for a two-way arbitrage.
///
/// # Errors
/// Returns 422 for an invalid edge threshold.
pub async fn scan_arbitrage(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArbitrageScanRequest>,
) -> ApiResult<ArbitrageScanResponse> {
    let detector = detector(&state, req.min_edge_percent)?;
    Ok(Json(ArbitrageScanResponse {
        opportunity: detector.detect(&req.event),
    }))
}

/// Scans many events and ranks opportunities by profit.
///
/// # Errors
/// Returns 422 for an invalid edge threshold.
pub async fn scan_all_arbitrage(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArbitrageScanAllRequest>,
) -> ApiResult<ArbitrageScanAllResponse> {
    let scan = detector(&state, req.min_edge_percent)?.scan(&req.events);
    let summary = scan.summary;
    Ok(Json(ArbitrageScanAllResponse {
        opportunities: scan.into_opportunities(),
        summary,
    }))
}

// =============================================================================
// Odds
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub events: Vec<RawEvent>,
}

/// Normalizes a raw odds-feed snapshot.
pub async fn normalize_odds(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NormalizeRequest>,
) -> Json<NormalizedFeed> {
    Json(normalize_events(&req.events, &state.config.feed, Utc::now()))
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub decimal: Option<f64>,
    pub american: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub decimal: f64,
    pub american: String,
    pub implied_probability: f64,
}

/// Converts between decimal and American odds.
///
/// # Errors
/// Returns 422 unless exactly one valid format is supplied.
pub async fn convert_odds(Query(query): Query<ConvertQuery>) -> ApiResult<ConvertResponse> {
    let decimal = match (query.decimal, query.american.as_deref()) {
        (Some(decimal), None) => decimal,
        (None, Some(american)) => american_to_decimal(american)?,
        _ => {
            return Err(WagerError::invalid_input(
                "decimal",
                "",
                "provide exactly one of `decimal` or `american`",
            )
            .into())
        }
    };

    Ok(Json(ConvertResponse {
        decimal,
        american: decimal_to_american(decimal)?,
        implied_probability: implied_probability(decimal)?,
    }))
}

// =============================================================================
// Bet Ledger
// =============================================================================

/// Computes CLV, EV and Kelly analytics for a recorded bet.
///
/// # Errors
/// Returns 422 for out-of-range slip fields.
pub async fn analyze_bet_handler(Json(slip): Json<BetSlip>) -> ApiResult<BetAnalytics> {
    Ok(Json(analyze_bet(&slip)?))
}
