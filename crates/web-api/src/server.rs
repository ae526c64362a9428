use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use betedge_core::AppConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: AppConfig,
}

pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: Arc::new(AppState { config }),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/health", get(handlers::health))
            .route("/api/ev/calculate", post(handlers::calculate_ev))
            .route("/api/kelly/calculate", post(handlers::calculate_kelly))
            .route("/api/clv/calculate", post(handlers::calculate_clv_handler))
            .route("/api/bonus/calculate", post(handlers::calculate_bonus_handler))
            .route("/api/arbitrage/scan", post(handlers::scan_arbitrage))
            .route("/api/arbitrage/scan-all", post(handlers::scan_all_arbitrage))
            .route("/api/odds/normalize", post(handlers::normalize_odds))
            .route("/api/odds/convert", get(handlers::convert_odds))
            .route("/api/bets/analyze", post(handlers::analyze_bet_handler))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        ApiServer::new(AppConfig::default()).router()
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read(response).await
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read(response).await
    }

    async fn read(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn event_json() -> Value {
        json!({
            "id": "evt-1",
            "sport_key": "basketball_nba",
            "sport_title": "NBA",
            "commence_time": "2026-01-11T00:00:00Z",
            "home_team": "Home",
            "away_team": "Away",
            "bookmakers": [
                {
                    "key": "a", "title": "A", "last_update": "2026-01-10T18:00:00Z",
                    "outcomes": [{"name": "Home", "price": 2.10}, {"name": "Away", "price": 2.05}]
                },
                {
                    "key": "b", "title": "B", "last_update": "2026-01-10T18:00:00Z",
                    "outcomes": [{"name": "Home", "price": 2.00}, {"name": "Away", "price": 2.20}]
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["constraints"]["max_odds_age_seconds"], 60);
        assert_eq!(body["constraints"]["aging_warning_seconds"], 30);
        assert!(body["excluded_features"]
            .as_array()
            .unwrap()
            .contains(&json!("parlays")));
    }

    #[tokio::test]
    async fn test_ev_echoes_provenance() {
        let (status, body) = post_json(
            "/api/ev/calculate",
            json!({
                "odds": 2.10,
                "true_probability": 0.52,
                "cash_stake": 100.0,
                "odds_timestamp": (Utc::now() - Duration::seconds(5)).to_rfc3339(),
                "odds_source": "the-odds-api",
                "event_description": "Lakers @ Celtics",
                "outcome_name": "Los Angeles Lakers",
                "bookmaker_name": "DraftKings"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!((body["ev_cash"].as_f64().unwrap() - 9.2).abs() < 1e-9);
        assert_eq!(body["odds_source"], "the-odds-api");
        assert_eq!(body["event_description"], "Lakers @ Celtics");
        assert_eq!(body["inputs"]["odds"]["bookmaker"], "DraftKings");
    }

    #[tokio::test]
    async fn test_ev_rejects_stale_odds() {
        let (status, body) = post_json(
            "/api/ev/calculate",
            json!({
                "odds": 2.10,
                "true_probability": 0.52,
                "cash_stake": 100.0,
                "odds_timestamp": (Utc::now() - Duration::seconds(300)).to_rfc3339(),
                "odds_source": "the-odds-api"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "StaleOdds");
        assert_eq!(body["field"], "observed_at");
    }

    #[tokio::test]
    async fn test_ev_rejects_bad_probability() {
        let (status, body) = post_json(
            "/api/ev/calculate",
            json!({
                "odds": 2.10,
                "true_probability": 1.0,
                "cash_stake": 100.0,
                "odds_timestamp": Utc::now().to_rfc3339(),
                "odds_source": "manual"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "InvalidProbability");
        assert!(body["constraint"].as_str().unwrap().contains("probability"));
    }

    #[tokio::test]
    async fn test_kelly() {
        let (status, body) = post_json(
            "/api/kelly/calculate",
            json!({"odds": 2.0, "probability": 0.6, "bankroll": 1000.0, "multiplier": 0.5}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["recommended_size"].as_f64().unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(body["reason"], "PositiveEdge");
    }

    #[tokio::test]
    async fn test_clv() {
        let (status, body) =
            post_json("/api/clv/calculate", json!({"bet_odds": 2.10, "closing_odds": 1.90})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["direction"], "Favorable");
    }

    #[tokio::test]
    async fn test_bonus_rejects_zero_amount() {
        let (status, body) = post_json(
            "/api/bonus/calculate",
            json!({"bonus_amount": 0.0, "odds": 2.0, "rollover_multiplier": 1.0}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "InvalidInput");
        assert_eq!(body["field"], "bonus_amount");
    }

    #[tokio::test]
    async fn test_arbitrage_scan() {
        let (status, body) = post_json(
            "/api/arbitrage/scan",
            json!({"event": event_json(), "min_edge_percent": 1.0}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let opp = &body["opportunity"];
        assert_eq!(opp["outcome1"]["bookmaker"], "A");
        assert_eq!(opp["outcome2"]["bookmaker"], "B");
        assert!((opp["profit_percent"].as_f64().unwrap() - 7.4419).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_arbitrage_scan_filters_by_edge() {
        let (status, body) = post_json(
            "/api/arbitrage/scan",
            json!({"event": event_json(), "min_edge_percent": 10.0}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["opportunity"].is_null());
    }

    #[tokio::test]
    async fn test_arbitrage_scan_all() {
        let (status, body) = post_json(
            "/api/arbitrage/scan-all",
            json!({"events": [event_json()]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opportunities"].as_array().unwrap().len(), 1);
        assert_eq!(body["summary"]["events_scanned"], 1);
    }

    #[tokio::test]
    async fn test_arbitrage_rejects_negative_edge() {
        let (status, body) = post_json(
            "/api/arbitrage/scan",
            json!({"event": event_json(), "min_edge_percent": -1.0}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "min_edge_percent");
    }

    #[tokio::test]
    async fn test_normalize_drops_unsupported_bookmakers() {
        let fresh = (Utc::now() - Duration::seconds(5)).to_rfc3339();
        let (status, body) = post_json(
            "/api/odds/normalize",
            json!({"events": [{
                "id": "evt",
                "sport_key": "icehockey_nhl",
                "sport_title": "NHL",
                "commence_time": "2026-01-11T00:00:00Z",
                "home_team": "Boston Bruins",
                "away_team": "New York Rangers",
                "bookmakers": [
                    {"key": "fanduel", "title": "FanDuel", "last_update": fresh, "markets": [
                        {"key": "h2h", "outcomes": [
                            {"name": "Boston Bruins", "price": 1.87},
                            {"name": "New York Rangers", "price": 1.98}
                        ]}
                    ]},
                    {"key": "unknown", "title": "Unknown", "last_update": fresh, "markets": []}
                ]
            }]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["events"][0]["bookmakers"].as_array().unwrap().len(), 1);
        assert_eq!(body["stats"]["bookmakers_unsupported"], 1);
    }

    #[tokio::test]
    async fn test_convert_american() {
        let (status, body) = get_json("/api/odds/convert?american=%2B150").await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["decimal"].as_f64().unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(body["american"], "+150");
        assert!((body["implied_probability"].as_f64().unwrap() - 0.4).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_convert_requires_one_format() {
        let (status, body) = get_json("/api/odds/convert").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "InvalidInput");
    }

    #[tokio::test]
    async fn test_analyze_bet() {
        let (status, body) = post_json(
            "/api/bets/analyze",
            json!({"odds": 2.0, "stake": 100.0, "closing_odds": 1.8, "probability": 0.6}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["expected_value"], json!(20.0));
        assert_eq!(body["kelly_size"], json!(20.0));
        assert!(body["breakdown"]["clv"]["formula"].is_string());
        assert!(body["realized_profit"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_settled_bet() {
        let (status, body) = post_json(
            "/api/bets/analyze",
            json!({"odds": 2.5, "stake": 40.0, "result": "win"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["realized_profit"], json!(60.0));
    }

    #[tokio::test]
    async fn test_analyze_rejects_huge_bankroll() {
        let (status, body) = post_json(
            "/api/bets/analyze",
            json!({"odds": 2.0, "stake": 100.0, "probability": 0.6, "bankroll": 1e30}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "bankroll");
    }
}
