//! Arbitrage scan CLI command.
//!
//! Reads an odds snapshot from a JSON file and prints every two-way arbitrage,
//! best first.

use anyhow::{Context, Result};
use betedge_arbitrage::{ArbitrageDetector, DetectorConfig};
use betedge_core::{normalize_events, ConfigLoader, Event, RawEvent};
use chrono::Utc;
use clap::Args;
use serde::Serialize;

use super::{print_header, print_json};

/// Arguments for the arbitrage command.
#[derive(Args, Debug, Clone)]
pub struct ArbitrageArgs {
    /// JSON file containing an array of events
    #[arg(short, long)]
    pub file: String,

    /// Minimum guaranteed profit in percent (defaults to the configured value)
    #[arg(long)]
    pub min_edge: Option<f64>,

    /// Treat the file as a raw odds-API snapshot and normalize it first
    #[arg(long)]
    pub raw: bool,

    /// Total stake used to show per-leg amounts
    #[arg(long, default_value_t = 100.0)]
    pub stake: f64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ScanOutput {
    opportunities: Vec<betedge_arbitrage::ArbitrageOpportunity>,
    summary: betedge_arbitrage::DetectionSummary,
}

/// Runs the arbitrage command.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or the edge is invalid.
pub fn run_arbitrage(args: ArbitrageArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read odds snapshot {}", args.file))?;

    let events: Vec<Event> = if args.raw {
        let raw: Vec<RawEvent> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse raw snapshot {}", args.file))?;
        let feed = normalize_events(&raw, &config.feed, Utc::now());
        tracing::info!(
            received = feed.stats.events_received,
            kept = feed.stats.events_kept,
            "Normalized raw snapshot"
        );
        feed.events
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse events from {}", args.file))?
    };

    let mut detector_config = DetectorConfig::from(&config.arbitrage);
    if let Some(edge) = args.min_edge {
        detector_config = detector_config.with_min_edge_percent(edge);
    }
    let scan = ArbitrageDetector::with_config(detector_config)?.scan(&events);
    let summary = scan.summary;
    let opportunities = scan.into_opportunities();

    if args.json {
        return print_json(&ScanOutput {
            opportunities,
            summary,
        });
    }

    print_header("ARBITRAGE SCAN");
    println!(
        "Events scanned: {}  skipped: {}  opportunities: {}",
        summary.events_scanned, summary.events_skipped, summary.opportunities_found
    );

    if opportunities.is_empty() {
        println!();
        println!("No arbitrage opportunities found.");
        return Ok(());
    }

    for opp in &opportunities {
        let (stake1, stake2) = opp.stakes_for(args.stake);
        println!();
        println!("{} [{}]", opp.event_description, opp.event_id);
        println!(
            "  {:<24} @ {:>6.2}  {:<16} stake {:>5.2}% ({:.2})",
            opp.outcome1.outcome_name,
            opp.outcome1.price_decimal,
            opp.outcome1.bookmaker,
            opp.stake1_percent,
            stake1
        );
        println!(
            "  {:<24} @ {:>6.2}  {:<16} stake {:>5.2}% ({:.2})",
            opp.outcome2.outcome_name,
            opp.outcome2.price_decimal,
            opp.outcome2.bookmaker,
            opp.stake2_percent,
            stake2
        );
        println!(
            "  Profit: {:.2}% ({:.2} on {:.2})",
            opp.profit_percent,
            opp.guaranteed_profit(args.stake),
            args.stake
        );
    }

    Ok(())
}
