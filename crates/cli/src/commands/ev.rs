//! Expected-value CLI command.

use anyhow::{Context, Result};
use betedge_core::{ConfigLoader, EvEngine, OddsQuote};
use chrono::{Duration, Utc};
use clap::Args;

use super::{print_header, print_json};

/// Arguments for the ev command.
#[derive(Args, Debug, Clone)]
pub struct EvArgs {
    /// Decimal odds on offer (e.g. 2.10)
    #[arg(long)]
    pub odds: f64,

    /// Your own win probability estimate, strictly between 0 and 1
    #[arg(long)]
    pub probability: f64,

    /// Cash stake
    #[arg(long)]
    pub stake: f64,

    /// How many seconds ago the price was observed
    #[arg(long, default_value_t = 0)]
    pub age_seconds: i64,

    /// Bookmaker offering the price
    #[arg(long, default_value = "manual")]
    pub bookmaker: String,

    /// Outcome the price is for
    #[arg(long, default_value = "")]
    pub outcome: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the ev command.
///
/// # Errors
/// Returns an error if configuration cannot be loaded or the inputs are rejected.
pub fn run_ev(args: EvArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let now = Utc::now();
    let observed_at = Duration::try_seconds(args.age_seconds)
        .and_then(|age| now.checked_sub_signed(age))
        .with_context(|| format!("--age-seconds {} is out of range", args.age_seconds))?;
    let quote = OddsQuote {
        bookmaker: args.bookmaker,
        outcome_name: args.outcome,
        price_decimal: args.odds,
        observed_at,
    };

    let result = EvEngine::with_config(config.engine).calculate(&quote, args.probability, args.stake, now)?;

    if args.json {
        return print_json(&result);
    }

    print_header("EXPECTED VALUE");
    println!("Bookmaker:       {}", result.inputs.odds.bookmaker);
    println!("Odds:            {:.2}", result.inputs.odds.price_decimal);
    println!("Probability:     {}", result.inputs.probability);
    println!("Stake:           {:.2}", result.inputs.stake);
    println!("Odds age:        {}s", result.odds_age_seconds);
    println!();
    println!("EV:              {:+.2}", result.ev_cash);
    println!("EV %:            {:+.2}%", result.ev_percent);
    println!("Formula:         {}", result.formula_used);
    for warning in &result.warnings {
        println!("Warning:         {warning}");
    }
    println!("Not modeled:     {}", result.excluded_features.join(", "));

    Ok(())
}
