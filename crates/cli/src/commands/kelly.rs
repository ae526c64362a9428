//! Kelly sizing CLI command.

use anyhow::Result;
use betedge_core::{KellySizer, OddsQuote};
use chrono::Utc;
use clap::Args;

use super::{print_header, print_json};

/// Arguments for the kelly command.
#[derive(Args, Debug, Clone)]
pub struct KellyArgs {
    /// Decimal odds on offer
    #[arg(long)]
    pub odds: f64,

    /// Your own win probability estimate
    #[arg(long)]
    pub probability: f64,

    /// Current bankroll
    #[arg(long)]
    pub bankroll: f64,

    /// Fraction of full Kelly to stake, in (0, 1]
    #[arg(long, default_value_t = 1.0)]
    pub multiplier: f64,

    /// Absolute cap on the recommended stake
    #[arg(long)]
    pub max_stake: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the kelly command.
///
/// # Errors
/// Returns an error if the inputs are rejected.
pub fn run_kelly(args: KellyArgs) -> Result<()> {
    let sizer = KellySizer::new(args.multiplier, args.max_stake)?;
    let quote = OddsQuote {
        bookmaker: String::new(),
        outcome_name: String::new(),
        price_decimal: args.odds,
        observed_at: Utc::now(),
    };
    let result = sizer.size(&quote, args.probability, args.bankroll)?;

    if args.json {
        return print_json(&result);
    }

    print_header("KELLY SIZING");
    println!("Kelly fraction:  {:.4}", result.fraction);
    println!("Multiplier:      {}", result.multiplier);
    println!("Recommended:     {:.2}", result.recommended_size);
    println!("Edge:            {:?}", result.reason);

    Ok(())
}
