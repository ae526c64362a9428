//! Odds conversion CLI command.

use anyhow::Result;
use betedge_core::{american_to_decimal, decimal_to_american, implied_probability};
use clap::Args;
use serde::Serialize;

use super::print_json;

/// Arguments for the convert command.
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Decimal odds to convert
    #[arg(long, conflicts_with = "american")]
    pub decimal: Option<f64>,

    /// American odds to convert (e.g. +150 or -200)
    #[arg(long, allow_hyphen_values = true)]
    pub american: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Conversion {
    decimal: f64,
    american: String,
    implied_probability: f64,
}

/// Runs the convert command.
///
/// # Errors
/// Returns an error if the odds are not valid.
pub fn run_convert(args: ConvertArgs) -> Result<()> {
    let decimal = match (args.decimal, args.american.as_deref()) {
        (Some(decimal), None) => decimal,
        (None, Some(american)) => american_to_decimal(american)?,
        _ => anyhow::bail!("provide exactly one of --decimal or --american"),
    };

    let conversion = Conversion {
        decimal,
        american: decimal_to_american(decimal)?,
        implied_probability: implied_probability(decimal)?,
    };

    if args.json {
        return print_json(&conversion);
    }

    println!("Decimal:   {:.3}", conversion.decimal);
    println!("American:  {}", conversion.american);
    println!("Implied:   {:.2}%", conversion.implied_probability * 100.0);

    Ok(())
}
