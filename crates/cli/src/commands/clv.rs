//! Closing line value CLI command.

use anyhow::Result;
use betedge_core::calculate_clv;
use clap::Args;

use super::{print_header, print_json};

/// Arguments for the clv command.
#[derive(Args, Debug, Clone)]
pub struct ClvArgs {
    /// Decimal odds taken
    #[arg(long)]
    pub bet_odds: f64,

    /// Decimal odds at market close
    #[arg(long)]
    pub closing_odds: f64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the clv command.
///
/// # Errors
/// Returns an error if either price is rejected.
pub fn run_clv(args: ClvArgs) -> Result<()> {
    let result = calculate_clv(args.bet_odds, args.closing_odds)?;

    if args.json {
        return print_json(&result);
    }

    print_header("CLOSING LINE VALUE");
    println!("Implied at bet:   {:.4}", result.implied_prob_bet);
    println!("Implied at close: {:.4}", result.implied_prob_close);
    println!("CLV:              {:+.2}%", result.percent);
    println!();
    println!("{}", result.interpretation);

    Ok(())
}
