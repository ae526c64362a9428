//! Bonus bet valuation CLI command.

use anyhow::Result;
use betedge_core::calculate_bonus;
use clap::Args;

use super::{print_header, print_json};

/// Arguments for the bonus command.
#[derive(Args, Debug, Clone)]
pub struct BonusArgs {
    /// Bonus amount credited by the sportsbook
    #[arg(long)]
    pub amount: f64,

    /// Decimal odds the bonus will be placed at
    #[arg(long)]
    pub odds: f64,

    /// Rollover requirement as a multiple of the bonus
    #[arg(long, default_value_t = 1.0)]
    pub rollover: f64,

    /// Sportsbook's maximum win on the bonus
    #[arg(long)]
    pub max_win: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the bonus command.
///
/// # Errors
/// Returns an error if the bonus terms are rejected.
pub fn run_bonus(args: BonusArgs) -> Result<()> {
    let result = calculate_bonus(args.amount, args.odds, args.rollover, args.max_win)?;

    if args.json {
        return print_json(&result);
    }

    print_header("BONUS BET VALUE");
    println!("Potential win:   {:.2}{}", result.potential_win, if result.capped { " (capped)" } else { "" });
    println!("Rollover:        {:.2}", result.rollover_amount);
    println!("Effective odds:  {:.2}", result.effective_odds);
    println!("EV:              {:+.2}", result.ev);
    println!();
    for caveat in &result.caveats {
        println!("Note: {caveat}");
    }

    Ok(())
}
