//! Bet ledger analytics CLI command.

use anyhow::Result;
use betedge_core::{analyze_bet, ledger::CalculationStep, BetOutcome, BetSlip};
use clap::Args;

use super::{print_header, print_json};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Decimal odds taken
    #[arg(long)]
    pub odds: f64,

    /// Stake placed
    #[arg(long)]
    pub stake: f64,

    /// Decimal odds at market close
    #[arg(long)]
    pub closing_odds: Option<f64>,

    /// Your win probability estimate at bet time
    #[arg(long)]
    pub probability: Option<f64>,

    /// Bankroll for Kelly sizing (defaults to the stake)
    #[arg(long)]
    pub bankroll: Option<f64>,

    /// How the bet settled (win, lose, push)
    #[arg(long)]
    pub result: Option<BetOutcome>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if the slip is rejected.
pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let slip = BetSlip {
        odds: args.odds,
        stake: args.stake,
        closing_odds: args.closing_odds,
        probability: args.probability,
        bankroll: args.bankroll,
        result: args.result,
    };
    let analytics = analyze_bet(&slip)?;

    if args.json {
        return print_json(&analytics);
    }

    print_header("BET ANALYTICS");
    let show = |value: Option<rust_decimal::Decimal>, suffix: &str| {
        value.map_or_else(|| "n/a".to_string(), |v| format!("{v}{suffix}"))
    };
    println!("CLV:             {}", show(analytics.clv, "%"));
    println!("EV:              {}", show(analytics.expected_value, "%"));
    println!("Kelly size:      {}", show(analytics.kelly_size, ""));
    if let Some(outcome) = args.result {
        println!(
            "Realized ({outcome}): {}",
            show(analytics.realized_profit, "")
        );
    }

    let breakdown = &analytics.breakdown;
    for (name, step) in [
        ("CLV", &breakdown.clv),
        ("EV", &breakdown.expected_value),
        ("Kelly", &breakdown.kelly),
    ] {
        if let Some(step) = step {
            print_step(name, step);
        }
    }

    Ok(())
}

fn print_step(name: &str, step: &CalculationStep) {
    println!();
    println!("{name}: {}", step.formula);
    for line in &step.steps {
        println!("  - {line}");
    }
    println!("  = {}", step.calculation);
    println!("  {}", step.interpretation);
}
