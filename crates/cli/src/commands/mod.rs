//! CLI commands for the wagering analytics engine.

pub mod analyze;
pub mod arbitrage;
pub mod bonus;
pub mod clv;
pub mod convert;
pub mod ev;
pub mod kelly;
pub mod server;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use arbitrage::{run_arbitrage, ArbitrageArgs};
pub use bonus::{run_bonus, BonusArgs};
pub use clv::{run_clv, ClvArgs};
pub use convert::{run_convert, ConvertArgs};
pub use ev::{run_ev, EvArgs};
pub use kelly::{run_kelly, KellyArgs};
pub use server::{run_server, ServerArgs};

use anyhow::Result;
use serde::Serialize;

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a report banner.
pub(crate) fn print_header(title: &str) {
    println!();
    println!("{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}
