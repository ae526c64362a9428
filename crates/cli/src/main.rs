use clap::{Parser, Subcommand};

mod commands;

use commands::{
    AnalyzeArgs, ArbitrageArgs, BonusArgs, ClvArgs, ConvertArgs, EvArgs, KellyArgs, ServerArgs,
};

#[derive(Parser)]
#[command(name = "betedge")]
#[command(version)]
#[command(about = "Sports-wagering analytics: EV, Kelly, CLV, arbitrage and bonus bets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web API server
    Server(ServerArgs),
    /// Expected value of a straight cash bet
    Ev(EvArgs),
    /// Kelly Criterion stake sizing
    Kelly(KellyArgs),
    /// Closing line value of a placed bet
    Clv(ClvArgs),
    /// Value a bonus (free) bet
    Bonus(BonusArgs),
    /// Convert between decimal and American odds
    Convert(ConvertArgs),
    /// Scan an odds snapshot file for two-way arbitrage
    Arbitrage(ArbitrageArgs),
    /// CLV, EV and Kelly breakdown for a recorded bet
    Analyze(AnalyzeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Server(args) => commands::run_server(args).await?,
        Commands::Ev(args) => commands::run_ev(args)?,
        Commands::Kelly(args) => commands::run_kelly(args)?,
        Commands::Clv(args) => commands::run_clv(args)?,
        Commands::Bonus(args) => commands::run_bonus(args)?,
        Commands::Convert(args) => commands::run_convert(args)?,
        Commands::Arbitrage(args) => commands::run_arbitrage(args)?,
        Commands::Analyze(args) => commands::run_analyze(args)?,
    }

    Ok(())
}
