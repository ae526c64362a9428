//! Web API server command.

use anyhow::Result;
use betedge_core::ConfigLoader;
use betedge_web_api::ApiServer;
use clap::Args;

/// Arguments for the server command.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Server address (defaults to the configured host and port)
    #[arg(short, long)]
    pub addr: Option<String>,

    /// Configuration profile overlay (loads config/Config.{profile}.toml)
    #[arg(long, env = "BETEDGE_PROFILE")]
    pub profile: Option<String>,
}

/// Runs the web API until interrupted.
///
/// # Errors
/// Returns an error if configuration cannot be loaded or the server fails to bind.
pub async fn run_server(args: ServerArgs) -> Result<()> {
    let config = match args.profile.as_deref() {
        Some(profile) => ConfigLoader::load_with_profile(profile)?,
        None => ConfigLoader::load()?,
    };
    let addr = args.addr.unwrap_or_else(|| config.server.addr());

    tracing::info!(
        max_odds_age_seconds = config.engine.max_odds_age_seconds,
        aging_warning_seconds = config.engine.aging_warning_seconds,
        "Starting betedge API on {}",
        addr
    );

    let server = ApiServer::new(config);

    tokio::select! {
        result = server.serve(&addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
