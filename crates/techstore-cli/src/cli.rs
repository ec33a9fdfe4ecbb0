//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use techstore_core::config::{Config, paths};
use techstore_core::logging;
use techstore_core::session::HttpSessionClient;

#[derive(Parser)]
#[command(name = "techstore")]
#[command(version = "1.0")]
#[command(about = "TechStore terminal storefront")]
struct Cli {
    /// Override the TechStore home directory (config, session, logs)
    #[arg(long, value_name = "DIR", env = "TECHSTORE_HOME")]
    home: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(home) = cli.home.as_deref() {
        // Propagate so paths:: resolution picks it up everywhere.
        // Safe: set before any threads are spawned.
        unsafe { std::env::set_var("TECHSTORE_HOME", home) };
    }

    // The TUI owns the terminal, so logs go to a file. The guard must
    // outlive the event loop to flush on exit.
    let _log_guard = logging::init(&paths::logs_dir()).context("initialize logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(_cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    if !config.auth.is_configured() {
        // Startup proceeds; the catalog works without auth and submissions
        // fail with a configuration message instead of a request.
        tracing::error!("Auth service credentials missing; sign-in is unavailable");
    }

    let client = Arc::new(HttpSessionClient::from_config(&config.auth));
    techstore_tui::run_storefront(&config, client).await
}
