//! Full-screen TUI implementation for the TechStore storefront.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
pub use runtime::TuiRuntime;
use techstore_core::config::Config;
use techstore_core::session::SessionClient;

/// Runs the interactive storefront.
///
/// Requires a terminal and a multi-threaded tokio runtime (effect handlers
/// run on spawned tasks); the session client handles all auth traffic.
pub async fn run_storefront<C>(config: &Config, client: Arc<C>) -> Result<()>
where
    C: SessionClient + Send + Sync + 'static,
{
    if !stderr().is_terminal() {
        anyhow::bail!("TechStore requires a terminal.");
    }

    let mut runtime = TuiRuntime::new(config.clone(), client)?;
    // Dropping the runtime restores the terminal and releases the
    // session-change subscription.
    runtime.run()
}
