//! Binary entry point: resolve configuration, start logging, open the
//! catalog, and drive the Ratatui event loop until the user quits.
use anyhow::Context;
use cli_catalog::{logging, run_app, App, AppConfig, SqliteStore, SystemClipboard};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_file, &config.log_filter)?;
    info!(db = %config.db_path.display(), "starting cli-catalog");

    let store = SqliteStore::open(&config.db_path).context("failed to open catalog")?;
    let mut app = App::new(store, SystemClipboard::new());
    run_app(&mut app)?;

    info!("exiting");
    Ok(())
}
