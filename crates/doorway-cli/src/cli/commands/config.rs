//! Config command handlers.

use anyhow::{Context, Result};
use doorway_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

/// # Errors
/// Returns an error if the config file exists or cannot be written.
pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}
