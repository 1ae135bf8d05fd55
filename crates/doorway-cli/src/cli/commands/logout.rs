use anyhow::{Context, Result};
use doorway_core::auth::{HttpAuthProvider, SessionStore};
use doorway_core::config::Config;

/// # Errors
/// Returns an error if the session file cannot be read or removed.
pub fn run(config: &Config) -> Result<()> {
    let provider = HttpAuthProvider::from_config(config, SessionStore::at_default_path())
        .context("set up auth provider")?;
    if provider.logout()? {
        tracing::info!("session removed");
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}
