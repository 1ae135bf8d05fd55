//! Status command handler.

use anyhow::Result;
use chrono::Utc;
use doorway_core::auth::SessionStore;

/// # Errors
/// Returns an error if the session file cannot be read.
pub fn run() -> Result<()> {
    match SessionStore::at_default_path().load()? {
        None => println!("Not logged in."),
        Some(session) if session.is_expired_at(Utc::now()) => println!("Session expired."),
        Some(session) => println!(
            "Logged in as {} (expires {})",
            session.email,
            session.expires_at.format("%Y-%m-%d %H:%M UTC")
        ),
    }
    Ok(())
}
