//! Persisted session and the in-memory session signal.
//!
//! The store keeps the last successful login in `<DOORWAY_HOME>/session.json`.
//! The signal is what the login screen reads: whether the user is
//! authenticated, and a one-shot message when a stored session has lapsed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// A session written after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub email: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// JSON file holding at most one [`StoredSession`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<DOORWAY_HOME>/session.json`.
    pub fn at_default_path() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session. Returns `None` if no session file exists.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Writes the session, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))
    }

    /// Removes the session file. Returns true if one was removed.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session at {}", self.path.display()))?;
        Ok(true)
    }
}

/// Authentication status as seen by the login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSignal {
    pub authenticated: bool,
    pub expired_message: Option<String>,
}

impl SessionSignal {
    /// Restores the signal from the store.
    ///
    /// A live session means authenticated. A lapsed one is removed from disk
    /// and turned into `expired_notice`, which the caller surfaces once.
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be read or a lapsed
    /// one cannot be removed.
    pub fn restore(store: &SessionStore, now: DateTime<Utc>, expired_notice: &str) -> Result<Self> {
        match store.load()? {
            Some(session) if session.is_expired_at(now) => {
                store.clear()?;
                tracing::info!(expired_at = %session.expires_at, "stored session has expired");
                Ok(Self {
                    authenticated: false,
                    expired_message: Some(expired_notice.to_string()),
                })
            }
            Some(_) => Ok(Self {
                authenticated: true,
                expired_message: None,
            }),
            None => Ok(Self::default()),
        }
    }
}
