//! Auth provider backed by a JSON login endpoint.

use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{AuthError, ErrorBody};
use super::session::{SessionSignal, SessionStore, StoredSession};
use super::AuthProvider;
use crate::config::{ApiConfig, Config};

/// Upper bound for a server-provided session lifetime (one year).
const MAX_SESSION_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Signs in against `<base_url><login_path>` and persists the session.
#[derive(Debug)]
pub struct HttpAuthProvider {
    client: reqwest::Client,
    login_url: Url,
    store: SessionStore,
    signal: RwLock<SessionSignal>,
}

impl HttpAuthProvider {
    /// Creates a provider with an explicit starting signal.
    ///
    /// # Errors
    /// Returns an error if the login URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(api: &ApiConfig, store: SessionStore, signal: SessionSignal) -> Result<Self> {
        let login_url = api.login_url()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = api.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            login_url,
            store,
            signal: RwLock::new(signal),
        })
    }

    /// Creates a provider whose signal is restored from `store`.
    ///
    /// A lapsed stored session yields the locale's session-expired notice.
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be read or the
    /// provider cannot be built.
    pub fn from_config(config: &Config, store: SessionStore) -> Result<Self> {
        let notice = config.locale.strings().session_expired;
        let signal = SessionSignal::restore(&store, Utc::now(), notice)?;
        Self::new(&config.api, store, signal)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Forgets the stored session. Returns true if one existed.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be removed.
    pub fn logout(&self) -> Result<bool> {
        let removed = self.store.clear()?;
        self.signal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .authenticated = false;
        Ok(removed)
    }
}

impl AuthProvider for HttpAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        tracing::debug!(url = %self.login_url, "sending login request");
        let response = self
            .client
            .post(self.login_url.clone())
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<ErrorBody>(&text).ok();
            tracing::warn!(status = status.as_u16(), "login rejected by server");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        let lifetime = i64::try_from(token.expires_in.min(MAX_SESSION_SECS)).unwrap_or(i64::MAX);
        let session = StoredSession {
            email: email.to_string(),
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        };
        self.store.save(&session).map_err(AuthError::Storage)?;

        {
            let mut signal = self.signal.write().unwrap_or_else(PoisonError::into_inner);
            signal.authenticated = true;
        }
        tracing::info!(expires_at = %session.expires_at, "session stored");
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.signal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .authenticated
    }

    fn auth_expired_message(&self) -> Option<String> {
        self.signal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .expired_message
            .clone()
    }

    fn clear_auth_expired_message(&self) {
        self.signal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .expired_message = None;
    }
}
