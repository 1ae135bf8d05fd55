//! Authentication contract consumed by the login screen.
//!
//! The screen never reaches for global state: it is handed an
//! [`AuthProvider`] and only talks to it through this trait.

mod error;
pub mod http;
pub mod session;

use std::future::Future;

pub use error::{AuthError, ErrorBody};
pub use http::HttpAuthProvider;
pub use session::{SessionSignal, SessionStore, StoredSession};

/// External authentication collaborator.
pub trait AuthProvider: Send + Sync {
    /// Attempts to sign in with the given credentials.
    ///
    /// # Errors
    /// Returns an [`AuthError`] if the credentials are rejected or the
    /// request cannot be completed.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;

    fn is_authenticated(&self) -> bool;

    /// One-shot notice describing why a previous session ended.
    fn auth_expired_message(&self) -> Option<String>;

    /// Acknowledges the notice so it is not surfaced again.
    fn clear_auth_expired_message(&self);

    /// Reads the signal the login screen needs at mount.
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: self.is_authenticated(),
            expired_message: self
                .auth_expired_message()
                .filter(|message| !message.is_empty()),
        }
    }
}

/// Point-in-time copy of a provider's session signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub expired_message: Option<String>,
}
