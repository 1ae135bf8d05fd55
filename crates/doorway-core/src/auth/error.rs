use serde::{Deserialize, Serialize};

/// Error payload returned by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure of the external login operation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The server answered with a non-success status.
    #[error("login rejected (HTTP {status}){}", rejected_suffix(.body.as_ref()))]
    Rejected {
        status: u16,
        body: Option<ErrorBody>,
    },
    #[error("login request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected login response: {0}")]
    InvalidResponse(String),
    #[error("failed to store session: {0:#}")]
    Storage(anyhow::Error),
}

fn rejected_suffix(body: Option<&ErrorBody>) -> String {
    body.and_then(|b| b.message.as_deref())
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl AuthError {
    /// Convenience constructor for a rejection carrying a server message.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        AuthError::Rejected {
            status,
            body: Some(ErrorBody {
                message: Some(message.into()),
            }),
        }
    }

    /// The server-provided message nested in the failure payload, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AuthError::Rejected {
                body: Some(ErrorBody {
                    message: Some(message),
                }),
                ..
            } => {
                let message = message.trim();
                (!message.is_empty()).then_some(message)
            }
            _ => None,
        }
    }

    /// Message to show the user: the server's own text when present,
    /// otherwise `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}
