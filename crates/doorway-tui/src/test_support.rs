//! Scripted auth provider for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use doorway_core::{AuthError, AuthProvider};
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct StubProvider {
    calls: Mutex<Vec<(String, String)>>,
    outcomes: Mutex<VecDeque<Result<(), AuthError>>>,
    gate: Option<Notify>,
    authenticated: AtomicBool,
    expired: Mutex<Option<String>>,
    clear_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(self) -> Self {
        self.authenticated.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_expired_message(self, message: &str) -> Self {
        *self.expired.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Queues the outcome of the next login call. Unscripted calls succeed.
    pub fn respond(self, outcome: Result<(), AuthError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    /// Makes login calls wait for [`StubProvider::release`].
    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn set_authenticated(&self, value: bool) {
        self.authenticated.store(value, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

impl AuthProvider for StubProvider {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()));
        if outcome.is_ok() {
            self.authenticated.store(true, Ordering::SeqCst);
        }
        outcome
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn auth_expired_message(&self) -> Option<String> {
        self.expired.lock().unwrap().clone()
    }

    fn clear_auth_expired_message(&self) {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        *self.expired.lock().unwrap() = None;
    }
}
