//! Login page controller.
//!
//! Owns the injected auth provider and navigator, feeds events through the
//! reducer and executes the effects it returns. Login calls run as tokio
//! tasks and report back through the inbox.

use std::sync::Arc;

use doorway_core::config::Config;
use doorway_core::{AuthProvider, Locale, NavigateOptions, Navigator};

use super::inbox::{self, UiEventReceiver, UiEventSender};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::update;

/// Settings the page needs from configuration.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub locale: Locale,
    pub landing_path: String,
    pub login_path: String,
}

impl From<&Config> for PageOptions {
    fn from(config: &Config) -> Self {
        Self {
            locale: config.locale,
            landing_path: config.landing_path.clone(),
            login_path: config.login_path.clone(),
        }
    }
}

/// How the screen was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigated(String),
    Quit,
}

pub struct LoginPage<P, N> {
    provider: Arc<P>,
    navigator: N,
    login_path: String,
    state: AppState,
    last_authenticated: bool,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
}

impl<P, N> LoginPage<P, N>
where
    P: AuthProvider + 'static,
    N: Navigator,
{
    pub fn new(provider: Arc<P>, navigator: N, options: PageOptions) -> Self {
        let (inbox_tx, inbox_rx) = inbox::channel();
        Self {
            provider,
            navigator,
            login_path: options.login_path,
            state: AppState::new(options.locale, options.landing_path),
            last_authenticated: false,
            inbox_tx,
            inbox_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Reads the provider's session signal and shows the screen.
    pub fn mount(&mut self) {
        let snapshot = self.provider.snapshot();
        self.last_authenticated = snapshot.authenticated;
        self.dispatch(UiEvent::Mounted(snapshot));
    }

    pub fn unmount(&mut self) {
        self.dispatch(UiEvent::Unmounted);
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Emits `SessionChanged` when the provider's authenticated flag moved
    /// since the last look.
    pub fn sync_session(&mut self) {
        if !self.state.mounted {
            return;
        }
        let authenticated = self.provider.is_authenticated();
        if authenticated != self.last_authenticated {
            self.last_authenticated = authenticated;
            self.dispatch(UiEvent::SessionChanged { authenticated });
        }
    }

    /// Applies every event already waiting in the inbox. Returns how many.
    pub fn drain_inbox(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next inbox event and applies it.
    pub async fn next_event(&mut self) -> bool {
        match self.inbox_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// True once the navigator points somewhere other than the login path.
    pub fn has_left(&self) -> bool {
        self.navigator.location() != self.login_path
    }

    pub fn is_finished(&self) -> bool {
        self.state.should_quit || self.has_left()
    }

    pub fn outcome(&self) -> LoginOutcome {
        if self.has_left() {
            LoginOutcome::Navigated(self.navigator.location().to_string())
        } else {
            LoginOutcome::Quit
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Login {
                request,
                cancel,
                email,
                password,
            } => {
                let provider = Arc::clone(&self.provider);
                let tx = self.inbox_tx.clone();
                tokio::spawn(async move {
                    let result = tokio::select! {
                        biased;
                        () = cancel.cancelled() => return,
                        result = provider.login(&email, &password) => result,
                    };
                    let _ = tx.send(UiEvent::LoginFinished { request, result });
                });
            }
            UiEffect::CancelLogin { token } => token.cancel(),
            UiEffect::Navigate { path, replace } => {
                self.navigator.navigate(&path, NavigateOptions { replace });
                tracing::info!(path = %path, replace, "navigated");
            }
            UiEffect::ClearExpiredMessage => {
                self.provider.clear_auth_expired_message();
                tracing::info!("session-expired notice acknowledged");
            }
        }
    }
}

impl<P, N> Drop for LoginPage<P, N> {
    fn drop(&mut self) {
        if let Some(token) = self.state.login.cancel() {
            token.cancel();
        }
    }
}
