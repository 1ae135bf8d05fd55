//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen in [`LoginPage`]; the reducer stays pure. Login
//! results arrive through the inbox channel and are drained every frame.
//!
//! - `page.rs`: the controller shared by the terminal and headless drivers
//! - `inbox.rs`: inbox channel types
//! - `headless.rs`: non-interactive driver

mod headless;
mod inbox;
mod page;

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use doorway_core::{AuthProvider, HistoryNavigator};
pub use headless::{HeadlessOutcome, run_headless};
pub use page::{LoginOutcome, LoginPage, PageOptions};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::events::UiEvent;
use crate::{render, terminal};

/// Poll interval while a login is in flight.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen login runtime.
///
/// Terminal state is restored on drop or panic.
pub struct TuiRuntime<P> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    page: LoginPage<P, HistoryNavigator>,
}

impl<P> TuiRuntime<P>
where
    P: AuthProvider + 'static,
{
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(provider: Arc<P>, options: PageOptions) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let navigator = HistoryNavigator::new(options.login_path.clone());
        let page = LoginPage::new(provider, navigator, options);
        Ok(Self { terminal, page })
    }

    /// # Errors
    /// Returns an error if drawing or reading terminal events fails.
    pub fn run(&mut self) -> Result<LoginOutcome> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<LoginOutcome> {
        self.page.mount();
        let mut dirty = true;

        while !self.page.is_finished() {
            self.page.sync_session();
            if self.page.drain_inbox() > 0 {
                dirty = true;
            }
            if self.page.is_finished() {
                break;
            }

            if dirty {
                let state = self.page.state();
                self.terminal.draw(|frame| render::render(state, frame))?;
                dirty = false;
            }

            let poll = if self.page.state().form.is_submitting() {
                FRAME_DURATION
            } else {
                IDLE_POLL_DURATION
            };
            if event::poll(poll)? {
                self.page.dispatch(UiEvent::Terminal(event::read()?));
                while event::poll(Duration::ZERO)? {
                    self.page.dispatch(UiEvent::Terminal(event::read()?));
                }
                dirty = true;
            }
        }

        let outcome = self.page.outcome();
        self.page.unmount();
        Ok(outcome)
    }
}

impl<P> Drop for TuiRuntime<P> {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
