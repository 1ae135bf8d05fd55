//! Login command handlers.

use std::io::{BufRead, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use doorway_core::HistoryNavigator;
use doorway_core::auth::{HttpAuthProvider, SessionStore};
use doorway_core::config::Config;
use doorway_tui::{HeadlessOutcome, LoginOutcome, LoginPage, PageOptions, TuiRuntime, run_headless};

fn provider(config: &Config) -> Result<Arc<HttpAuthProvider>> {
    let store = SessionStore::at_default_path();
    let provider = HttpAuthProvider::from_config(config, store).context("set up auth provider")?;
    Ok(Arc::new(provider))
}

/// Full-screen login form.
///
/// # Errors
/// Returns an error if stdin or stdout is not a terminal, or the
/// screen fails.
pub fn interactive(config: &Config) -> Result<()> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        anyhow::bail!(
            "The login screen needs a terminal; use `doorway login --email <EMAIL> --password-stdin` instead"
        );
    }

    let provider = provider(config)?;
    let outcome = {
        let mut runtime = TuiRuntime::new(provider, PageOptions::from(config))?;
        runtime.run().context("login screen failed")?
        // Terminal is restored when the runtime drops here.
    };

    match outcome {
        LoginOutcome::Navigated(path) => println!("Logged in. Continuing to {path}"),
        LoginOutcome::Quit => println!("Login cancelled."),
    }
    Ok(())
}

/// Same workflow as the screen, driven from arguments and stdin.
///
/// # Errors
/// Returns an error if the input is invalid or the server rejects the
/// login.
pub async fn headless(config: &Config, email: &str) -> Result<()> {
    let password = tokio::task::spawn_blocking(read_password_line)
        .await
        .context("password reader task failed")??;

    let navigator = HistoryNavigator::new(config.login_path.clone());
    let mut page = LoginPage::new(provider(config)?, navigator, PageOptions::from(config));
    let outcome = run_headless(&mut page, email, &password).await;

    if let Some(notice) = &page.state().form.expired_notice {
        eprintln!("{notice}");
    }

    match outcome {
        HeadlessOutcome::Navigated(path) => {
            println!("{path}");
            Ok(())
        }
        HeadlessOutcome::Invalid(messages) => anyhow::bail!("{}", messages.join("\n")),
        HeadlessOutcome::Failed(message) => anyhow::bail!("{message}"),
    }
}

fn read_password_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
