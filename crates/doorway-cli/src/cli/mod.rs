//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use doorway_core::Locale;
use doorway_core::config;

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "doorway")]
#[command(version)]
#[command(about = "Sign in to your account from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// UI language (en, zh-TW); overrides the config file
    #[arg(long, global = true, env = "DOORWAY_LOCALE")]
    locale: Option<Locale>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the login screen (default)
    Login {
        /// Log in without the screen, using this email
        #[arg(long, requires = "password_stdin")]
        email: Option<String>,

        /// Read the password from the first line of stdin
        #[arg(long = "password-stdin", requires = "email")]
        password_stdin: bool,
    },
    /// Remove the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

/// # Errors
/// Returns an error if the selected command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e:#}");
            None
        }
    };

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let command = cli.command.unwrap_or(Commands::Login {
        email: None,
        password_stdin: false,
    });

    match command {
        Commands::Login {
            email,
            password_stdin,
        } => match email {
            Some(email) if password_stdin => commands::login::headless(&config, &email).await,
            _ => commands::login::interactive(&config),
        },
        Commands::Logout => commands::logout::run(&config),
        Commands::Status => commands::status::run(),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
