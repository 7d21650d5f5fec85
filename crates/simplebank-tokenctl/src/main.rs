//! simplebank token CLI
//!
//! Issues and verifies access tokens with the same maker the API server is
//! configured with. The symmetric key is read from config or
//! `SIMPLEBANK_TOKEN_SYMMETRIC_KEY` and never printed.

mod commands;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use simplebank_core::config::load_config;
use simplebank_core::tracing_init::{default_filter, init_tracing};
use simplebank_token::TokenScheme;

const LOG_TARGETS: &[&str] = &[
    "simplebank_tokenctl",
    "simplebank_token",
    "simplebank_core",
];

#[derive(Parser, Debug)]
#[command(name = "simplebank-tokenctl")]
#[command(version, about = "Issue and verify simplebank access tokens")]
struct Cli {
    /// Path to a JSON config file.
    #[arg(long, env = "SIMPLEBANK_CONFIG")]
    config: Option<PathBuf>,

    /// Token scheme: jwt or paseto (overrides config).
    #[arg(long)]
    scheme: Option<TokenScheme>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue an access token for a user.
    Issue {
        /// Username the token identifies.
        #[arg(short, long)]
        username: String,

        /// Lifetime in seconds (defaults to the configured access token duration).
        #[arg(short, long, allow_negative_numbers = true)]
        duration: Option<i64>,
    },
    /// Verify a token and print its payload.
    Verify {
        /// The token string.
        token: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(scheme) = cli.scheme {
        config.token.scheme = scheme;
    }
    if cli.log_json {
        config.log.json = true;
    }

    init_tracing(
        &default_filter(LOG_TARGETS, &config.log.level),
        config.log.json,
    );
    info!(
        version = env!("CARGO_PKG_VERSION"),
        scheme = %config.token.scheme,
        "Starting simplebank-tokenctl"
    );

    config.validate()?;
    let maker = config.token.build_maker()?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Issue { username, duration } => {
            let duration = match duration {
                Some(secs) => chrono::Duration::try_seconds(secs)
                    .ok_or_else(|| anyhow::anyhow!("duration out of range: {secs}s"))?,
                None => config.token.access_token_duration()?,
            };
            commands::issue(maker.as_ref(), &username, duration, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { token } => commands::verify(maker.as_ref(), &token, &mut out),
    }
}
