//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_DSN, ARG_PORT, ARG_PUBLIC_DIR, auth};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    let public_dir = matches.get_one::<String>(ARG_PUBLIC_DIR).map(PathBuf::from);

    let auth_opts = auth::Options::parse(matches)?;

    if auth_opts.production && auth_opts.session_secret_is_default {
        anyhow::bail!(
            "--{} must be set to a non-default value when --{} is enabled",
            auth::ARG_SESSION_SECRET,
            auth::ARG_PRODUCTION
        );
    }

    Ok(Action::Server(Args {
        port,
        dsn,
        public_dir,
        session_secret: auth_opts.session_secret,
        session_secret_is_default: auth_opts.session_secret_is_default,
        session_ttl_seconds: auth_opts.session_ttl_seconds,
        production: auth_opts.production,
    }))
}
