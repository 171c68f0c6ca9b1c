use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_SESSION_SECRET: &str = "session-secret";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_PRODUCTION: &str = "production";

/// Local development signing secret. Refused when `--production` is set.
pub const DEV_SESSION_SECRET: &str = "dev_secret_change_me";

#[derive(Debug)]
pub struct Options {
    pub session_secret: SecretString,
    pub session_secret_is_default: bool,
    pub session_ttl_seconds: u64,
    pub production: bool,
}

impl Options {
    /// # Errors
    /// Returns an error if a defaulted argument is unexpectedly missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let secret = matches
            .get_one::<String>(ARG_SESSION_SECRET)
            .cloned()
            .context("missing required argument: --session-secret")?;
        let session_ttl_seconds = matches
            .get_one::<u64>(ARG_SESSION_TTL_SECONDS)
            .copied()
            .context("missing required argument: --session-ttl-seconds")?;

        Ok(Self {
            session_secret_is_default: secret == DEV_SESSION_SECRET,
            session_secret: SecretString::from(secret),
            session_ttl_seconds,
            production: matches.get_flag(ARG_PRODUCTION),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_SECRET)
                .long(ARG_SESSION_SECRET)
                .help("Secret used to sign session tokens")
                .env("SECRETS_SESSION_SECRET")
                .hide_env_values(true)
                .default_value(DEV_SESSION_SECRET),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session token and cookie TTL in seconds")
                .env("SECRETS_SESSION_TTL_SECONDS")
                .default_value("86400")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_PRODUCTION)
                .long(ARG_PRODUCTION)
                .help("Production mode: Secure cookies and no development signing secret")
                .env("SECRETS_PRODUCTION")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn command() -> Command {
        with_args(Command::new("test"))
    }

    #[test]
    fn defaults_use_development_secret() -> Result<()> {
        temp_env::with_vars(
            [
                ("SECRETS_SESSION_SECRET", None::<&str>),
                ("SECRETS_SESSION_TTL_SECONDS", None::<&str>),
                ("SECRETS_PRODUCTION", None::<&str>),
            ],
            || {
                let matches = command().try_get_matches_from(vec!["test"])?;
                let options = Options::parse(&matches)?;
                assert!(options.session_secret_is_default);
                assert_eq!(options.session_secret.expose_secret(), DEV_SESSION_SECRET);
                assert_eq!(options.session_ttl_seconds, 86_400);
                assert!(!options.production);
                Ok(())
            },
        )
    }

    #[test]
    fn env_overrides() -> Result<()> {
        temp_env::with_vars(
            [
                ("SECRETS_SESSION_SECRET", Some("s3cr3t")),
                ("SECRETS_SESSION_TTL_SECONDS", Some("60")),
                ("SECRETS_PRODUCTION", Some("true")),
            ],
            || {
                let matches = command().try_get_matches_from(vec!["test"])?;
                let options = Options::parse(&matches)?;
                assert!(!options.session_secret_is_default);
                assert_eq!(options.session_secret.expose_secret(), "s3cr3t");
                assert_eq!(options.session_ttl_seconds, 60);
                assert!(options.production);
                Ok(())
            },
        )
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let result = command().try_get_matches_from(vec!["test", "--session-ttl-seconds", "0"]);
        assert!(result.is_err());
    }
}
