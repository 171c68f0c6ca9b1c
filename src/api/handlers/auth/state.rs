//! Auth configuration and shared state.

use std::time::Duration;

use super::token::SessionKeys;

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_ttl: Duration,
    secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
            secure_cookies: false,
        }
    }

    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Mark session cookies `Secure` (production deployments behind HTTPS).
    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub(crate) fn session_cookie_secure(&self) -> bool {
        self.secure_cookies
    }
}

/// Immutable after startup; shared by handlers and the session gate.
pub struct AuthState {
    config: AuthConfig,
    keys: SessionKeys,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, keys: SessionKeys) -> Self {
        Self { config, keys }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }
}
