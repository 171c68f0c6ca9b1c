//! Auth building blocks and the logout/gate wiring.
//!
//! - **Passwords:** Argon2id PHC strings, hashed and verified on the blocking pool.
//! - **Sessions:** HS256 tokens in an `HttpOnly`, `SameSite=Lax` cookie named `token`.
//!   The signing secret is loaded once at startup and shared through [`AuthState`].
//! - **Gate:** [`require_session`] admits requests with a valid token and redirects
//!   everything else to `/login`, clearing tokens that fail verification.

mod error;
mod gate;
pub(crate) mod password;
pub(crate) mod session;
mod state;
mod token;
pub(crate) mod utils;

pub use error::{AuthError, PasswordError, ValidationError};
pub use gate::require_session;
pub use session::{SESSION_COOKIE_NAME, logout};
pub use state::{AuthConfig, AuthState};
pub use token::{SessionClaims, SessionIdentity, SessionKeys};
