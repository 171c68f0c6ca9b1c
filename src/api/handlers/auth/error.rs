use thiserror::Error;

/// Reasons a session token is not accepted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing session token")]
    Missing,
    #[error("invalid session token signature")]
    InvalidSignature,
    #[error("session token expired")]
    Expired,
    #[error("malformed session token")]
    Malformed,
    #[error("failed to sign session token")]
    Signing,
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Form input rejected before touching the store. `Display` is the message shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error(
        "Password must include lowercase, uppercase, a number, and be at least 6 characters."
    )]
    WeakPassword,
    #[error("Password is required.")]
    PasswordRequired,
}
