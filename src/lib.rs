//! # Secrets (registration, login and session-gated pages)
//!
//! `secrets` is a small server-rendered web application. Visitors register
//! with a name, email and password, log in, and receive a signed session
//! cookie that unlocks the `/secret` page.
//!
//! ## Authentication
//!
//! - **Passwords** are hashed with Argon2id; the plaintext never reaches the store.
//! - **Sessions** are stateless HS256 tokens carrying `{id, name, email}` and an
//!   expiry. The server keeps no session table; logout clears the cookie.
//! - **Login errors** are generic: an unknown email and a wrong password render
//!   the same message so accounts cannot be enumerated.
//!
//! ## Store
//!
//! Users live behind the [`api::store::UserStore`] trait. The PostgreSQL
//! implementation relies on a unique index on `email`; its rejection is the
//! single source of truth for duplicate registrations.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
