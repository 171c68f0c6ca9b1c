//! Argon2id password hashing.
//!
//! Stored values are PHC strings (`$argon2id$v=19$...`) carrying their own
//! salt and parameters, so verification needs nothing but the stored string.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::error::PasswordError;

// Verified against when the email is unknown so both login failures cost one Argon2 run.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("unknown-user-placeholder").ok());

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
/// Returns an error if Argon2 rejects the input or parameters.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a plaintext password against a stored PHC string.
///
/// Malformed stored values never match.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!("Stored password hash is malformed: {err}");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Compute the dummy hash now so no login request pays for it.
pub(crate) fn prepare_dummy_hash() {
    if Lazy::force(&DUMMY_HASH).is_none() {
        warn!("Failed to prepare dummy password hash; unknown-email logins will return faster");
    }
}

/// Hash on the blocking pool so request workers stay free.
pub(crate) async fn hash_in_background(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

/// Verify a login attempt on the blocking pool.
///
/// `stored` is `None` for unknown emails; a dummy hash is checked instead and
/// the result is always `false`.
pub(crate) async fn verify_in_background(password: String, stored: Option<String>) -> bool {
    let result = tokio::task::spawn_blocking(move || match stored {
        Some(stored) => verify_password(&password, &stored),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&password, dummy);
            }
            false
        }
    })
    .await;

    result.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() -> Result<(), PasswordError> {
        let hash = hash_password("Abcdef1")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Abcdef1", &hash));
        assert!(!verify_password("abcdef1", &hash));
        Ok(())
    }

    #[test]
    fn same_password_hashes_differently() -> Result<(), PasswordError> {
        let first = hash_password("Abcdef1")?;
        let second = hash_password("Abcdef1")?;

        assert_ne!(first, second);
        assert!(verify_password("Abcdef1", &first));
        assert!(verify_password("Abcdef1", &second));
        Ok(())
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!verify_password("Abcdef1", ""));
        assert!(!verify_password("Abcdef1", "plaintext"));
        assert!(!verify_password("Abcdef1", "$argon2id$broken"));
    }

    #[test]
    fn dummy_hash_is_ready_after_prepare() {
        prepare_dummy_hash();
        assert!(Lazy::get(&DUMMY_HASH).is_some_and(Option::is_some));
    }

    #[tokio::test]
    async fn background_helpers_match_sync_behaviour() -> Result<(), PasswordError> {
        let hash = hash_in_background("Abcdef1".to_string()).await?;

        assert!(verify_in_background("Abcdef1".to_string(), Some(hash.clone())).await);
        assert!(!verify_in_background("Wrong1a".to_string(), Some(hash)).await);
        assert!(!verify_in_background("Abcdef1".to_string(), None).await);
        Ok(())
    }
}
