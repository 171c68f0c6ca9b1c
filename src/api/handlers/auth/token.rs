//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs signed with the process-wide session secret. They
//! carry the user's identity and an expiry; nothing is stored server-side.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
    get_current_timestamp,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::AuthError;
use crate::api::store::User;

/// Identity embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Verified token payload, attached to requests admitted by the session gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Issued at, seconds since the Unix epoch.
    pub iat: u64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

/// Signing and verification keys derived from the session secret.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a token for `identity` that expires `ttl` from now.
    ///
    /// # Errors
    /// Returns [`AuthError::Signing`] if the claims cannot be encoded.
    pub fn issue(&self, identity: &SessionIdentity, ttl: Duration) -> Result<String, AuthError> {
        self.issue_at(identity, get_current_timestamp(), ttl)
    }

    pub(crate) fn issue_at(
        &self,
        identity: &SessionIdentity,
        issued_at: u64,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let claims = SessionClaims {
            id: identity.id.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl.as_secs()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::Signing)
    }

    /// Check signature and expiry and return the embedded claims.
    ///
    /// # Errors
    /// [`AuthError::Missing`] for an empty token, [`AuthError::InvalidSignature`]
    /// when the signature does not match, [`AuthError::Expired`] when `exp` has
    /// passed, [`AuthError::Malformed`] for anything that does not decode.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::Missing);
        }

        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn keys(secret: &str) -> SessionKeys {
        SessionKeys::new(&SecretString::from(secret.to_string()))
    }

    fn ann() -> SessionIdentity {
        SessionIdentity {
            id: "0190b1c2-0000-7000-8000-000000000001".to_string(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        }
    }

    #[test]
    fn issued_token_verifies_with_claims() -> Result<(), AuthError> {
        let keys = keys("test-secret");
        let token = keys.issue(&ann(), DAY)?;
        let claims = keys.verify(&token)?;

        assert_eq!(claims.name, "Ann");
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.id, ann().id);
        assert_eq!(claims.exp - claims.iat, DAY.as_secs());
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> Result<(), AuthError> {
        let keys = keys("test-secret");
        let two_days_ago = get_current_timestamp() - 2 * DAY.as_secs();
        let token = keys.issue_at(&ann(), two_days_ago, DAY)?;

        assert_eq!(keys.verify(&token), Err(AuthError::Expired));
        Ok(())
    }

    #[test]
    fn token_from_other_secret_is_rejected() -> Result<(), AuthError> {
        let token = keys("other-secret").issue(&ann(), DAY)?;

        assert_eq!(
            keys("test-secret").verify(&token),
            Err(AuthError::InvalidSignature)
        );
        Ok(())
    }

    #[test]
    fn tampered_payload_is_rejected() -> Result<(), AuthError> {
        let keys = keys("test-secret");
        let token = keys.issue(&ann(), DAY)?;
        let other = keys.issue(
            &SessionIdentity {
                name: "Mallory".to_string(),
                ..ann()
            },
            DAY,
        )?;

        // Splice the other payload under the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(keys.verify(&forged), Err(AuthError::InvalidSignature));
        Ok(())
    }

    #[test]
    fn garbage_and_empty_tokens() {
        let keys = keys("test-secret");

        assert_eq!(keys.verify(""), Err(AuthError::Missing));
        assert_eq!(keys.verify("not-a-token"), Err(AuthError::Malformed));
    }
}
