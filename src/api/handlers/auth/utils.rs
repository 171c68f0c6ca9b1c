//! Input checks shared by the register and login handlers.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use super::error::ValidationError;

const MIN_PASSWORD_CHARS: usize = 6;

static LOWERCASE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[a-z]").ok());
static UPPERCASE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[A-Z]").ok());
static DIGIT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[0-9]").ok());
// Dotted domain, no `[...]` address literal.
static DOTTED_EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s\[\]]+\.[^@\s\[\]]+$").ok());

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Normalize an email for lookup/uniqueness checks.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Email syntax check on already-normalized input.
///
/// The domain needs a top-level label containing a letter, so `localhost`,
/// bare IPs and `[...]` literals are rejected.
pub(crate) fn valid_email(email_normalized: &str) -> bool {
    let dotted = DOTTED_EMAIL
        .as_ref()
        .is_some_and(|regex| regex.is_match(email_normalized));
    let tld_has_letter = email_normalized
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.chars().any(|c| c.is_ascii_alphabetic()));

    dotted && tld_has_letter && email_normalized.validate_email()
}

/// At least six characters with one lowercase letter, one uppercase letter and one digit.
/// Line terminators are not allowed anywhere.
pub(crate) fn valid_password(password: &str) -> bool {
    if password.contains(LINE_TERMINATORS) {
        return false;
    }

    let matches = |class: &Lazy<Option<Regex>>| {
        class
            .as_ref()
            .is_some_and(|regex| regex.is_match(password))
    };

    password.chars().count() >= MIN_PASSWORD_CHARS
        && matches(&LOWERCASE)
        && matches(&UPPERCASE)
        && matches(&DIGIT)
}

/// Check a registration form. Rules run in order and the first failure wins.
pub(crate) fn validate_registration(
    name: &str,
    email_normalized: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !valid_email(email_normalized) {
        return Err(ValidationError::InvalidEmail);
    }
    if !valid_password(password) {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

/// Check a login form. Only presence is required of the password.
pub(crate) fn validate_login(
    email_normalized: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if !valid_email(email_normalized) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}
