//! Session cookie handling and the logout endpoint.

use axum::{
    extract::Extension,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, InvalidHeaderValue, SET_COOKIE},
    },
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::error;

use super::state::{AuthConfig, AuthState};

pub const SESSION_COOKIE_NAME: &str = "token";

/// Clear the session cookie and send the browser to the login page.
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> Response {
    redirect_to_login_clearing_cookie(auth_state.config())
}

/// Build an `HttpOnly` cookie carrying the session token.
pub(crate) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = config.session_ttl().as_secs();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Same attributes as [`session_cookie`], with an empty value that expires immediately.
pub(crate) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn redirect_to_login_clearing_cookie(config: &AuthConfig) -> Response {
    let mut headers = HeaderMap::new();
    match clear_session_cookie(config) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build session clear cookie: {err}"),
    }
    (headers, Redirect::to("/login")).into_response()
}

/// Read the session token from the `Cookie` header. Empty values count as absent.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let key = parts.next().map(str::trim);
            let val = parts.next().map(str::trim);
            if let (Some(SESSION_COOKIE_NAME), Some(val)) = (key, val) {
                if !val.is_empty() {
                    return Some(val.to_string());
                }
            }
        }
    }
    None
}
