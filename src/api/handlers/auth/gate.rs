//! Session gate for protected routes.
//!
//! Flow Overview: read the `token` cookie, verify it, and either attach the
//! [`SessionClaims`] to the request or redirect to `/login`. A token that is
//! present but fails verification is also cleared from the browser.

use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

use super::{
    error::AuthError,
    session::{extract_session_token, redirect_to_login_clearing_cookie},
    state::AuthState,
    token::SessionClaims,
};

/// Outcome of checking a request's session cookie.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum GateDecision {
    Admit(SessionClaims),
    /// No cookie at all: nothing to clear.
    RedirectToLogin,
    /// Bad cookie: clear it so the browser stops sending it.
    ClearAndRedirect(AuthError),
}

pub(crate) fn decide(auth_state: &AuthState, token: Option<&str>) -> GateDecision {
    let Some(token) = token else {
        return GateDecision::RedirectToLogin;
    };

    match auth_state.keys().verify(token) {
        Ok(claims) => GateDecision::Admit(claims),
        Err(AuthError::Missing) => GateDecision::RedirectToLogin,
        Err(err) => GateDecision::ClearAndRedirect(err),
    }
}

/// Middleware admitting only requests carrying a valid session token.
pub async fn require_session(
    Extension(auth_state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_session_token(request.headers());

    match decide(&auth_state, token.as_deref()) {
        GateDecision::Admit(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        GateDecision::RedirectToLogin => {
            debug!("No session cookie, redirecting to login");
            Redirect::to("/login").into_response()
        }
        GateDecision::ClearAndRedirect(err) => {
            debug!("Rejected session cookie: {err}");
            redirect_to_login_clearing_cookie(auth_state.config())
        }
    }
}
