//! The session-gated page.

use axum::{extract::Extension, response::Response};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{
    handlers::auth::SessionClaims,
    views::{Page, Views},
};

#[derive(Serialize)]
struct SecretUser<'a> {
    name: &'a str,
    email: &'a str,
}

/// Render the secret page for the user carried by the session token.
///
/// Only reachable through the session gate, which inserts the claims.
pub async fn secret(views: Extension<Arc<Views>>, claims: Extension<SessionClaims>) -> Response {
    let user = SecretUser {
        name: &claims.name,
        email: &claims.email,
    };
    views.with_value(Page::Secret, "user", &user)
}
