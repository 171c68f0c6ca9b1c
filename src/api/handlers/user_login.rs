//! Login form and submission.
//!
//! Unknown emails and wrong passwords produce the same message, and both run a
//! full Argon2 verification so response timing does not reveal which one it was.

use axum::{
    Form,
    extract::Extension,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};

use super::auth::{
    AuthState, SessionIdentity, password::verify_in_background, session::session_cookie, utils,
};
use crate::api::{
    store::UserStore,
    views::{Page, Views},
};

const BAD_CREDENTIALS: &str = "Incorrect email or password.";
const LOGIN_FAILED: &str = "Login failed.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn login_form(views: Extension<Arc<Views>>) -> Response {
    views.form(Page::Login, "")
}

pub async fn login(
    views: Extension<Arc<Views>>,
    store: Extension<Arc<dyn UserStore>>,
    auth_state: Extension<Arc<AuthState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let email_normalized = utils::normalize_email(&form.email);

    if let Err(err) = utils::validate_login(&email_normalized, &form.password) {
        return views.form(Page::Login, &err.to_string());
    }

    let user = match store.find_user_by_email(&email_normalized).await {
        Ok(user) => user,
        Err(err) => {
            error!("Failed to look up user during login: {err}");
            return views.form(Page::Login, LOGIN_FAILED);
        }
    };

    let stored_hash = user
        .as_ref()
        .map(|user| user.password_hash().expose_secret().to_owned());
    if !verify_in_background(form.password, stored_hash).await {
        debug!("Rejected login attempt");
        return views.form(Page::Login, BAD_CREDENTIALS);
    }

    // verify_in_background only succeeds against a stored hash.
    let Some(user) = user else {
        return views.form(Page::Login, BAD_CREDENTIALS);
    };

    let token = match auth_state
        .keys()
        .issue(&SessionIdentity::from(&user), auth_state.config().session_ttl())
    {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue session token: {err}");
            return views.form(Page::Login, LOGIN_FAILED);
        }
    };

    let cookie = match session_cookie(auth_state.config(), &token) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return views.form(Page::Login, LOGIN_FAILED);
        }
    };

    ([(SET_COOKIE, cookie)], Redirect::to("/secret")).into_response()
}
