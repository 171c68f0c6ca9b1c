//! Registration form and submission.
//!
//! Flow Overview:
//! 1) Normalize the email and validate the form; the first failing rule is shown.
//! 2) Look up the email. A hit short-circuits with "User already exists."
//! 3) Hash the password and insert. The store's uniqueness check is authoritative,
//!    so a concurrent registration that slips past step 2 still ends in a conflict.

use axum::{
    Form,
    extract::Extension,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use super::auth::{password::hash_in_background, utils};
use crate::api::{
    store::{NewUser, StoreError, UserStore},
    views::{Page, Views},
};

const USER_EXISTS: &str = "User already exists.";
const REGISTRATION_FAILED: &str = "Error during registration.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn register_form(views: Extension<Arc<Views>>) -> Response {
    views.form(Page::Register, "")
}

pub async fn register(
    views: Extension<Arc<Views>>,
    store: Extension<Arc<dyn UserStore>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let email_normalized = utils::normalize_email(&form.email);

    if let Err(err) = utils::validate_registration(&form.name, &email_normalized, &form.password) {
        return views.form(Page::Register, &err.to_string());
    }

    match store.find_user_by_email(&email_normalized).await {
        Ok(Some(_)) => return views.form(Page::Register, USER_EXISTS),
        Ok(None) => {}
        Err(err) => {
            error!("Failed to look up user during registration: {err}");
            return views.form(Page::Register, REGISTRATION_FAILED);
        }
    }

    let password_hash = match hash_in_background(form.password).await {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {err}");
            return views.form(Page::Register, REGISTRATION_FAILED);
        }
    };

    let new_user = NewUser {
        name: form.name.trim().to_string(),
        email: email_normalized,
        password_hash,
    };

    match store.create_user(new_user).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            Redirect::to("/login").into_response()
        }
        Err(StoreError::Conflict) => views.form(Page::Register, USER_EXISTS),
        Err(err) => {
            error!("Failed to create user: {err}");
            views.form(Page::Register, REGISTRATION_FAILED)
        }
    }
}
