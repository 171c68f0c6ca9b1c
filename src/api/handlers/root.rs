use axum::{extract::Extension, response::Response};
use std::sync::Arc;
use tera::Context;

use crate::api::views::{Page, Views};

pub async fn root(views: Extension<Arc<Views>>) -> Response {
    views.render(Page::Home, &Context::new())
}
