//! Server-rendered pages.
//!
//! Templates are embedded at compile time and rendered with Tera, which
//! escapes every interpolated value in `.html` templates.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

const TPL_BASE: &str = include_str!("templates/base.html");
const TPL_HOME: &str = include_str!("templates/home.html");
const TPL_REGISTER: &str = include_str!("templates/register.html");
const TPL_LOGIN: &str = include_str!("templates/login.html");
const TPL_SECRET: &str = include_str!("templates/secret.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Register,
    Login,
    Secret,
}

impl Page {
    const fn template(self) -> &'static str {
        match self {
            Self::Home => "home.html",
            Self::Register => "register.html",
            Self::Login => "login.html",
            Self::Secret => "secret.html",
        }
    }
}

pub struct Views {
    tera: Tera,
}

impl Views {
    /// Compile the embedded templates.
    ///
    /// # Errors
    /// Returns an error if a template fails to parse.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        // base.html first: the pages extend it.
        tera.add_raw_templates(vec![
            ("base.html", TPL_BASE),
            ("home.html", TPL_HOME),
            ("register.html", TPL_REGISTER),
            ("login.html", TPL_LOGIN),
            ("secret.html", TPL_SECRET),
        ])?;
        Ok(Self { tera })
    }

    pub fn render(&self, page: Page, context: &Context) -> Response {
        match self.tera.render(page.template(), context) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                error!("Failed to render {}: {err}", page.template());
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }

    /// Render a form page with an error line (empty for none). Submitted input is not echoed.
    pub fn form(&self, page: Page, error: &str) -> Response {
        let mut context = Context::new();
        context.insert("error", error);
        self.render(page, &context)
    }

    pub fn with_value<T: Serialize>(&self, page: Page, key: &str, value: &T) -> Response {
        let mut context = Context::new();
        context.insert(key, value);
        self.render(page, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn form_renders_error_escaped() -> Result<(), tera::Error> {
        let views = Views::new()?;
        let body = body_text(views.form(Page::Login, "<b>nope</b>")).await;

        assert!(body.contains("&lt;b&gt;nope&lt;&#x2F;b&gt;"));
        assert!(!body.contains("<b>nope</b>"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_error_renders_no_error_line() -> Result<(), tera::Error> {
        let views = Views::new()?;
        let body = body_text(views.form(Page::Register, "")).await;

        assert!(body.contains("action=\"/register\""));
        assert!(!body.contains("class=\"error\""));
        Ok(())
    }

    #[tokio::test]
    async fn home_renders_without_context() -> Result<(), tera::Error> {
        let views = Views::new()?;
        let response = views.render(Page::Home, &Context::new());

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("href=\"/register\""));
        Ok(())
    }
}
