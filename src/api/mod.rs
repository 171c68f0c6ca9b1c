use crate::api::{
    handlers::{
        auth::{AuthState, logout, password, require_session},
        health, root, secret, user_login, user_register,
    },
    store::UserStore,
    views::Views,
};
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::get,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, services::ServeDir, set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug_span, info};
use ulid::Ulid;

pub mod handlers;
pub mod store;
pub mod views;

/// Build the application router.
///
/// `/secret` sits behind the session gate. When `public_dir` is set, any
/// path without a route is served from that directory.
///
/// # Errors
/// Returns an error if the page templates fail to compile.
pub fn router(
    store: Arc<dyn UserStore>,
    auth_state: Arc<AuthState>,
    public_dir: Option<&Path>,
) -> Result<Router> {
    let views = Arc::new(Views::new().context("Failed to compile page templates")?);
    password::prepare_dummy_hash();

    let mut router = Router::new()
        .route("/", get(root::root))
        .route(
            "/register",
            get(user_register::register_form).post(user_register::register),
        )
        .route(
            "/login",
            get(user_login::login_form).post(user_login::login),
        )
        .route(
            "/secret",
            get(secret::secret).route_layer(middleware::from_fn(require_session)),
        )
        .route("/logout", get(logout))
        .route("/health", get(health::health));

    if let Some(dir) = public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router.layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(Extension(auth_state))
            .layer(Extension(store))
            .layer(Extension(views)),
    ))
}

/// Serve the application on `[::]:port` until SIGINT or SIGTERM.
///
/// # Errors
/// Returns an error if the router cannot be built or the server fails to start.
pub async fn new(
    port: u16,
    store: Arc<dyn UserStore>,
    auth_state: Arc<AuthState>,
    public_dir: Option<PathBuf>,
) -> Result<()> {
    let app = router(store, auth_state, public_dir.as_deref())?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let method = request.method();
    let path = request.uri().path();
    // Headers are left out: the Cookie header carries the session token.
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", %method, path, request_id)
}
