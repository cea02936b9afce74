//! HTTP surface of the edge server: the dashboard bundle behind the
//! session gate, plus `/health`.

pub mod handlers;
pub mod middleware;
pub mod revalidate;

use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::{path::Path, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer,
    services::{ServeDir, ServeFile},
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

/// Shared, immutable state for the gate.
#[derive(Debug, Default)]
pub struct EdgeState {
    /// Set when `--edge-revalidate` is on.
    pub revalidator: Option<revalidate::Revalidator>,
}

/// Build the edge router.
///
/// Unknown paths fall back to `index.html` so client-side routes resolve;
/// every request, fallback included, passes through the session gate.
pub fn router(state: Arc<EdgeState>, assets_dir: &Path) -> Router {
    let spa = ServeDir::new(assets_dir).fallback(ServeFile::new(assets_dir.join("index.html")));

    Router::new()
        .route(
            "/health",
            get(handlers::health::health).head(handlers::health::health),
        )
        .fallback_service(spa)
        .layer(from_fn_with_state(state, middleware::session_gate))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn serve(port: u16, assets_dir: &Path, state: Arc<EdgeState>) -> Result<()> {
    let app = router(state, assets_dir);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Gracefully shutdown"),
        Err(err) => error!("Failed to listen for Ctrl+C: {err}"),
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
