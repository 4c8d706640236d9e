//! HTTP transport around `SummaryHandler`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{Settings, API_KEY_ENV};
use crate::server::error::SummarizeError;
use crate::server::handler::{IncomingRequest, OutgoingResponse, SummaryHandler};

#[derive(Clone)]
struct AppState {
    handler: Arc<SummaryHandler>,
    max_body_bytes: usize,
}

impl IntoResponse for OutgoingResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, self.headers, Json(body)).into_response(),
            None => (self.status, self.headers).into_response(),
        }
    }
}

/// Router that sends every method on every path to the handler.
pub fn router(handler: Arc<SummaryHandler>, max_body_bytes: usize) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(AppState {
            handler,
            max_body_bytes,
        })
        .layer(TraceLayer::new_for_http())
}

async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let body = if parts.method == Method::POST {
        match read_body(body, state.max_body_bytes).await {
            Ok(bytes) => bytes,
            Err(err) => return OutgoingResponse::from(err).into_response(),
        }
    } else {
        Bytes::new()
    };

    let request = IncomingRequest {
        method: parts.method,
        headers: parts.headers,
        body,
    };

    state.handler.handle(request).await.into_response()
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, SummarizeError> {
    let bytes = to_bytes(body, limit)
        .await
        .with_context(|| format!("Failed to read request body (limit {} bytes)", limit))?;
    Ok(bytes)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(settings: &Settings) -> Result<()> {
    let handler = Arc::new(SummaryHandler::from_settings(settings)?);
    if !handler.has_api_key() {
        warn!(
            "No API key configured (llm.api_key or {}); summary requests will fail",
            API_KEY_ENV
        );
    }

    let addr: SocketAddr = settings
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid server.bind_addr: {}", settings.server.bind_addr))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", listener.local_addr()?);

    let app = router(handler, settings.server.max_body_bytes);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
