//! HTTP exposure for the request pipeline
//!
//! The axum layer is deliberately thin: a fallback service reads the raw
//! body and hands `(method, path, bytes)` to the core route table, which
//! stays synchronous and transport-agnostic. All suspension lives here.

use crate::config::ServiceConfig;
use crate::core::response::ApiResponse;
use crate::dispatch::RouteTable;
use crate::handlers::build_routes;
use axum::{
    Json, Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Largest request body the host will buffer
const BODY_LIMIT: usize = 1024 * 1024;

/// Build the axum router around an assembled route table
pub fn build_router(table: Arc<RouteTable>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(dispatch_request)
        .with_state(table)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Assemble the table from configuration and serve until shutdown
pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let table = Arc::new(build_routes(&config));
    let app = build_router(table);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(address = %config.bind_addr, "Listening for connections");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "billing-api"
    }))
}

/// Feed one inbound request through the core dispatcher
async fn dispatch_request(State(table): State<Arc<RouteTable>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Request body could not be read." })),
            )
                .into_response();
        }
    };

    let ApiResponse {
        status,
        body,
        allow,
    } = table.dispatch(&parts.method, parts.uri.path(), &bytes);
    tracing::info!(
        method = %parts.method,
        path = %parts.uri.path(),
        status = %status,
        "request handled"
    );

    let mut response = (status, Json(body)).into_response();
    if let Some(allow) = allow {
        if let Ok(value) = HeaderValue::from_str(&allow) {
            response.headers_mut().insert(header::ALLOW, value);
        }
    }
    response
}
