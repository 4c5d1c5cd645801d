use axum::body::{Body, to_bytes};
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::metrics::{ENDPOINT_HITS, ENDPOINT_MISSES, ENDPOINTS_CREATED, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::RequestMetadata;
use crate::state::AppState;

// POST /api/{key}
// whole body is read before anything is stored, a failed read stores nothing
pub async fn create_endpoint(
    State(state): State<AppState>,
    Path(key): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Body,
) -> Result<Response> {
    REQUEST_TOTAL.inc();
    let _timer = REQUEST_LATENCY.start_timer();

    let payload = to_bytes(body, state.body_limit)
        .await
        .map_err(|e| Error::TransportRead(e.to_string()))?;

    state.registry.create(&key, &payload, addr.ip())?;
    ENDPOINTS_CREATED.inc();
    info!(key = %key, bytes = payload.len(), "endpoint created");

    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response())
}

// GET /api/{key}
pub async fn fetch_endpoint(
    State(state): State<AppState>,
    Path(key): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response> {
    REQUEST_TOTAL.inc();
    let _timer = REQUEST_LATENCY.start_timer();

    let endpoint = state.registry.fetch(&key).inspect_err(|e| {
        if matches!(e, Error::NotFound(_)) {
            ENDPOINT_MISSES.inc();
            debug!(key = %key, "no endpoint for key");
        }
    })?;

    // only successful lookups are logged
    state
        .request_log
        .record(&key, addr.ip(), &RequestMetadata::from_headers(&headers))?;
    ENDPOINT_HITS.inc();

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        endpoint.response,
    )
        .into_response())
}
