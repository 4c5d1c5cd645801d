use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::{Error, Result};
use crate::metrics::{LOG_QUERIES, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{LogEntryView, LogsQuery, RequestLogEntry};
use crate::state::AppState;

fn query_page(state: &AppState, key: &str, params: &LogsQuery) -> Result<Vec<RequestLogEntry>> {
    REQUEST_TOTAL.inc();
    LOG_QUERIES.inc();
    state.request_log.query(key, params.offset, params.filter())
}

// GET /api/{key}/logs?offset=N&sha=F
// unknown key and known key without logs both answer 404
pub async fn list_logs(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<LogsQuery>,
) -> Result<Json<Vec<LogEntryView>>> {
    let _timer = REQUEST_LATENCY.start_timer();

    let entries = query_page(&state, &key, &params)?;
    if entries.is_empty() {
        return Err(Error::EmptyResult(key));
    }

    let views = entries
        .into_iter()
        .map(LogEntryView::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Json(views))
}

// GET /api/{key}/logs.txt?offset=N&sha=F
// one "created_at\trequest_sha" line per entry, 404 with empty body when there are none
pub async fn list_logs_text(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<LogsQuery>,
) -> Result<Response> {
    let _timer = REQUEST_LATENCY.start_timer();

    let entries = query_page(&state, &key, &params)?;
    if entries.is_empty() {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    let body = entries
        .iter()
        .map(|e| format!("{}\t{}", e.created_at, e.request_sha))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(body.into_response())
}
