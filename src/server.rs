// gymstats - GPL-3.0-or-later
// This file is part of gymstats.
//
// gymstats is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// gymstats is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with gymstats.  If not, see <https://www.gnu.org/licenses/>.

//! HTTP surface: the two regeneration endpoints, CORS and static serving of
//! the dashboard directory.
//!
//! Regenerations run on the blocking pool and are serialized behind a single
//! in-process lock, so two concurrent requests cannot race on the snapshot
//! file.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Error;
use crate::pipeline::{self, RegenerateSummary};
use crate::snapshot::SNAPSHOT_FILENAME;
use crate::timezone::LocalZone;

#[derive(Clone)]
pub struct AppState {
    data_dir: Arc<PathBuf>,
    zone: LocalZone,
    regen_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, zone: LocalZone) -> Self {
        Self {
            data_dir: Arc::new(data_dir),
            zone,
            regen_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Response body of both regeneration endpoints.
#[derive(Debug, Serialize)]
struct GenerateResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DateRangeRequest {
    from: String,
    to: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate-data", post(generate_data))
        .route("/generate-data-range", post(generate_data_range))
        .fallback(serve_static)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

/// POST /generate-data: regenerate the snapshot from the latest daily log.
async fn generate_data(State(state): State<AppState>) -> Response {
    let _guard = state.regen_lock.lock().await;
    let dir = Arc::clone(&state.data_dir);
    let zone = state.zone;

    let result =
        tokio::task::spawn_blocking(move || pipeline::regenerate_latest(&dir, &zone)).await;
    match result {
        Ok(Ok(summary)) => {
            log::info!(
                "regenerated {SNAPSHOT_FILENAME} from latest file ({} locations)",
                summary.locations
            );
            success_response("Data generated successfully", latest_output(&summary))
        }
        Ok(Err(err)) => pipeline_failure(&err),
        Err(err) => join_failure(&err),
    }
}

/// POST /generate-data-range: regenerate from all logs in an inclusive
/// `YYYY-MM-DD` date range.
async fn generate_data_range(State(state): State<AppState>, body: Bytes) -> Response {
    let request: DateRangeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid request body".to_string()),
    };

    let _guard = state.regen_lock.lock().await;
    let dir = Arc::clone(&state.data_dir);
    let zone = state.zone;
    let (from, to) = (request.from.clone(), request.to.clone());

    let result =
        tokio::task::spawn_blocking(move || pipeline::regenerate_range(&dir, &from, &to, &zone))
            .await;
    match result {
        Ok(Ok(summary)) => {
            log::info!(
                "regenerated {SNAPSHOT_FILENAME} from {} files, {} to {} ({} locations)",
                summary.files.len(),
                request.from,
                request.to,
                summary.locations
            );
            success_response(
                "Date range data generated successfully",
                range_output(&summary, &request.from, &request.to),
            )
        }
        Ok(Err(err)) => pipeline_failure(&err),
        Err(err) => join_failure(&err),
    }
}

fn latest_output(summary: &RegenerateSummary) -> String {
    let source = summary
        .files
        .first()
        .map(|f| f.display().to_string())
        .unwrap_or_default();
    format!(
        "Successfully generated {SNAPSHOT_FILENAME} from {source}\nFound {} locations with data",
        summary.locations
    )
}

fn range_output(summary: &RegenerateSummary, from: &str, to: &str) -> String {
    format!(
        "Successfully generated {SNAPSHOT_FILENAME} from {} files ({from} to {to})\nFound {} locations with data",
        summary.files.len(),
        summary.locations
    )
}

fn success_response(message: &str, output: String) -> Response {
    json_response(
        StatusCode::OK,
        &GenerateResponse {
            success: true,
            message: message.to_string(),
            output: Some(output),
            error: None,
        },
    )
}

fn pipeline_failure(err: &Error) -> Response {
    log::warn!("regeneration failed: {err}");
    failure(status_for(err), err.to_string())
}

fn join_failure(err: &tokio::task::JoinError) -> Response {
    log::error!("regeneration task failed: {err}");
    failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("regeneration task failed: {err}"),
    )
}

fn failure(status: StatusCode, error: String) -> Response {
    json_response(
        status,
        &GenerateResponse {
            success: false,
            message: String::new(),
            output: None,
            error: Some(error),
        },
    )
}

/// Invalid input is the client's fault, an empty selection is absence,
/// everything else is ours.
fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
        Error::NotFound { .. } | Error::EmptyRange { .. } => StatusCode::NOT_FOUND,
        Error::MissingColumns { .. }
        | Error::MalformedHeader { .. }
        | Error::Io(_)
        | Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_string(value) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("json encode error: {e}"),
        )
            .into_response(),
    }
}

/// CORS for the dashboard: wildcard origin, preflight answered everywhere.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// GET fallback: serve the dashboard page and its data from the data
/// directory.
async fn serve_static(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let Some(path) = resolve_static_path(&state.data_dir, uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&path))],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Map a request path to a file under `root`, rejecting anything that could
/// escape it.
fn resolve_static_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let relative = uri_path.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };
    let relative = Path::new(relative);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("csv") => "text/csv; charset=utf-8",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
