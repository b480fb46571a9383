//! Raw-JSON preview and file upload.

use axum::extract::{Multipart, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use quizdeck_core::loader::load_questions_from_file;

use crate::auth::{require_admin, require_session};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub path: String,
}

/// The parsed document for a file, as JSON. Used by the menu's preview
/// links and handy for poking at a bank with curl.
pub async fn preview(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PreviewQuery>,
) -> Response {
    if let Err(resp) = require_session(&state, &headers) {
        return resp;
    }

    let Some(path) = state.roots.resolve(&query.path) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "file not found or not allowed"})),
        )
            .into_response();
    };

    match load_questions_from_file(&path) {
        Ok((_, raw)) => Json(raw).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "failed to parse JSON", "detail": err.to_string()})),
        )
            .into_response(),
    }
}

/// Accept a multipart upload of one `.json` file into the upload dir.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let session = match require_admin(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let Some(filename) = field.file_name().map(sanitize_filename) else {
            continue;
        };
        if !filename.to_ascii_lowercase().ends_with(".json") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "only .json files are accepted"})),
            )
                .into_response();
        }
        let data = match field.bytes().await {
            Ok(data) => data,
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": format!("upload failed: {err}")})),
                )
                    .into_response()
            }
        };

        // Reject files the loader could never serve.
        if serde_json::from_slice::<serde_json::Value>(&data).is_err() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "uploaded file is not valid JSON"})),
            )
                .into_response();
        }

        let dir = state.config.upload_dir();
        if let Err(err) = std::fs::create_dir_all(dir) {
            return crate::routes::internal_error(err);
        }
        let dest = dir.join(&filename);
        if let Err(err) = std::fs::write(&dest, &data) {
            return crate::routes::internal_error(err);
        }

        tracing::info!(user_id = %session.user_id, file = %filename, "quiz file uploaded");
        return Redirect::to("/menu").into_response();
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "no file field in upload"})),
    )
        .into_response()
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    std::path::Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.json")
        .to_string()
}
