//! Quiz pages: the player, the all-questions view, and the debug view.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use quizdeck_core::loader::load_questions_from_file;
use quizdeck_core::model::Question;
use quizdeck_core::validate::validate_questions;
use quizdeck_store::history::RecentItem;
use quizdeck_store::sessions::Session;

use crate::auth::require_session;
use crate::routes::internal_error;
use crate::state::AppState;
use crate::views;

/// Resolve and load a quiz file named in the URL. `Err` is a ready
/// response (404 for unknown or disallowed names, 500 for parse failures).
fn load_named(
    state: &AppState,
    name: &str,
) -> Result<(Vec<Question>, serde_json::Value), Response> {
    let Some(path) = state.roots.resolve(name) else {
        tracing::info!(name, "quiz file not found or not allowed");
        return Err((
            StatusCode::NOT_FOUND,
            Html(views::layout(
                "Not found",
                "<div class=\"card\"><h1>Quiz not found</h1><p><a href=\"/menu\">Back to menu</a></p></div>",
            )),
        )
            .into_response());
    };
    load_questions_from_file(&path).map_err(internal_error)
}

fn guard(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    require_session(state, headers)
}

pub async fn player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let session = match guard(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let (questions, _raw) = match load_named(&state, &name) {
        Ok(loaded) => loaded,
        Err(resp) => return resp,
    };

    state
        .history
        .touch_recent(
            &session.user_id,
            RecentItem {
                name: name.clone(),
                kind: "quiz".to_string(),
                timestamp: chrono::Utc::now(),
            },
        )
        .await;

    let is_mock = name.contains("Mock");
    Html(views::quiz_page(&session, &name, &questions, is_mock)).into_response()
}

pub async fn all_questions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let session = match guard(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let (questions, _raw) = match load_named(&state, &name) {
        Ok(loaded) => loaded,
        Err(resp) => return resp,
    };

    state
        .history
        .touch_recent(
            &session.user_id,
            RecentItem {
                name: name.clone(),
                kind: "all_questions".to_string(),
                timestamp: chrono::Utc::now(),
            },
        )
        .await;

    Html(views::all_questions_page(&session, &name, &questions)).into_response()
}

pub async fn debug(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let session = match guard(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let (questions, raw) = match load_named(&state, &name) {
        Ok(loaded) => loaded,
        Err(resp) => return resp,
    };
    let warnings = validate_questions(&questions);
    Html(views::debug_page(&session, &name, &questions, &warnings, &raw)).into_response()
}
