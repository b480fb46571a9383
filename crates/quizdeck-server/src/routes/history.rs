//! Activity pages and the result-recording endpoint.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

use quizdeck_store::history::{QuizAttempt, RecentItem};

use crate::auth::require_session;
use crate::state::AppState;
use crate::views;

/// Record a finished quiz, posted by the player page.
pub async fn save_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(attempt): Json<QuizAttempt>,
) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let quiz_name = attempt.quiz_name.clone();
    state.history.record_attempt(&session.user_id, attempt).await;
    state
        .history
        .touch_recent(
            &session.user_id,
            RecentItem {
                name: quiz_name,
                kind: "quiz_result".to_string(),
                timestamp: chrono::Utc::now(),
            },
        )
        .await;

    Json(json!({"status": "success"})).into_response()
}

pub async fn history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let attempts = state.history.attempts(&session.user_id).await;
    Html(views::history_page(&session, &attempts)).into_response()
}

pub async fn recent(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let items = state.history.recent(&session.user_id).await;
    Html(views::recent_page(&session, &items)).into_response()
}

/// Login history for the signed-in user, as JSON.
pub async fn session_details(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let logins = state.history.logins(&session.user_id).await;
    Json(json!({"user_id": session.user_id, "sessions": logins})).into_response()
}
