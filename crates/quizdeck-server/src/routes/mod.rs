//! Route table and handlers.

pub mod auth;
pub mod files;
pub mod history;
pub mod menu;
pub mod quiz;
pub mod users;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_form).post(auth::login_submit))
        .route("/logout", get(auth::logout))
        .route("/menu", get(menu::menu))
        .route("/quiz/:name", get(quiz::player))
        .route("/all-questions/:name", get(quiz::all_questions))
        .route("/debug/:name", get(quiz::debug))
        .route("/preview", get(files::preview))
        .route("/upload", post(files::upload))
        .route("/results", post(history::save_result))
        .route("/history", get(history::history))
        .route("/recent", get(history::recent))
        .route("/api/session-details", get(history::session_details))
        .route("/profile", get(users::profile_form).post(users::profile_submit))
        .route("/users", get(users::list))
        .route("/users/add", post(users::add))
        .route("/users/remove", post(users::remove))
        .route("/users/:id/edit", get(users::edit_form).post(users::edit_submit))
}

/// 500 page for unexpected failures at a request boundary.
pub(crate) fn internal_error(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(crate::views::layout(
            "Error",
            "<div class=\"card\"><h1>Something went wrong</h1><p class=\"muted\">The error has been logged.</p></div>",
        )),
    )
        .into_response()
}
