//! The quiz menu.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use quizdeck_core::catalog::{scan_data_dir, sort_files, SortOrder};

use crate::auth::require_session;
use crate::routes::internal_error;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub sort: Option<String>,
}

pub async fn menu(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MenuQuery>,
) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    // Unknown sort values fall back to the default order.
    let sort: SortOrder = query
        .sort
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();

    let files = match scan_data_dir(&state.config.data_dir) {
        Ok(files) => sort_files(files, sort),
        Err(err) => return internal_error(err),
    };
    let recent = state.history.recent(&session.user_id).await;

    Html(views::menu_page(&session, &files, &recent, sort)).into_response()
}
