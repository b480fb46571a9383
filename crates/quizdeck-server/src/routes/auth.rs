//! Login, logout, and the root redirect.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;

use quizdeck_store::history::LoginRecord;

use crate::auth::{
    clear_session_cookie, client_ip, session_cookie, session_from_headers, user_agent,
};
use crate::routes::internal_error;
use crate::state::AppState;
use crate::views;

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if session_from_headers(&state, &headers).is_some() {
        Redirect::to("/menu")
    } else {
        Redirect::to("/login")
    }
}

pub async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub user_id: String,
    pub password: String,
}

pub async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = match state.users.authenticate(&form.user_id, &form.password) {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!(user_id = %form.user_id, "login rejected");
            return Html(views::login_page(Some("Invalid user ID or password"))).into_response();
        }
        Err(err) => return internal_error(err),
    };

    let token = state.sessions.create(&user);
    state
        .history
        .record_login(
            &user.id,
            LoginRecord {
                timestamp: Utc::now(),
                ip: client_ip(&headers),
                user_agent: user_agent(&headers),
                is_current: true,
            },
        )
        .await;
    tracing::info!(user_id = %user.id, "login succeeded");

    let cookie = session_cookie(&state.config.cookie_name, &token);
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to("/menu"),
    )
        .into_response()
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = crate::auth::cookie_value(&headers, &state.config.cookie_name) {
        state.sessions.remove(token);
    }
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie(&state.config.cookie_name))]),
        Redirect::to("/login"),
    )
        .into_response()
}
