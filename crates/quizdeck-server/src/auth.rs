//! Cookie-based session guards.
//!
//! The session token travels in an HttpOnly cookie. Guards are plain
//! functions over the request headers; handlers call them first and
//! early-return the error response.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};

use quizdeck_store::sessions::Session;

use crate::state::AppState;
use crate::views;

/// Pull the named cookie out of the request headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

/// The session attached to a request, if any.
pub fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = cookie_value(headers, &state.config.cookie_name)?;
    state.sessions.get(token)
}

/// Require a logged-in user; unauthenticated requests go to the login page.
pub fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    session_from_headers(state, headers).ok_or_else(|| Redirect::to("/login").into_response())
}

/// Require an admin; logged-in non-admins get a 403 page.
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    let session = require_session(state, headers)?;
    if session.role.is_admin() {
        Ok(session)
    } else {
        tracing::warn!(user_id = %session.user_id, "admin page refused");
        Err((StatusCode::FORBIDDEN, Html(views::forbidden_page(&session))).into_response())
    }
}

/// `Set-Cookie` value that installs a session token.
pub fn session_cookie(name: &str, token: &str) -> String {
    format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Best-effort client address for the login history.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
