//! Admin user management.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use quizdeck_store::users::{Role, User, UserEdit};
use quizdeck_store::StoreError;

use crate::auth::{cookie_value, require_admin, require_session};
use crate::routes::internal_error;
use crate::state::AppState;
use crate::views;

pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match require_admin(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.users.list() {
        Ok(users) => Html(views::users_page(&session, &users, None)).into_response(),
        Err(err) => internal_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct AddUserForm {
    pub user_id: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub expiry: String,
}

pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddUserForm>,
) -> Response {
    let session = match require_admin(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let role: Role = form.role.parse().unwrap_or_default();
    let user = User {
        id: form.user_id,
        password: form.password,
        name: form.name,
        role,
        expiry: (!form.expiry.is_empty()).then_some(form.expiry),
    };

    match state.users.add(user) {
        Ok(()) => Redirect::to("/users").into_response(),
        Err(err @ StoreError::DuplicateUser(_)) => {
            let users = state.users.list().unwrap_or_default();
            Html(views::users_page(&session, &users, Some(&err.to_string()))).into_response()
        }
        Err(err) => internal_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveUserForm {
    pub user_id: String,
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RemoveUserForm>,
) -> Response {
    let session = match require_admin(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    // Admins cannot remove their own account while logged in with it.
    if form.user_id == session.user_id {
        let users = state.users.list().unwrap_or_default();
        return Html(views::users_page(
            &session,
            &users,
            Some("You cannot remove the account you are logged in with"),
        ))
        .into_response();
    }

    match state.users.remove(&form.user_id) {
        Ok(()) | Err(StoreError::UnknownUser(_)) => Redirect::to("/users").into_response(),
        Err(err) => internal_error(err),
    }
}

pub async fn profile_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.users.get(&session.user_id) {
        Ok(Some(user)) => Html(views::profile_page(&session, &user, None, false)).into_response(),
        // The account was removed out from under the session.
        Ok(None) => Redirect::to("/logout").into_response(),
        Err(err) => internal_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Self-service edit of the signed-in account: name and password only.
pub async fn profile_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ProfileForm>,
) -> Response {
    let mut session = match require_session(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    if form.name.trim().is_empty() {
        return match state.users.get(&session.user_id) {
            Ok(Some(user)) => (
                StatusCode::BAD_REQUEST,
                Html(views::profile_page(
                    &session,
                    &user,
                    Some("Full name is required"),
                    false,
                )),
            )
                .into_response(),
            Ok(None) => Redirect::to("/logout").into_response(),
            Err(err) => internal_error(err),
        };
    }

    let edit = UserEdit {
        name: Some(form.name.clone()),
        password: Some(form.password),
        ..Default::default()
    };
    if let Err(err) = state.users.edit(&session.user_id, edit) {
        return internal_error(err);
    }

    // The live session carries the display name; keep it in step.
    if let Some(token) = cookie_value(&headers, &state.config.cookie_name) {
        state.sessions.update_name(token, &form.name);
    }
    session.user_name = form.name;
    tracing::info!(user_id = %session.user_id, "profile updated");

    match state.users.get(&session.user_id) {
        Ok(Some(user)) => Html(views::profile_page(&session, &user, None, true)).into_response(),
        Ok(None) => Redirect::to("/logout").into_response(),
        Err(err) => internal_error(err),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response {
    let session = match require_admin(&state, &headers) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match state.users.get(&user_id) {
        Ok(Some(user)) => Html(views::user_edit_page(&session, &user, None)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Html(views::layout(
                "Not found",
                "<div class=\"card\"><h1>User not found</h1><p><a href=\"/users\">Back</a></p></div>",
            )),
        )
            .into_response(),
        Err(err) => internal_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct EditUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub password: String,
}

pub async fn edit_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Form(form): Form<EditUserForm>,
) -> Response {
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }

    let edit = UserEdit {
        name: (!form.name.is_empty()).then_some(form.name),
        role: form.role.parse().ok(),
        // An empty expiry field clears the expiry.
        expiry: Some(form.expiry),
        password: Some(form.password),
    };

    match state.users.edit(&user_id, edit) {
        Ok(()) => Redirect::to("/users").into_response(),
        Err(StoreError::UnknownUser(_)) => {
            (StatusCode::NOT_FOUND, Html(views::layout("Not found", "<div class=\"card\"><h1>User not found</h1></div>"))).into_response()
        }
        Err(err) => internal_error(err),
    }
}
