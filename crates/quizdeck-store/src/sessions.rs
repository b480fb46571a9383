//! In-memory login sessions.
//!
//! Tokens are UUIDv4 strings handed out as cookies. Sessions live only in
//! process memory; a restart logs everyone out.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::users::{Role, User};

/// A logged-in user's session data.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Token → session map behind a mutex.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for an authenticated user and return its token.
    pub fn create(&self, user: &User) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            role: user.role,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().insert(token.clone(), session);
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.inner.lock().unwrap().get(token).cloned()
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.inner.lock().unwrap().remove(token)
    }

    /// Update the display name held by a live session, after a profile edit.
    pub fn update_name(&self, token: &str, name: &str) {
        if let Some(session) = self.inner.lock().unwrap().get_mut(token) {
            session.user_name = name.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: "alice".into(),
            password: "pw".into(),
            name: "Alice".into(),
            role: Role::Admin,
            expiry: None,
        }
    }

    #[test]
    fn create_then_get_then_remove() {
        let store = SessionStore::new();
        let token = store.create(&alice());

        let session = store.get(&token).unwrap();
        assert_eq!(session.user_id, "alice");
        assert_eq!(session.role, Role::Admin);

        store.remove(&token);
        assert!(store.get(&token).is_none());
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let store = SessionStore::new();
        let a = store.create(&alice());
        let b = store.create(&alice());
        assert_ne!(a, b);
        assert!(store.get(&a).is_some());
        assert!(store.get(&b).is_some());
    }

    #[test]
    fn name_updates_apply_to_the_live_session() {
        let store = SessionStore::new();
        let token = store.create(&alice());

        store.update_name(&token, "Alice Renamed");
        assert_eq!(store.get(&token).unwrap().user_name, "Alice Renamed");

        // Unknown tokens are a no-op.
        store.update_name("not-a-token", "x");
    }

    #[test]
    fn unknown_token_is_none() {
        let store = SessionStore::new();
        assert!(store.get("not-a-token").is_none());
        assert!(store.remove("not-a-token").is_none());
    }
}
