//! JSON-backed user accounts.
//!
//! The backing file is `{"users": [...]}`. Every operation reloads from
//! disk and writes back, so external edits to the file take effect on the
//! next request. Passwords are stored and compared in plain text, matching
//! the deployment this replaces.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

impl FromStr for Role {
    type Err = ();

    /// Anything that is not exactly `admin` is a regular user.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "admin" { Role::Admin } else { Role::User })
    }
}

/// One account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    /// ISO date or datetime after which logins are refused. Stored as the
    /// raw string so hand-edited files keep whatever format they used.
    #[serde(default)]
    pub expiry: Option<String>,
}

impl User {
    /// Whether the account is currently usable.
    ///
    /// No expiry means valid forever. An expiry string that parses as
    /// neither a datetime nor a date also counts as valid, so a malformed
    /// file never locks everyone out.
    pub fn is_valid(&self) -> bool {
        let Some(raw) = self.expiry.as_deref() else {
            return true;
        };
        let Some(expiry) = parse_expiry(raw) else {
            return true;
        };
        Local::now().naive_local() <= expiry
    }
}

fn parse_expiry(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Some(dt.naive_local());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(23, 59, 59))
}

/// Partial update for [`UserStore::edit`]. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct UserEdit {
    pub name: Option<String>,
    pub role: Option<Role>,
    /// `Some("")` clears the expiry.
    pub expiry: Option<String>,
    /// Empty passwords are ignored rather than set.
    pub password: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<User>,
}

/// The user store, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store, not an error.
    fn load(&self) -> Result<UsersFile, StoreError> {
        if !self.path.exists() {
            return Ok(UsersFile::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, file: &UsersFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.load()?.users)
    }

    pub fn get(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.load()?.users.into_iter().find(|u| u.id == user_id))
    }

    pub fn add(&self, user: User) -> Result<(), StoreError> {
        let mut file = self.load()?;
        if file.users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::DuplicateUser(user.id));
        }
        tracing::info!(user_id = %user.id, role = %user.role, "adding user");
        file.users.push(user);
        self.save(&file)
    }

    pub fn remove(&self, user_id: &str) -> Result<(), StoreError> {
        let mut file = self.load()?;
        let before = file.users.len();
        file.users.retain(|u| u.id != user_id);
        if file.users.len() == before {
            return Err(StoreError::UnknownUser(user_id.to_string()));
        }
        tracing::info!(user_id, "removing user");
        self.save(&file)
    }

    pub fn edit(&self, user_id: &str, edit: UserEdit) -> Result<(), StoreError> {
        let mut file = self.load()?;
        let user = file
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?;

        if let Some(name) = edit.name {
            user.name = name;
        }
        if let Some(role) = edit.role {
            user.role = role;
        }
        if let Some(expiry) = edit.expiry {
            user.expiry = (!expiry.is_empty()).then_some(expiry);
        }
        if let Some(password) = edit.password {
            if !password.is_empty() {
                user.password = password;
            }
        }
        self.save(&file)
    }

    /// Check credentials. Returns the user on a match, `None` for wrong
    /// credentials or an expired account.
    pub fn authenticate(&self, user_id: &str, password: &str) -> Result<Option<User>, StoreError> {
        let file = self.load()?;
        let found = file
            .users
            .into_iter()
            .find(|u| u.id == user_id && u.password == password);
        match found {
            Some(user) if user.is_valid() => Ok(Some(user)),
            Some(_) => {
                tracing::info!(user_id, "login refused, account expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path().join("users.json"));
        (dir, store)
    }

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            password: "pw".to_string(),
            name: format!("Name of {id}"),
            role,
            expiry: None,
        }
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert!(store.get("nobody").unwrap().is_none());
    }

    #[test]
    fn add_and_get_roundtrip() {
        let (_dir, store) = store();
        store.add(user("alice", Role::Admin)).unwrap();
        store.add(user("bob", Role::User)).unwrap();

        let got = store.get("alice").unwrap().unwrap();
        assert_eq!(got.role, Role::Admin);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let (_dir, store) = store();
        store.add(user("alice", Role::User)).unwrap();
        let err = store.add(user("alice", Role::User)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser(id) if id == "alice"));
    }

    #[test]
    fn remove_unknown_user_errors() {
        let (_dir, store) = store();
        let err = store.remove("ghost").unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(_)));
    }

    #[test]
    fn edit_updates_only_provided_fields() {
        let (_dir, store) = store();
        store.add(user("alice", Role::User)).unwrap();

        store
            .edit(
                "alice",
                UserEdit {
                    role: Some(Role::Admin),
                    password: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();

        let got = store.get("alice").unwrap().unwrap();
        assert_eq!(got.role, Role::Admin);
        assert_eq!(got.name, "Name of alice");
        // Empty password in the edit form means "keep the old one".
        assert_eq!(got.password, "pw");
    }

    #[test]
    fn empty_expiry_clears_the_field() {
        let (_dir, store) = store();
        let mut u = user("alice", Role::User);
        u.expiry = Some("2099-01-01".to_string());
        store.add(u).unwrap();

        store
            .edit(
                "alice",
                UserEdit {
                    expiry: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.get("alice").unwrap().unwrap().expiry, None);
    }

    #[test]
    fn authenticate_checks_password_and_expiry() {
        let (_dir, store) = store();
        store.add(user("alice", Role::User)).unwrap();
        let mut expired = user("bob", Role::User);
        expired.expiry = Some("2001-01-01".to_string());
        store.add(expired).unwrap();

        assert!(store.authenticate("alice", "pw").unwrap().is_some());
        assert!(store.authenticate("alice", "wrong").unwrap().is_none());
        assert!(store.authenticate("ghost", "pw").unwrap().is_none());
        assert!(store.authenticate("bob", "pw").unwrap().is_none());
    }

    #[test]
    fn unparseable_expiry_counts_as_valid() {
        let u = User {
            expiry: Some("whenever".to_string()),
            ..user("alice", Role::User)
        };
        assert!(u.is_valid());

        let future = User {
            expiry: Some("2099-12-31".to_string()),
            ..user("alice", Role::User)
        };
        assert!(future.is_valid());
    }

    #[test]
    fn role_parsing_defaults_to_user() {
        assert_eq!("admin".parse(), Ok(Role::Admin));
        assert_eq!("user".parse(), Ok(Role::User));
        assert_eq!("superuser".parse(), Ok(Role::User));
    }
}
