//! Persistence and per-user state.
//!
//! Three concerns live here: the JSON-backed user store, the in-memory
//! login-session store, and the bounded activity history (logins, quiz
//! attempts, recently viewed). Everything is process-local; nothing
//! survives a restart except the user file itself.

pub mod error;
pub mod history;
pub mod sessions;
pub mod users;

pub use error::StoreError;
