//! Shared application state.

use std::sync::Arc;

use quizdeck_core::loader::AllowedRoots;
use quizdeck_store::history::{HistoryStore, MemoryHistoryStore};
use quizdeck_store::sessions::SessionStore;
use quizdeck_store::users::UserStore;

use crate::config::ServerConfig;

/// Everything a request handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub users: Arc<UserStore>,
    pub sessions: Arc<SessionStore>,
    pub history: Arc<dyn HistoryStore>,
    pub roots: Arc<AllowedRoots>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let roots = AllowedRoots::new([
            config.data_dir.clone(),
            config.upload_dir().to_path_buf(),
        ]);
        let users = UserStore::new(config.users_file.clone());
        Self {
            config: Arc::new(config),
            users: Arc::new(users),
            sessions: Arc::new(SessionStore::new()),
            history: Arc::new(MemoryHistoryStore::new()),
            roots: Arc::new(roots),
        }
    }
}
