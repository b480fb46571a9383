//! Server configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level server configuration, loaded from `quizdeck.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory scanned for question files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Where uploads land. Defaults to the data directory.
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,
    /// The user-accounts JSON file.
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Session cookie name.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_users_file() -> PathBuf {
    PathBuf::from("users.json")
}
fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}
fn default_cookie_name() -> String {
    "quizdeck_session".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            upload_dir: None,
            users_file: default_users_file(),
            bind: default_bind(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl ServerConfig {
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.as_deref().unwrap_or(&self.data_dir)
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// Environment variable overrides: `QUIZDECK_DATA_DIR`,
/// `QUIZDECK_USERS_FILE`, `QUIZDECK_BIND`.
pub fn load_config() -> Result<ServerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ServerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else {
            config_home()
                .map(|dir| dir.join("config.toml"))
                .filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ServerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ServerConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZDECK_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(file) = std::env::var("QUIZDECK_USERS_FILE") {
        config.users_file = PathBuf::from(file);
    }
    if let Ok(bind) = std::env::var("QUIZDECK_BIND") {
        config.bind = bind;
    }

    Ok(config)
}

fn config_home() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("quizdeck"));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("quizdeck"))
}
