//! The `quizdeck serve` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(
    data_dir: Option<PathBuf>,
    users_file: Option<PathBuf>,
    bind: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = quizdeck_server::load_config_from(config_path.as_deref())?;

    // Flags beat both the config file and the environment.
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(file) = users_file {
        config.users_file = file;
    }
    if let Some(bind) = bind {
        config.bind = bind;
    }

    quizdeck_server::serve(config).await
}
