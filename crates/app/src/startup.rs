use std::path::{Path, PathBuf};

use crate::{AppError, Result};

pub const DATA_DIR_ENV: &str = "WORKOUT_TRACKER_DATA_DIR";
const DEFAULT_DIR_NAME: &str = ".workout-tracker";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let config_path = app_data_dir.join(CONFIG_FILE_NAME);
        Self {
            app_data_dir,
            config_path,
        }
    }

    pub fn with_config_path(mut self, config_path: Option<PathBuf>) -> Self {
        if let Some(path) = config_path {
            self.config_path = path;
        }
        self
    }

    /// Relative store names live inside the data dir.
    pub fn db_path(&self, database: &str) -> PathBuf {
        let path = Path::new(database);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.app_data_dir.join(path)
        }
    }
}

/// `explicit` (from the command line) wins, then the environment, then `$HOME`.
pub fn resolve_data_dir<F>(explicit: Option<PathBuf>, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = lookup(DATA_DIR_ENV).filter(|value| !value.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = lookup("HOME")
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AppError::Config(format!(
                "cannot resolve data dir: set {} or HOME",
                DATA_DIR_ENV
            ))
        })?;
    Ok(PathBuf::from(home).join(DEFAULT_DIR_NAME))
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    Ok(())
}
