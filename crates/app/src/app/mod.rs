use std::path::{Path, PathBuf};

use workout_core::ReferencePeriod;
use workout_db::Db;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::services::AppServices;
use crate::startup::AppPaths;

/// Settings the services run with, resolved from [`AppConfig`] and [`AppPaths`].
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub excluded_disciplines: Vec<String>,
    pub reference_period: ReferencePeriod,
    pub utc_offset_minutes: i32,
}

impl RuntimeConfig {
    pub fn new(db_path: PathBuf) -> Self {
        let defaults = AppConfig::default();
        Self {
            db_path,
            excluded_disciplines: defaults.ingest.excluded_disciplines,
            reference_period: defaults.reference_period,
            utc_offset_minutes: defaults.dashboard.utc_offset_minutes,
        }
    }

    pub fn resolve(paths: &AppPaths, config: &AppConfig) -> Self {
        Self {
            db_path: paths.db_path(&config.database.database),
            excluded_disciplines: config.ingest.excluded_disciplines.clone(),
            reference_period: config.reference_period,
            utc_offset_minutes: config.dashboard.utc_offset_minutes,
        }
    }
}

/// Application state shared by the frontends (CLI jobs, HTTP server).
#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: RuntimeConfig) -> Self {
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn from_config(paths: &AppPaths, config: &AppConfig) -> Self {
        Self::new(RuntimeConfig::resolve(paths, config))
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    /// Bootstraps the store; both jobs call this before touching the table.
    pub fn initialize(&self) -> Result<()> {
        let is_fresh_db = self.is_fresh_db();
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        tracing::info!(
            db_path = %self.config.db_path.display(),
            fresh = is_fresh_db,
            "store ready"
        );
        Ok(())
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }
}

pub fn setup_db(path: &Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
