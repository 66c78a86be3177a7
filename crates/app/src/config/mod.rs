//! Layered settings: built-in defaults, then a TOML file, then environment variables.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use workout_core::{ReferencePeriod, calendar_offset, default_excluded_disciplines};

use crate::error::{AppError, Result};

pub const DEFAULT_DATABASE_FILE: &str = "workouts.sqlite";
pub const DEFAULT_DASHBOARD_PORT: u16 = 8050;

pub const ENV_DB_HOST: &str = "WORKOUT_TRACKER_DB_HOST";
pub const ENV_DB_PORT: &str = "WORKOUT_TRACKER_DB_PORT";
pub const ENV_DB_USER: &str = "WORKOUT_TRACKER_DB_USER";
pub const ENV_DB_PASSWORD: &str = "WORKOUT_TRACKER_DB_PASSWORD";
pub const ENV_DB_DATABASE: &str = "WORKOUT_TRACKER_DB_DATABASE";
pub const ENV_DASHBOARD_PORT: &str = "WORKOUT_TRACKER_PORT";
pub const ENV_UTC_OFFSET_MINUTES: &str = "WORKOUT_TRACKER_UTC_OFFSET_MINUTES";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub dashboard: DashboardConfig,
    pub ingest: IngestConfig,
    pub reference_period: ReferencePeriod,
}

/// Store connection parameters.
///
/// `database` names the SQLite file. The network keys are kept so existing
/// credentials files still load, but an embedded store never dials out.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            user: None,
            password: None,
            database: DEFAULT_DATABASE_FILE.to_string(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .finish()
    }
}

impl DatabaseConfig {
    /// Keys that only make sense for a networked server.
    pub fn network_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.host.is_some() {
            keys.push("host");
        }
        if self.port.is_some() {
            keys.push("port");
        }
        if self.user.is_some() {
            keys.push("user");
        }
        if self.password.is_some() {
            keys.push("password");
        }
        keys
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub port: u16,
    /// Minutes east of UTC used to assign workouts to calendar days.
    pub utc_offset_minutes: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_DASHBOARD_PORT,
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub excluded_disciplines: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            excluded_disciplines: default_excluded_disciplines(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: AppConfig,
    pub path: PathBuf,
    pub created: bool,
}

/// Process environment as an override source.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl AppConfig {
    /// Reads `path`, writing the defaults there first when it does not exist.
    pub fn load_or_create(path: &Path) -> Result<ConfigLoad> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&contents)
                .map_err(|err| AppError::Config(format!("parse {}: {}", path.display(), err)))?;
            return Ok(ConfigLoad {
                config,
                path: path.to_path_buf(),
                created: false,
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = AppConfig::default();
        let contents = toml::to_string_pretty(&config)
            .map_err(|err| AppError::Config(format!("serialize defaults: {}", err)))?;
        fs::write(path, contents)?;
        Ok(ConfigLoad {
            config,
            path: path.to_path_buf(),
            created: true,
        })
    }

    /// File settings with environment overrides applied, validated.
    pub fn load<F>(path: &Path, lookup: F) -> Result<ConfigLoad>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut load = Self::load_or_create(path)?;
        load.config.apply_env_overrides(lookup)?;
        load.config.validate()?;
        let network_keys = load.config.database.network_keys();
        if !network_keys.is_empty() {
            tracing::warn!(
                keys = ?network_keys,
                database = %load.config.database.database,
                "network database settings are ignored by the embedded store"
            );
        }
        Ok(load)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = get(ENV_DB_HOST) {
            self.database.host = Some(host);
        }
        if let Some(port) = get(ENV_DB_PORT) {
            self.database.port = Some(parse_port(ENV_DB_PORT, &port)?);
        }
        if let Some(user) = get(ENV_DB_USER) {
            self.database.user = Some(user);
        }
        if let Some(password) = get(ENV_DB_PASSWORD) {
            self.database.password = Some(password);
        }
        if let Some(database) = get(ENV_DB_DATABASE) {
            self.database.database = database;
        }
        if let Some(port) = get(ENV_DASHBOARD_PORT) {
            self.dashboard.port = parse_port(ENV_DASHBOARD_PORT, &port)?;
        }
        if let Some(minutes) = get(ENV_UTC_OFFSET_MINUTES) {
            self.dashboard.utc_offset_minutes = minutes.trim().parse::<i32>().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a whole number of minutes, got {:?}",
                    ENV_UTC_OFFSET_MINUTES, minutes
                ))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.database.trim().is_empty() {
            return Err(AppError::Config("database.database must not be empty".to_string()));
        }
        if !self.reference_period.is_valid() {
            let period = &self.reference_period;
            return Err(AppError::Config(format!(
                "reference_period months must be within 1-12 with first <= last, got {}..{}",
                period.first_month, period.last_month
            )));
        }
        if calendar_offset(self.dashboard.utc_offset_minutes).is_none() {
            return Err(AppError::Config(format!(
                "dashboard.utc_offset_minutes must be within -720..=840, got {}",
                self.dashboard.utc_offset_minutes
            )));
        }
        Ok(())
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| AppError::Config(format!("{} must be a port number, got {:?}", key, value)))
}
