pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;

pub use app::{AppState, RuntimeConfig, setup_db};
pub use config::{
    AppConfig, ConfigLoad, DashboardConfig, DatabaseConfig, IngestConfig, env_lookup,
};
pub use error::{ApiError, AppError, Result};
pub use services::{AppServices, DashboardService, IngestService};
pub use startup::{AppPaths, ensure_app_data_dir, resolve_data_dir};
