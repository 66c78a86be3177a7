mod dashboard;
mod ingest;

use std::sync::Arc;

use crate::app::RuntimeConfig;
use crate::error::Result;
use workout_db::Db;

pub use dashboard::DashboardService;
pub use ingest::IngestService;

type SharedConfig = Arc<RuntimeConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub dashboard: DashboardService,
    pub ingest: IngestService,
}

impl AppServices {
    pub fn new(config: &RuntimeConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            dashboard: DashboardService::new(shared.clone()),
            ingest: IngestService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
