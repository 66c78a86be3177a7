use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use ingest::{IngestOptions, IngestStats, WorkoutProvider};
use workout_db::Db;

#[derive(Clone)]
pub struct IngestService {
    config: SharedConfig,
}

impl IngestService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    fn options(&self) -> IngestOptions {
        IngestOptions {
            excluded_disciplines: self.config.excluded_disciplines.clone(),
        }
    }

    pub fn run(&self, provider: &dyn WorkoutProvider) -> Result<IngestStats> {
        let db = self.db()?;
        Ok(ingest::ingest_workouts(&db, provider, &self.options())?)
    }
}
