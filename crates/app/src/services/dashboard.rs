use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use workout_core::{
    DashboardSummary, DashboardViews, WorkoutRecord, build_dashboard, calendar_offset,
};
use workout_db::Db;

#[derive(Clone)]
pub struct DashboardService {
    config: SharedConfig,
}

impl DashboardService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// One bulk read of the table; the connection closes before aggregation starts.
    pub fn snapshot(&self) -> Result<Vec<WorkoutRecord>> {
        let db = self.db()?;
        Ok(db.list_workouts()?)
    }

    pub fn views(&self) -> Result<DashboardViews> {
        let offset = calendar_offset(self.config.utc_offset_minutes).ok_or_else(|| {
            AppError::Config(format!(
                "utc offset out of range: {} minutes",
                self.config.utc_offset_minutes
            ))
        })?;
        let records = self.snapshot()?;
        let views = build_dashboard(&records, &self.config.reference_period, offset);
        tracing::debug!(
            workouts = views.summary.total_workouts,
            days = views.calories_by_date.len(),
            "dashboard views computed"
        );
        Ok(views)
    }

    pub fn summary(&self) -> Result<DashboardSummary> {
        Ok(self.views()?.summary)
    }
}
