use std::time::Instant;

use workout_core::default_excluded_disciplines;
use workout_db::Db;

use crate::extract::{extract_workout, is_excluded};
use crate::provider::WorkoutProvider;
use crate::types::{IngestError, IngestStats, Result};

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub excluded_disciplines: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            excluded_disciplines: default_excluded_disciplines(),
        }
    }
}

/// Pulls the full workout list and stores every new workout, one commit per row.
///
/// Workouts already stored are left as they are. The first failed insert stops the
/// run; rows written before it stay committed.
pub fn ingest_workouts(
    db: &Db,
    provider: &dyn WorkoutProvider,
    options: &IngestOptions,
) -> Result<IngestStats> {
    let ingest_start = Instant::now();
    let mut stats = IngestStats::default();
    let batch = provider.list_workouts()?;
    tracing::info!(
        count = batch.workouts.len(),
        rejected = batch.rejected.len(),
        "fetched workouts from provider"
    );
    stats.workouts_seen = batch.workouts.len() + batch.rejected.len();
    stats.rejected = batch.rejected;

    for workout in &batch.workouts {
        if is_excluded(workout, &options.excluded_disciplines) {
            stats.excluded += 1;
            continue;
        }

        let mut extracted = extract_workout(workout);
        stats.issues.append(&mut extracted.issues);
        let Some(record) = extracted.into_record() else {
            stats.skipped += 1;
            tracing::warn!(workout_id = %workout.id, "skipping workout without duration");
            continue;
        };

        match db.insert_workout(&record) {
            Ok(true) => {
                stats.inserted += 1;
                tracing::debug!(workout_id = %record.workout_id, "workout inserted");
            }
            Ok(false) => stats.already_present += 1,
            Err(source) => {
                tracing::error!(
                    workout_id = %record.workout_id,
                    error = %source,
                    "insert failed, aborting remaining workouts"
                );
                return Err(IngestError::Insert {
                    workout_id: record.workout_id,
                    inserted_before: stats.inserted,
                    source,
                });
            }
        }
    }

    tracing::info!(
        seen = stats.workouts_seen,
        excluded = stats.excluded,
        skipped = stats.skipped,
        inserted = stats.inserted,
        already_present = stats.already_present,
        rejected = stats.rejected.len(),
        issues = stats.issues.len(),
        elapsed_ms = ingest_start.elapsed().as_millis() as u64,
        "ingest complete"
    );
    Ok(stats)
}
