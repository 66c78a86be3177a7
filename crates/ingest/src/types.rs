use serde::Serialize;
use std::io;

/// Ingest summary returned after one pass over the provider's workout list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    pub workouts_seen: usize,
    pub excluded: usize,
    pub skipped: usize,
    pub inserted: usize,
    pub already_present: usize,
    pub issues: Vec<IngestIssue>,
    pub rejected: Vec<RejectedWorkout>,
}

impl IngestStats {
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &IngestIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}

/// Which optional upstream field was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingCalories,
    MissingDistance,
    MissingInstructor,
    MissingDuration,
}

/// Non-fatal issues encountered while extracting a workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestIssue {
    pub workout_id: String,
    pub fitness_discipline: String,
    pub kind: IssueKind,
    pub message: String,
}

/// A list entry that could not be read as a workout; the rest of the list still loads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedWorkout {
    pub index: usize,
    pub workout_id: Option<String>,
    pub reason: String,
}

/// Errors raised while fetching the upstream workout list.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Errors emitted by the ingest pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("insert of workout {workout_id} failed after {inserted_before} new rows: {source}")]
    Insert {
        workout_id: String,
        inserted_before: usize,
        #[source]
        source: workout_db::DbError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
