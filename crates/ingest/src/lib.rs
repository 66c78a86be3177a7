mod extract;
mod pipeline;
mod provider;
mod types;

pub use extract::{
    ExtractedWorkout, extract_calories, extract_distance_miles, extract_duration_seconds,
    extract_instructor_name, extract_workout, is_excluded,
};
pub use pipeline::{IngestOptions, ingest_workouts};
pub use provider::{
    ExportSource, Instructor, JsonExportProvider, Ride, SummaryMetric, UpstreamWorkout,
    WorkoutBatch, WorkoutProvider, workouts_from_reader, workouts_from_str,
};
pub use types::{
    IngestError, IngestIssue, IngestStats, IssueKind, ProviderError, RejectedWorkout, Result,
};
