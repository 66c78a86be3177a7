use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use workout_core::WorkoutRecord;

use crate::error::Result;

/// Column order shared by every `SELECT` that feeds [`row_to_raw_workout`].
pub(crate) const WORKOUT_SELECT: &str = r#"
    SELECT workout_id, fitness_discipline, created_at, calories, instructor_name,
           duration_seconds, distance_miles
    FROM workouts
"#;

/// A row as stored, before `created_at` is parsed back into a timestamp.
pub(crate) struct RawWorkoutRow {
    workout_id: String,
    fitness_discipline: String,
    created_at: String,
    calories: Option<f64>,
    instructor_name: Option<String>,
    duration_seconds: f64,
    distance_miles: Option<f64>,
}

impl RawWorkoutRow {
    pub(crate) fn into_record(self) -> Result<WorkoutRecord> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc);
        Ok(WorkoutRecord {
            workout_id: self.workout_id,
            fitness_discipline: self.fitness_discipline,
            created_at,
            calories: self.calories,
            instructor_name: self.instructor_name,
            duration_seconds: self.duration_seconds,
            distance_miles: self.distance_miles,
        })
    }
}

pub(crate) fn row_to_raw_workout(
    row: &Row<'_>,
) -> std::result::Result<RawWorkoutRow, rusqlite::Error> {
    Ok(RawWorkoutRow {
        workout_id: row.get(0)?,
        fitness_discipline: row.get(1)?,
        created_at: row.get(2)?,
        calories: row.get(3)?,
        instructor_name: row.get(4)?,
        duration_seconds: row.get(5)?,
        distance_miles: row.get(6)?,
    })
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
