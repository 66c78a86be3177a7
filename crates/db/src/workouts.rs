use rusqlite::{OptionalExtension, params};
use workout_core::WorkoutRecord;

use crate::Db;
use crate::error::Result;
use crate::helpers::{WORKOUT_SELECT, format_timestamp, row_to_raw_workout};

impl Db {
    /// Inserts one workout unless its id is already stored.
    ///
    /// Runs in autocommit mode, so a successful call is durable before it returns.
    /// Returns `false` when the id already existed; the stored row is left untouched.
    pub fn insert_workout(&self, record: &WorkoutRecord) -> Result<bool> {
        let rows = self.conn.execute(
            r#"
            INSERT INTO workouts (
              workout_id, fitness_discipline, created_at, calories, instructor_name,
              duration_seconds, distance_miles
            ) VALUES (
              ?1, ?2, ?3, ?4, ?5, ?6, ?7
            )
            ON CONFLICT (workout_id) DO NOTHING
            "#,
            params![
                record.workout_id,
                record.fitness_discipline,
                format_timestamp(&record.created_at),
                record.calories,
                record.instructor_name,
                record.duration_seconds,
                record.distance_miles,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Loads the whole table, oldest first.
    pub fn list_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        let sql = format!("{WORKOUT_SELECT} ORDER BY created_at ASC, workout_id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], row_to_raw_workout)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(|row| row.into_record()).collect()
    }

    pub fn get_workout(&self, workout_id: &str) -> Result<Option<WorkoutRecord>> {
        let sql = format!("{WORKOUT_SELECT} WHERE workout_id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![workout_id], row_to_raw_workout)
            .optional()?;
        row.map(|row| row.into_record()).transpose()
    }

    pub fn count_workouts(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}
