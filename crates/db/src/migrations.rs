use rusqlite::Connection;

use crate::Db;
use crate::error::{DbError, Result};

const MIGRATION_0001: &str = include_str!("../migrations/0001_create_workouts.sql");
const MIGRATION_0002: &str = include_str!("../migrations/0002_workouts_created_at_index.sql");

pub const MIGRATIONS: &[(&str, &str)] = &[
    ("0001_create_workouts", MIGRATION_0001),
    ("0002_workouts_created_at_index", MIGRATION_0002),
];

pub const WORKOUT_COLUMNS: &[&str] = &[
    "workout_id",
    "fitness_discipline",
    "created_at",
    "calories",
    "instructor_name",
    "duration_seconds",
    "distance_miles",
];

impl Db {
    /// Bootstraps the schema. Every script is idempotent, so this runs on each start.
    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (name, sql) in MIGRATIONS {
            tracing::debug!(migration = *name, "applying schema script");
            tx.execute_batch(sql)?;
        }
        ensure_workout_columns(&tx)?;
        tx.commit()?;
        Ok(())
    }
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

// `CREATE TABLE IF NOT EXISTS` keeps an older table untouched, so check its shape.
fn ensure_workout_columns(conn: &Connection) -> Result<()> {
    for column in WORKOUT_COLUMNS {
        if !table_has_column(conn, "workouts", column)? {
            return Err(DbError::IncompatibleSchema {
                table: "workouts".to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}
