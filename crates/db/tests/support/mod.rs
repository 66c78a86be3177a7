#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use workout_core::WorkoutRecord;
use workout_db::Db;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("timestamp")
        .with_timezone(&Utc)
}

pub fn make_workout(id: &str, created_at: &str, discipline: &str) -> WorkoutRecord {
    WorkoutRecord {
        workout_id: id.to_string(),
        fitness_discipline: discipline.to_string(),
        created_at: ts(created_at),
        calories: Some(250.0),
        instructor_name: Some("Robin".to_string()),
        duration_seconds: 1200.0,
        distance_miles: Some(0.0),
    }
}

pub fn insert_workouts(db: &Db, records: &[WorkoutRecord]) {
    for record in records {
        db.insert_workout(record).expect("insert workout");
    }
}
