use std::fs;

use ingest::JsonExportProvider;
use tempfile::tempdir;
use workout_app::{AppConfig, AppPaths, AppState, RuntimeConfig};

const EXPORT: &str = r#"[
  {"id": "a", "fitness_discipline": "cycling", "created_at": "2020-03-15T18:00:00Z",
   "metrics": [{"slug": "calories", "value": 400, "unit": "kcal"}],
   "ride": {"duration": 1800, "instructor": {"name": "Robin"}}},
  {"id": "b", "fitness_discipline": "running", "created_at": "2020-06-10T07:00:00Z",
   "metrics": [{"slug": "calories", "value": 600, "unit": "kcal"},
               {"slug": "distance", "value": 3.1, "unit": "mi"}],
   "ride": {"duration": 1800, "instructor": {"name": "Becs"}}},
  {"id": "c", "fitness_discipline": "meditation", "created_at": "2020-06-10T21:00:00Z",
   "ride": {"duration": 600}},
  {"id": "d", "fitness_discipline": "cycling", "created_at": "2021-01-02T12:00:00Z",
   "metrics": [{"slug": "calories", "value": 200, "unit": "kcal"}],
   "ride": {"duration": 1200, "instructor": {"name": "Robin"}}}
]"#;

#[test]
fn ingest_then_dashboard_smoke() {
    let dir = tempdir().expect("temp dir");
    let app_state = AppState::new(RuntimeConfig::new(dir.path().join("app.sqlite")));
    assert!(app_state.is_fresh_db());
    app_state.initialize().expect("initialize");

    let export = dir.path().join("export.json");
    fs::write(&export, EXPORT).expect("write export");
    let provider = JsonExportProvider::from_arg(&export.to_string_lossy());

    let stats = app_state.services.ingest.run(&provider).expect("ingest");
    assert_eq!(stats.inserted, 3);
    assert_eq!(stats.excluded, 1);

    let views = app_state.services.dashboard.views().expect("views");
    assert_eq!(views.summary.total_workouts, 3);
    assert_eq!(views.summary.average_calories_per_day, Some(400.0));
    assert_eq!(views.summary.average_calories_per_day_reference, Some(500.0));
    assert_eq!(views.instructor_counts[0].instructor_name, "Robin");
    assert_eq!(views.instructor_counts[0].count, 2);

    let rerun = app_state.services.ingest.run(&provider).expect("rerun");
    assert_eq!(rerun.inserted, 0);
    assert_eq!(rerun.already_present, 3);
}

#[test]
fn state_follows_config_file() {
    let dir = tempdir().expect("temp dir");
    let paths = AppPaths::new(dir.path().to_path_buf());
    let config_file = paths.config_path.clone();
    fs::write(
        &config_file,
        "[database]\ndatabase = \"custom.sqlite\"\n\n[ingest]\nexcluded_disciplines = [\"meditation\", \"running\"]\n",
    )
    .expect("write config");

    let load = AppConfig::load(&config_file, |_| None).expect("load config");
    let app_state = AppState::from_config(&paths, &load.config);
    assert_eq!(app_state.config.db_path, dir.path().join("custom.sqlite"));
    app_state.initialize().expect("initialize");

    let export = dir.path().join("export.json");
    fs::write(&export, EXPORT).expect("write export");
    let provider = JsonExportProvider::from_arg(&export.to_string_lossy());
    let stats = app_state.services.ingest.run(&provider).expect("ingest");
    assert_eq!(stats.excluded, 2);
    assert_eq!(stats.inserted, 2);

    let summary = app_state.services.dashboard.summary().expect("summary");
    assert_eq!(summary.total_workouts, 2);
}

#[test]
fn empty_store_has_no_averages() {
    let dir = tempdir().expect("temp dir");
    let app_state = AppState::new(RuntimeConfig::new(dir.path().join("empty.sqlite")));
    app_state.initialize().expect("initialize");
    let summary = app_state.services.dashboard.summary().expect("summary");
    assert_eq!(summary.total_workouts, 0);
    assert_eq!(summary.average_calories_per_day, None);
    assert_eq!(summary.average_calories_per_day_reference, None);
}

#[test]
fn configured_offset_sets_calendar_day() {
    let dir = tempdir().expect("temp dir");
    let mut config = RuntimeConfig::new(dir.path().join("offset.sqlite"));
    config.utc_offset_minutes = -7 * 60;
    let app_state = AppState::new(config);
    app_state.initialize().expect("initialize");

    let export = dir.path().join("evening.json");
    fs::write(
        &export,
        r#"[
  {"id": "morning", "fitness_discipline": "cycling", "created_at": "2020-03-15T16:00:00Z",
   "metrics": [{"slug": "calories", "value": 300, "unit": "kcal"}], "ride": {"duration": 1200}},
  {"id": "evening", "fitness_discipline": "running", "created_at": "2020-03-16T03:00:00Z",
   "metrics": [{"slug": "calories", "value": 200, "unit": "kcal"}], "ride": {"duration": 1200}}
]"#,
    )
    .expect("write export");
    let provider = JsonExportProvider::from_arg(&export.to_string_lossy());
    app_state.services.ingest.run(&provider).expect("ingest");

    let views = app_state.services.dashboard.views().expect("views");
    assert_eq!(views.calories_by_date.len(), 1);
    assert_eq!(views.calories_by_date[0].date.to_string(), "2020-03-15");
    assert_eq!(views.calories_by_date[0].value, 500.0);
    assert_eq!(views.workouts_by_date[0].count, 2);
}
