use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use ingest::{WorkoutProvider, workouts_from_str};
use serde_json::Value;
use tower::util::ServiceExt;

use workout_app::{AppState, RuntimeConfig};

use http_api::HttpState;

const EXPORT: &str = r#"{"data": [
  {"id": "a", "fitness_discipline": "cycling", "created_at": "2020-03-15T18:00:00Z",
   "metrics": [{"slug": "calories", "value": 400, "unit": "kcal"}],
   "ride": {"duration": 1800, "instructor": {"name": "Robin"}}},
  {"id": "b", "fitness_discipline": "running", "created_at": "2020-06-10T07:00:00Z",
   "metrics": [{"slug": "calories", "value": 600, "unit": "kcal"}],
   "ride": {"duration": 1200, "instructor": {"name": "Becs"}}},
  {"id": "c", "fitness_discipline": "stretching", "created_at": "2020-06-10T08:00:00Z",
   "ride": {"duration": 600, "instructor": {"name": "Robin"}}}
]}"#;

struct ExportProvider;

impl WorkoutProvider for ExportProvider {
    fn list_workouts(&self) -> Result<ingest::WorkoutBatch, ingest::ProviderError> {
        workouts_from_str(EXPORT)
    }
}

struct TestApp {
    _temp_dir: tempfile::TempDir,
    router: axum::Router,
}

fn build_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let app_state = AppState::new(RuntimeConfig::new(temp_dir.path().join("http.sqlite")));
    app_state.initialize().expect("initialize");
    app_state
        .services
        .ingest
        .run(&ExportProvider)
        .expect("ingest");

    let router = http_api::router(HttpState::new(app_state));
    TestApp {
        _temp_dir: temp_dir,
        router,
    }
}

async fn send(app: TestApp, method: &str, uri: &str) -> (StatusCode, String, String) {
    let response = app
        .router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, content_type, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn dashboard_page_shows_summary_and_charts() {
    let (status, content_type, body) = send(build_app(), "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.contains("text/html"));
    assert!(body.contains("Total Workouts: 3"));
    assert!(body.contains("Average Calories Per Day Overall, 500.00"));
    assert!(body.contains("Average Calories Per Day during March-July 2020, 500.00"));
    assert!(body.contains("\"id\":\"instructor-graph\""));
    assert!(body.contains("Length of Class (Minutes)"));
    assert!(body.contains("cdn.plot.ly"));
}

#[tokio::test]
async fn dashboard_json_exposes_all_views() {
    let (status, content_type, body) = send(build_app(), "GET", "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.contains("application/json"));
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["summary"]["total_workouts"], 3);
    assert_eq!(payload["calories_by_date"][0]["date"], "2020-03-15");
    assert_eq!(payload["calories_by_date"][1]["value"], 600.0);
    assert_eq!(payload["instructor_counts"][0]["instructor_name"], "Robin");
    assert_eq!(payload["instructor_counts"][0]["count"], 2);
    assert_eq!(payload["workouts_by_duration"][0]["duration_minutes"], 10.0);
}

#[tokio::test]
async fn summary_endpoint() {
    let (status, _, body) = send(build_app(), "GET", "/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["total_workouts"], 3);
    assert_eq!(payload["average_calories_per_day_reference"], 500.0);
    assert_eq!(payload["reference_period"]["first_month"], 3);
}

#[tokio::test]
async fn health_is_ok() {
    let (status, _, body) = send(build_app(), "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["status"], "ok");
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let (status, _, body) = send(build_app(), "GET", "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["code"], "not_found");
    assert_eq!(payload["status"], 404);
}

#[tokio::test]
async fn writes_are_rejected() {
    let (status, _, body) = send(build_app(), "POST", "/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["code"], "method_not_allowed");

    let (status, _, _) = send(build_app(), "DELETE", "/api/summary").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = send(build_app(), "PUT", "/elsewhere").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
