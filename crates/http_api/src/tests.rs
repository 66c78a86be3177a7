use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use workout_app::{AppState, RuntimeConfig};

use crate::HttpState;

#[tokio::test]
async fn serves_dashboard_on_empty_store() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let app_state = AppState::new(RuntimeConfig::new(temp_dir.path().join("http.sqlite")));
    app_state.setup_db().expect("setup db");

    let app = crate::router(HttpState::new(app_state));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    assert!(content_type.contains("text/html"));
}
