use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{Html, IntoResponse},
};
use serde_json::json;
use workout_app::AppError;

use crate::{errors::HttpError, render, state::HttpState};

/// Loads a fresh snapshot per request, so newly ingested rows show on reload.
pub async fn dashboard_page(State(state): State<HttpState>) -> Result<Html<String>, HttpError> {
    let views = state.app_state.services.dashboard.views()?;
    let page = render::render_dashboard_page(&views).map_err(AppError::from)?;
    Ok(Html(page))
}

pub async fn dashboard_json(
    State(state): State<HttpState>,
) -> Result<impl IntoResponse, HttpError> {
    let views = state.app_state.services.dashboard.views()?;
    Ok(Json(views))
}

pub async fn summary(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let summary = state.app_state.services.dashboard.summary()?;
    Ok(Json(summary))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn method_not_allowed() -> HttpError {
    HttpError::method_not_allowed()
}

pub async fn fallback(req: Request<Body>) -> HttpError {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return HttpError::method_not_allowed();
    }
    HttpError::not_found()
}
