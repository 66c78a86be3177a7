mod errors;
mod handlers;
pub mod render;
mod state;

use axum::{Router, routing::get};

pub use errors::HttpError;
pub use render::render_dashboard_page;
pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route(
            "/dashboard",
            get(handlers::dashboard_json).fallback(handlers::method_not_allowed),
        )
        .route(
            "/summary",
            get(handlers::summary).fallback(handlers::method_not_allowed),
        );

    Router::new()
        .route(
            "/",
            get(handlers::dashboard_page).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .nest("/api", api)
        .fallback(handlers::fallback)
        .with_state(state)
}

#[cfg(test)]
mod tests;
