use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/progress", post(handlers::submit_form))
        .route("/progress/delete", post(handlers::delete_form))
        .route(
            "/api/progress",
            get(handlers::get_progress).post(handlers::submit_json),
        )
        .route("/api/progress/:date", delete(handlers::delete_json))
        .route("/api/preview", get(handlers::get_preview))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/load",
            get(handlers::load_csv).options(handlers::cors_preflight),
        )
        .route(
            "/api/save",
            post(handlers::save_csv).options(handlers::cors_preflight),
        )
        .with_state(state)
}
