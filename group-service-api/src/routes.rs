use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Group endpoints
        .route("/groupnew", post(handlers::groups::create_group))
        .route("/groupget", get(handlers::groups::get_group))
        .route("/groupupdate", put(handlers::groups::update_group))
        .route("/grouplist", get(handlers::groups::list_groups))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
