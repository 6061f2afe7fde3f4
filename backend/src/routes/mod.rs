//! Route definitions for the Stock Report Platform backend

use axum::{
    routing::get,
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Report configuration management
        .nest("/configs", config_routes())
}

/// Report configuration and report data routes
fn config_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_configs).post(handlers::create_config),
        )
        .route(
            "/:config_id",
            get(handlers::get_config)
                .put(handlers::update_config)
                .delete(handlers::delete_config),
        )
        .route("/:config_id/report", get(handlers::get_report_data))
}
