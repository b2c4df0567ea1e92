//! Route definitions for the HuntStack migration analytics service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Trend and delta computation
        .nest("/trends", trend_routes())
        // Regional migration aggregates
        .nest("/migration", migration_routes())
        // Ranked hunt opportunities
        .nest("/opportunities", opportunity_routes())
        // Raw per-location hunting conditions
        .route(
            "/conditions/:location_id",
            get(handlers::get_location_conditions),
        )
}

/// Trend routes
fn trend_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_region_trends))
        .route("/:location_id/:species_slug", get(handlers::get_trend))
        .route(
            "/:location_id/:species_slug/history",
            get(handlers::get_survey_history),
        )
}

/// Regional migration routes
fn migration_routes() -> Router<AppState> {
    Router::new().route("/summary", get(handlers::get_migration_summary))
}

/// Hunt opportunity routes
fn opportunity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::rank_opportunities))
        .route("/export", get(handlers::export_opportunities))
}
