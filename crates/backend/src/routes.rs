use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D402 INVENTORY INTELLIGENCE DASHBOARD
        // ========================================
        .route(
            "/api/d402/kpis",
            get(handlers::d402_inventory_intelligence::get_kpis),
        )
        .route(
            "/api/d402/stores",
            get(handlers::d402_inventory_intelligence::get_store_options),
        )
        .route(
            "/api/d402/initial",
            get(handlers::d402_inventory_intelligence::get_initial_view),
        )
        .route(
            "/api/d402/views",
            post(handlers::d402_inventory_intelligence::post_views),
        )
        .route(
            "/api/d402/filter_event",
            post(handlers::d402_inventory_intelligence::post_filter_event),
        )
}
