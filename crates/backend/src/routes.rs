use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // DASHBOARDS
        // ========================================
        // D402 Sales Analytics Dashboard
        .route(
            "/api/d402/defaults",
            get(handlers::d402_sales_analytics::get_defaults),
        )
        .route(
            "/api/d402/sales_analytics",
            post(handlers::d402_sales_analytics::get_sales_analytics),
        )
}
