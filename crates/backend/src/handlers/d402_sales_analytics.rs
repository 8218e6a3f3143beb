use axum::{http::StatusCode, Json};
use contracts::dashboards::d402_sales_analytics::{
    AnalyticsDefaults, SalesAnalyticsRequest, SalesAnalyticsResponse,
};

use crate::dashboards::d402_sales_analytics::error::AnalyticsError;
use crate::dashboards::d402_sales_analytics::service;

fn error_status(e: &AnalyticsError) -> StatusCode {
    if e.is_client_error() {
        tracing::warn!("D402 Dashboard: Rejected request: {}", e);
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("D402 Dashboard: Failed to build analytics: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// GET /api/d402/defaults
pub async fn get_defaults() -> Json<AnalyticsDefaults> {
    Json(service::defaults())
}

/// POST /api/d402/sales_analytics
pub async fn get_sales_analytics(
    Json(request): Json<SalesAnalyticsRequest>,
) -> Result<Json<SalesAnalyticsResponse>, StatusCode> {
    tracing::info!(
        "D402 Dashboard: Building analytics for {} events, granularity {}",
        request.events.len(),
        request.granularity.as_deref().unwrap_or("default")
    );

    match service::get_sales_analytics(&request) {
        Ok(response) => {
            tracing::info!(
                "D402 Dashboard: Returning {} periods, {} top products",
                response.periods.len(),
                response.top_products.labels.len()
            );
            Ok(Json(response))
        }
        Err(e) => Err(error_status(&e)),
    }
}
