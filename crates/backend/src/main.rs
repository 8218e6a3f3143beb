pub mod dashboards;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use dashboards::d402_sales_analytics::{service, settings::AnalyticsSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        tracing::info!(
            "{} {} {} | {}ms",
            response.status().as_u16(),
            method,
            uri.path(),
            start.elapsed().as_millis()
        );

        response
    }

    let config = shared::config::load_config()?;
    let settings = AnalyticsSettings::from_config(&config.analytics)
        .map_err(|e| anyhow::anyhow!("invalid [analytics] config: {e}"))?;
    tracing::info!(
        "Analytics defaults: granularity {}, limit {}, metric {}, ordering {}",
        settings.granularity,
        settings.limit,
        settings.metric,
        settings.ordering.as_str()
    );
    service::configure(settings);

    system::initialization::initialize_chart_runtime();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes()
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let port = config.server.port;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
