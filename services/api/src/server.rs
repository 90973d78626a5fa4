use crate::cli::ServeArgs;
use crate::infra::{load_records, portfolio_service, AppState};
use crate::routes::with_portfolio_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rental_analytics::config::AppConfig;
use rental_analytics::error::AppError;
use rental_analytics::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let records = load_records(config.analytics.portfolio_csv.as_deref())?;
    let service = portfolio_service(records, &config.analytics)?;
    info!(
        properties = service.list()?.len(),
        reference_year = config.analytics.reference_year,
        "portfolio loaded"
    );

    let app = with_portfolio_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rental analytics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
