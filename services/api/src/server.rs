use crate::cli::ServeArgs;
use crate::infra::{load_reference_data, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use waterfront::config::AppConfig;
use waterfront::error::AppError;
use waterfront::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.households_csv.take() {
        config.reference.households_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let reference = load_reference_data(config.reference.households_csv.as_deref())?;
    info!(
        neighborhood = %reference.neighborhood.name,
        bands = reference.neighborhood.bands.len(),
        "reference data ready"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        reference: Arc::new(reference),
    };

    let app = with_service_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "waterfront pro forma service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
