use crate::cli::ServeArgs;
use crate::infra::{load_service, AppState};
use crate::routes::with_loan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_risk::config::AppConfig;
use loan_risk::error::AppError;
use loan_risk::telemetry;
use std::sync::atomic::Ordering;
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
    if let Some(model) = args.model.take() {
        config.model.artifact_path = model;
    }

    telemetry::init(&config.telemetry)?;

    let service = Arc::new(load_service(config.model.artifact_path.clone())?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_loan_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.model.artifact_path.display(),
        "loan risk service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
