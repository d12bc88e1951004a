use loan_risk::config::AppConfig;
use loan_risk::error::AppError;
use loan_risk::scoring::LoanRiskService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configured artifact path unless the caller supplies one explicitly.
pub(crate) fn model_path(override_path: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match override_path {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.model.artifact_path),
    }
}

pub(crate) fn load_service(path: PathBuf) -> Result<LoanRiskService, AppError> {
    LoanRiskService::from_path(path).map_err(AppError::from)
}
