use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::artifact::{ArtifactMetadata, ClassProbabilities};
use super::domain::{ApplicationForm, DomainError};
use super::features::FeatureName;
use super::inference::LoanOutcome;
use super::service::{LoanRiskService, PredictionError};

/// Body returned for a successful prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub outcome: LoanOutcome,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub verdict: String,
}

/// Declared artifact schema, exposed so form clients can check compatibility.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSchemaView {
    pub feature_names: Vec<FeatureName>,
    pub scaler: &'static str,
    pub classifier: &'static str,
    pub metadata: ArtifactMetadata,
}

/// Router builder exposing the prediction and schema endpoints.
pub fn loan_router(service: Arc<LoanRiskService>) -> Router {
    Router::new()
        .route("/api/v1/loan/predictions", post(predict_handler))
        .route("/api/v1/loan/features", get(features_handler))
        .with_state(service)
}

/// Missing or mistyped fields are reported through the same envelope as domain errors.
pub(crate) async fn predict_handler(
    State(service): State<Arc<LoanRiskService>>,
    payload: Result<axum::Json<ApplicationForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(axum::Json(form)) => form,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "loan application payload rejected");
            return error_response(PredictionError::from(DomainError::Malformed {
                detail: rejection.body_text(),
            }));
        }
    };

    match service.assess_form(&form) {
        Ok(verdict) => {
            let view = PredictionView {
                outcome: verdict.outcome,
                confidence: verdict.confidence,
                probabilities: verdict.probabilities,
                verdict: verdict.render(),
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: PredictionError) -> Response {
    let status = if err.is_input_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let payload = json!({
        "error": err.to_string(),
        "kind": err.kind(),
        "verdict": err.render(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn features_handler(
    State(service): State<Arc<LoanRiskService>>,
) -> axum::Json<FeatureSchemaView> {
    let artifact = service.artifact();
    axum::Json(FeatureSchemaView {
        feature_names: artifact.feature_names().to_vec(),
        scaler: artifact.scaler().kind(),
        classifier: artifact.classifier().kind(),
        metadata: artifact.metadata().clone(),
    })
}
