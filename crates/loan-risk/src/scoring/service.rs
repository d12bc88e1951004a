use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use super::artifact::{load_artifact, ArtifactLoadError, InferenceError, ModelArtifact, TransformError};
use super::domain::{ApplicationForm, DomainError, RawApplication};
use super::features::{encode_application, SchemaMismatch};
use super::inference::{InferenceEngine, Verdict};

const ERROR_PREFIX: &str = "❌ Error: ";

/// Facade composing the encoder, assembler, and inference engine over one shared artifact.
#[derive(Debug, Clone)]
pub struct LoanRiskService {
    engine: InferenceEngine,
}

impl LoanRiskService {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self {
            engine: InferenceEngine::new(artifact),
        }
    }

    /// Load the artifact once and build a service around it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactLoadError> {
        let artifact = load_artifact(path)?;
        Ok(Self::new(Arc::new(artifact)))
    }

    pub fn artifact(&self) -> &ModelArtifact {
        self.engine.artifact()
    }

    /// Encode, order, scale, and classify a typed application.
    pub fn assess(&self, application: &RawApplication) -> Result<Verdict, PredictionError> {
        let features = encode_application(application).ordered(self.artifact().schema());
        self.engine.infer(&features).map_err(|err| {
            warn!(kind = err.kind(), error = %err, "loan prediction failed");
            err
        })
    }

    /// Parse and validate raw form values before assessing them.
    pub fn assess_form(&self, form: &ApplicationForm) -> Result<Verdict, PredictionError> {
        let application = form.to_application().map_err(|err| {
            warn!(error = %err, "loan application rejected at intake");
            PredictionError::from(err)
        })?;
        self.assess(&application)
    }

    /// Verdict text, or an error-prefixed message when the prediction cannot be made.
    pub fn predict(&self, application: &RawApplication) -> String {
        render_result(self.assess(application))
    }

    pub fn predict_form(&self, form: &ApplicationForm) -> String {
        render_result(self.assess_form(form))
    }
}

fn render_result(result: Result<Verdict, PredictionError>) -> String {
    match result {
        Ok(verdict) => verdict.render(),
        Err(err) => err.render(),
    }
}

/// Per-request failure raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl PredictionError {
    pub const fn kind(&self) -> &'static str {
        match self {
            PredictionError::Domain(_) => "domain",
            PredictionError::Schema(_) => "schema_mismatch",
            PredictionError::Transform(_) => "transform",
            PredictionError::Inference(_) => "inference",
        }
    }

    /// Whether resubmitting corrected input can succeed.
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            PredictionError::Domain(_) | PredictionError::Transform(_)
        )
    }

    pub fn render(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }
}
