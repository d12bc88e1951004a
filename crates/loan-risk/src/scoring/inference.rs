use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::artifact::{ClassProbabilities, ModelArtifact};
use super::features::OrderedFeatures;
use super::service::PredictionError;

const APPROVED_HEADLINE: &str = "✅ Loan Approved";
const REJECTED_HEADLINE: &str = "❌ Loan Rejected (High Default Risk)";

/// Discrete lending outcome derived from the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanOutcome {
    Approved,
    Rejected,
}

impl LoanOutcome {
    /// Class 0 (non-default) approves, class 1 (default) rejects.
    pub const fn from_label(label: u8) -> Self {
        match label {
            0 => LoanOutcome::Approved,
            _ => LoanOutcome::Rejected,
        }
    }

    pub const fn class_label(self) -> u8 {
        match self {
            LoanOutcome::Approved => 0,
            LoanOutcome::Rejected => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LoanOutcome::Approved => "Approved",
            LoanOutcome::Rejected => "Rejected",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            LoanOutcome::Approved => APPROVED_HEADLINE,
            LoanOutcome::Rejected => REJECTED_HEADLINE,
        }
    }
}

/// Outcome plus the probability mass (as a percentage) assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: LoanOutcome,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
}

impl Verdict {
    pub fn from_probabilities(probabilities: ClassProbabilities) -> Self {
        let label = probabilities.label();
        Self {
            outcome: LoanOutcome::from_label(label),
            confidence: probabilities.of(label) * 100.0,
            probabilities,
        }
    }

    pub fn confidence_line(&self) -> String {
        format!("Confidence: {:.2}%", self.confidence)
    }

    /// Headline and confidence line separated by a blank line.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.outcome.headline(), self.confidence_line())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Applies the artifact's scaler and classifier to ordered feature vectors.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    artifact: Arc<ModelArtifact>,
}

impl InferenceEngine {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self { artifact }
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Vectors ordered by the artifact's own schema always pass the order check; it guards
    /// vectors assembled elsewhere, such as from a separately declared name list.
    pub fn infer(&self, features: &OrderedFeatures) -> Result<Verdict, PredictionError> {
        self.artifact.schema().verify(&features.names)?;

        let scaled = self.artifact.scaler().transform(&features.values)?;
        let probabilities = self.artifact.classifier().predict_proba(&scaled)?;
        let verdict = Verdict::from_probabilities(probabilities);

        debug!(
            outcome = verdict.outcome.label(),
            p_non_default = probabilities.non_default(),
            p_default = probabilities.default_risk(),
            "loan verdict computed"
        );
        Ok(verdict)
    }
}
