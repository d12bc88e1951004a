//! Persisted model bundle: fitted scaler, classifier, and the declared feature order.
//!
//! The bundle is a JSON document with `feature_names`, `scaler`, and `model` keys plus an
//! optional `metadata` block. Loading validates all three parts together; there is no
//! partially loaded artifact.

mod classifier;
mod scaler;

pub use classifier::{
    ClassProbabilities, Classifier, DecisionTree, InferenceError, TreeNode,
    PROBABILITY_TOLERANCE,
};
pub use scaler::{FittedScaler, TransformError};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::features::{FeatureName, FeatureSchema, SchemaMismatch};

/// Descriptive fields carried through from training.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_on: Option<String>,
}

/// On-disk shape of the bundle before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub feature_names: Option<Vec<String>>,
    pub scaler: Option<FittedScaler>,
    pub model: Option<Classifier>,
    #[serde(default)]
    pub metadata: ArtifactMetadata,
}

/// Validated, immutable model bundle shared by every prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    schema: FeatureSchema,
    scaler: FittedScaler,
    classifier: Classifier,
    metadata: ArtifactMetadata,
}

impl ModelArtifact {
    pub fn from_bundle(bundle: ArtifactBundle) -> Result<Self, ArtifactLoadError> {
        let feature_names = bundle
            .feature_names
            .ok_or(ArtifactLoadError::MissingPart("feature_names"))?;
        let scaler = bundle
            .scaler
            .ok_or(ArtifactLoadError::MissingPart("scaler"))?;
        let classifier = bundle
            .model
            .ok_or(ArtifactLoadError::MissingPart("model"))?;

        let schema = FeatureSchema::resolve(&feature_names)?;
        scaler
            .validate(schema.len())
            .map_err(ArtifactLoadError::InvalidScaler)?;
        classifier
            .validate(schema.len())
            .map_err(ArtifactLoadError::InvalidModel)?;

        Ok(Self {
            schema,
            scaler,
            classifier,
            metadata: bundle.metadata,
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactLoadError> {
        let bundle: ArtifactBundle =
            serde_json::from_reader(reader).map_err(ArtifactLoadError::Malformed)?;
        Self::from_bundle(bundle)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn feature_names(&self) -> &[FeatureName] {
        self.schema.names()
    }

    pub fn scaler(&self) -> &FittedScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }
}

/// Load and validate the bundle stored at `path`.
pub fn load_artifact(path: impl AsRef<Path>) -> Result<ModelArtifact, ArtifactLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactLoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let artifact = ModelArtifact::from_reader(BufReader::new(file))?;
    info!(
        path = %path.display(),
        features = artifact.schema.len(),
        scaler = artifact.scaler.kind(),
        classifier = artifact.classifier.kind(),
        version = artifact.metadata.version.as_deref().unwrap_or("unversioned"),
        "loan model artifact loaded"
    );
    Ok(artifact)
}

/// The bundle is absent, unreadable, or incompatible with the encoder.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    #[error("model artifact not found at {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("unable to read model artifact at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("model artifact is missing required part `{0}`")]
    MissingPart(&'static str),
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
    #[error("invalid scaler: {0}")]
    InvalidScaler(String),
    #[error("invalid model: {0}")]
    InvalidModel(String),
}
