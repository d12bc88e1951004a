//! Loan default scoring: categorical encoding, feature assembly, and model inference.
//!
//! Applicant fields flow through [`features::encode_application`] into a name-keyed
//! vector, are ordered to the artifact's declared schema, scaled, and classified. The
//! artifact is loaded once and shared read-only by every request.

pub mod artifact;
pub mod domain;
pub mod encoding;
pub mod features;
pub mod inference;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use artifact::{
    load_artifact, ArtifactLoadError, ArtifactMetadata, ClassProbabilities, Classifier,
    FittedScaler, InferenceError, ModelArtifact, TransformError,
};
pub use domain::{
    ApplicationForm, DomainError, Education, Gender, HomeOwnership, LoanIntent,
    PreviousDefaults, RawApplication,
};
pub use encoding::CategoricalCode;
pub use features::{
    assemble, encode_application, EncodedFeatureVector, FeatureName, FeatureSchema,
    OrderedFeatures, SchemaMismatch,
};
pub use inference::{InferenceEngine, LoanOutcome, Verdict};
pub use router::loan_router;
pub use service::{LoanRiskService, PredictionError};
