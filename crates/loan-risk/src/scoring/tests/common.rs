use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::scoring::artifact::{
    ArtifactBundle, ArtifactMetadata, Classifier, DecisionTree, FittedScaler, ModelArtifact,
    TreeNode,
};
use crate::scoring::domain::{
    ApplicationForm, Education, Gender, HomeOwnership, LoanIntent, PreviousDefaults,
    RawApplication,
};
use crate::scoring::features::{FeatureName, FEATURE_COUNT};
use crate::scoring::service::LoanRiskService;

pub(super) fn application() -> RawApplication {
    RawApplication {
        age: 30,
        gender: Gender::Male,
        education: Education::Bachelor,
        income: 50_000.0,
        employment_experience: 5,
        home_ownership: HomeOwnership::Rent,
        loan_amount: 10_000.0,
        loan_intent: LoanIntent::Personal,
        interest_rate: 10.0,
        loan_percent_income: 0.3,
        credit_history_length: 5,
        credit_score: 650,
        previous_defaults: PreviousDefaults::No,
    }
}

pub(super) fn defaulted_application() -> RawApplication {
    RawApplication {
        previous_defaults: PreviousDefaults::Yes,
        ..application()
    }
}

pub(super) fn form() -> ApplicationForm {
    ApplicationForm::from(&application())
}

pub(super) fn canonical_names() -> Vec<String> {
    FeatureName::ALL
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

fn slot(name: FeatureName) -> usize {
    FeatureName::ALL
        .iter()
        .position(|candidate| *candidate == name)
        .expect("feature is canonical")
}

/// Identity scaling with a single weight on previous defaults: P(default) is
/// sigmoid(-2) without a prior default and sigmoid(2) with one.
pub(super) fn defaults_only_bundle() -> ArtifactBundle {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[slot(FeatureName::PreviousLoanDefaultsOnFile)] = 4.0;

    ArtifactBundle {
        feature_names: Some(canonical_names()),
        scaler: Some(FittedScaler::Standard {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }),
        model: Some(Classifier::LogisticRegression {
            coefficients,
            intercept: -2.0,
        }),
        metadata: ArtifactMetadata {
            name: Some("defaults-only".to_string()),
            version: Some("test".to_string()),
            trained_on: None,
        },
    }
}

/// Realistic standard-scaled logistic regression over every feature.
pub(super) fn scaled_bundle() -> ArtifactBundle {
    ArtifactBundle {
        feature_names: Some(canonical_names()),
        scaler: Some(FittedScaler::Standard {
            mean: vec![
                27.76, 0.55, 1.49, 80_319.0, 5.41, 0.92, 9_583.0, 11.0, 0.14, 5.87, 632.6, 0.51,
                0.2, 0.11, 0.19, 0.17, 0.17,
            ],
            scale: vec![
                6.05, 0.5, 1.04, 80_421.0, 6.06, 0.95, 6_314.0, 2.98, 0.087, 3.88, 50.4, 0.5, 0.4,
                0.31, 0.39, 0.37, 0.38,
            ],
        }),
        model: Some(Classifier::LogisticRegression {
            coefficients: vec![
                -0.04, 0.01, -0.02, -0.39, 0.02, -0.34, -0.19, 0.85, 0.91, -0.04, -0.21, 1.88,
                0.09, -0.05, 0.06, 0.02, 0.15,
            ],
            intercept: -2.47,
        }),
        metadata: ArtifactMetadata::default(),
    }
}

/// Two stumps: one on credit score, one on previous defaults (identity scaling).
pub(super) fn forest_bundle() -> ArtifactBundle {
    let stump = |feature: FeatureName, threshold: f64, low: [f64; 2], high: [f64; 2]| {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: slot(feature),
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        }
    };

    ArtifactBundle {
        feature_names: Some(canonical_names()),
        scaler: Some(FittedScaler::Standard {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }),
        model: Some(Classifier::RandomForest {
            trees: vec![
                stump(FeatureName::CreditScore, 600.0, [20.0, 80.0], [90.0, 10.0]),
                stump(
                    FeatureName::PreviousLoanDefaultsOnFile,
                    0.5,
                    [70.0, 30.0],
                    [5.0, 95.0],
                ),
            ],
        }),
        metadata: ArtifactMetadata::default(),
    }
}

pub(super) fn artifact(bundle: ArtifactBundle) -> Arc<ModelArtifact> {
    Arc::new(ModelArtifact::from_bundle(bundle).expect("fixture bundle is valid"))
}

pub(super) fn service(bundle: ArtifactBundle) -> LoanRiskService {
    LoanRiskService::new(artifact(bundle))
}

pub(super) fn confidence_of(text: &str) -> f64 {
    text.rsplit("Confidence: ")
        .next()
        .and_then(|tail| tail.strip_suffix('%'))
        .and_then(|number| number.parse().ok())
        .expect("verdict carries a confidence percentage")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
