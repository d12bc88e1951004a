use super::common::*;
use crate::scoring::domain::{ApplicationForm, LoanIntent, RawApplication};
use crate::scoring::service::PredictionError;
use std::sync::Arc;

#[test]
fn predict_returns_verdict_text() {
    let service = service(scaled_bundle());
    let text = service.predict(&application());

    assert!(text.contains("Approved") || text.contains("Rejected"));
    let confidence = confidence_of(&text);
    assert!((0.0..=100.0).contains(&confidence));
}

#[test]
fn predictions_are_deterministic() {
    let service = service(scaled_bundle());
    let first = service.predict(&application());
    for _ in 0..10 {
        assert_eq!(service.predict(&application()), first);
    }
}

#[test]
fn form_and_typed_paths_agree() {
    let service = service(scaled_bundle());
    assert_eq!(service.predict_form(&form()), service.predict(&application()));
}

#[test]
fn unknown_education_yields_error_text() {
    let service = service(scaled_bundle());
    let form = ApplicationForm {
        education: "PhD".to_string(),
        ..form()
    };

    let text = service.predict_form(&form);
    assert_eq!(text, "❌ Error: unknown education value 'PhD'");

    match service.assess_form(&form) {
        Err(err @ PredictionError::Domain(_)) => {
            assert_eq!(err.kind(), "domain");
            assert!(err.is_input_error());
        }
        other => panic!("expected domain error, got {other:?}"),
    }
}

#[test]
fn non_finite_typed_input_yields_error_text() {
    let service = service(scaled_bundle());
    let application = RawApplication {
        loan_percent_income: f64::NAN,
        ..application()
    };

    let text = service.predict(&application);
    assert!(text.starts_with("❌ Error: "), "{text}");
    assert!(text.contains("not a finite number"));
}

#[test]
fn every_intent_produces_a_verdict() {
    let service = service(forest_bundle());
    for intent in LoanIntent::ALL {
        let application = RawApplication {
            loan_intent: intent,
            ..application()
        };
        let verdict = service.assess(&application).expect("verdict for intent");
        assert!((0.0..=100.0).contains(&verdict.confidence));
    }
}

#[test]
fn parallel_requests_share_one_artifact() {
    let service = service(scaled_bundle());
    let expected = service.predict(&application());
    let shared = Arc::new(service);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&shared);
                scope.spawn(move || service.predict(&application()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("worker completes"), expected);
        }
    });
}

#[test]
fn cloned_services_reuse_the_loaded_artifact() {
    let service = service(scaled_bundle());
    let clone = service.clone();

    assert!(std::ptr::eq(service.artifact(), clone.artifact()));
    assert_eq!(clone.predict(&application()), service.predict(&application()));
}
