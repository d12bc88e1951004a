use super::common::*;
use crate::scoring::domain::{ApplicationForm, DomainError, Education, Gender, HomeOwnership};
use crate::scoring::features::{
    assemble, encode_application, FeatureName, FeatureSchema, SchemaMismatch, FEATURE_COUNT,
};
use std::collections::BTreeSet;

#[test]
fn encodes_every_feature_once() {
    let encoded = encode_application(&application());
    let names: Vec<FeatureName> = encoded.iter().map(|(name, _)| name).collect();
    assert_eq!(names.len(), FEATURE_COUNT);
    assert_eq!(names.iter().collect::<BTreeSet<_>>().len(), FEATURE_COUNT);

    assert_eq!(encoded.get(FeatureName::PersonAge), 30.0);
    assert_eq!(encoded.get(FeatureName::PersonGender), 1.0);
    assert_eq!(encoded.get(FeatureName::PersonEducation), 2.0);
    assert_eq!(encoded.get(FeatureName::PersonIncome), 50_000.0);
    assert_eq!(encoded.get(FeatureName::PersonEmpExp), 5.0);
    assert_eq!(encoded.get(FeatureName::PersonHomeOwnership), 0.0);
    assert_eq!(encoded.get(FeatureName::LoanAmnt), 10_000.0);
    assert_eq!(encoded.get(FeatureName::LoanIntRate), 10.0);
    assert_eq!(encoded.get(FeatureName::LoanPercentIncome), 0.3);
    assert_eq!(encoded.get(FeatureName::CbPersonCredHistLength), 5.0);
    assert_eq!(encoded.get(FeatureName::CreditScore), 650.0);
    assert_eq!(encoded.get(FeatureName::PreviousLoanDefaultsOnFile), 0.0);
    assert_eq!(encoded.get(FeatureName::LoanIntentPersonal), 1.0);
}

#[test]
fn assembled_keys_match_declared_schema() {
    let ordered = assemble(&application(), &canonical_names()).expect("schema matches");
    let declared: Vec<String> = ordered
        .names
        .iter()
        .map(|name| name.as_str().to_string())
        .collect();
    assert_eq!(declared, canonical_names());
    assert_eq!(ordered.values.len(), FEATURE_COUNT);
}

#[test]
fn assembly_follows_declared_order() {
    let mut reversed = canonical_names();
    reversed.reverse();
    let ordered = assemble(&application(), &reversed).expect("permutation accepted");
    assert_eq!(ordered.names.first(), Some(&FeatureName::LoanIntentVenture));
    assert_eq!(ordered.names.last(), Some(&FeatureName::PersonAge));
    assert_eq!(ordered.values.last(), Some(&30.0));
    assert_eq!(ordered.values[FEATURE_COUNT - 1 - 10], 650.0);
}

#[test]
fn missing_credit_score_is_a_schema_mismatch() {
    let declared: Vec<String> = canonical_names()
        .into_iter()
        .filter(|name| name != "credit_score")
        .collect();
    assert_eq!(
        assemble(&application(), &declared),
        Err(SchemaMismatch {
            missing: vec!["credit_score".to_string()],
            unexpected: Vec::new(),
            duplicated: Vec::new(),
            out_of_order: Vec::new(),
        })
    );
}

#[test]
fn renamed_and_duplicated_columns_are_reported() {
    let mut declared = canonical_names();
    declared[0] = "age".to_string();
    declared.push("credit_score".to_string());
    let err = FeatureSchema::resolve(&declared).expect_err("schema rejected");
    assert_eq!(err.missing, vec!["person_age".to_string()]);
    assert_eq!(err.unexpected, vec!["age".to_string()]);
    assert_eq!(err.duplicated, vec!["credit_score".to_string()]);
}

#[test]
fn verify_flags_positional_skew() {
    let schema = FeatureSchema::canonical();
    assert!(schema.verify(&FeatureName::ALL).is_ok());

    let mut swapped = FeatureName::ALL.to_vec();
    swapped.swap(0, 1);
    let err = schema.verify(&swapped).expect_err("swap detected");
    assert_eq!(
        err.out_of_order,
        vec!["person_gender".to_string(), "person_age".to_string()]
    );
    assert!(err.missing.is_empty());

    let err = schema
        .verify(&FeatureName::ALL[..16])
        .expect_err("short vector detected");
    assert_eq!(err.missing, vec!["loan_intent_VENTURE".to_string()]);
}

#[test]
fn form_parses_into_typed_application() {
    let mut form = form();
    form.education = "High School".to_string();
    let application = form.to_application().expect("valid form");
    assert_eq!(application.education, Education::HighSchool);
    assert_eq!(application.gender, Gender::Male);
    assert_eq!(application.home_ownership, HomeOwnership::Rent);
    assert_eq!(application.credit_score, 650);
}

#[test]
fn form_enforces_intake_ranges() {
    let cases: Vec<(ApplicationForm, DomainError)> = vec![
        (
            ApplicationForm { age: 17.0, ..form() },
            DomainError::OutOfRange {
                field: "age",
                value: 17.0,
                min: 18.0,
                max: 100.0,
            },
        ),
        (
            ApplicationForm {
                credit_score: 650.5,
                ..form()
            },
            DomainError::NotWholeNumber {
                field: "credit_score",
                value: 650.5,
            },
        ),
        (
            ApplicationForm {
                income: f64::NAN,
                ..form()
            },
            DomainError::NotFinite { field: "income" },
        ),
        (
            ApplicationForm {
                loan_percent_income: 1.5,
                ..form()
            },
            DomainError::OutOfRange {
                field: "loan_percent_income",
                value: 1.5,
                min: 0.0,
                max: 1.0,
            },
        ),
    ];

    for (form, expected) in cases {
        assert_eq!(form.to_application(), Err(expected));
    }
}
