use super::common::*;
use crate::scoring::domain::{
    DomainError, Education, Gender, HomeOwnership, LoanIntent, PreviousDefaults, RawApplication,
};
use crate::scoring::encoding::{intent_from_indicators, intent_indicators, CategoricalCode};
use crate::scoring::features::{encode_application, FeatureName};

fn assert_round_trip<T>(values: &[T])
where
    T: CategoricalCode + PartialEq + std::fmt::Debug,
{
    for value in values {
        assert_eq!(T::from_code(value.code()), Some(*value));
    }
}

#[test]
fn ordinal_codes_round_trip() {
    assert_round_trip(&Gender::ALL);
    assert_round_trip(&Education::ALL);
    assert_round_trip(&HomeOwnership::ALL);
    assert_round_trip(&PreviousDefaults::ALL);
}

#[test]
fn ordinal_codes_are_distinct_and_dense() {
    let mut codes: Vec<u8> = HomeOwnership::ALL.iter().map(|value| value.code()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec![0, 1, 2, 3]);

    let mut codes: Vec<u8> = Education::ALL.iter().map(|value| value.code()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec![0, 1, 2, 3]);
}

#[test]
fn intent_indicators_round_trip() {
    for intent in LoanIntent::ALL {
        let indicators = intent_indicators(intent);
        assert_eq!(indicators.iter().map(|flag| u32::from(*flag)).sum::<u32>(), 1);
        assert_eq!(intent_from_indicators(&indicators), Some(intent));
    }
}

#[test]
fn encoded_vector_sets_exactly_one_intent_column() {
    for intent in LoanIntent::ALL {
        let application = RawApplication {
            loan_intent: intent,
            ..application()
        };
        let encoded = encode_application(&application);
        for column in FeatureName::INTENT_INDICATORS {
            let expected = if column == FeatureName::for_intent(intent) {
                1.0
            } else {
                0.0
            };
            assert_eq!(encoded.get(column), expected, "{column} for {intent}");
        }
    }
}

#[test]
fn labels_parse_back_to_their_variants() {
    for value in Education::ALL {
        assert_eq!(value.label().parse::<Education>(), Ok(value));
    }
    for value in LoanIntent::ALL {
        assert_eq!(value.label().parse::<LoanIntent>(), Ok(value));
    }
    assert_eq!("HighSchool".parse::<Education>(), Ok(Education::HighSchool));
    assert_eq!(" MORTGAGE ".parse::<HomeOwnership>(), Ok(HomeOwnership::Mortgage));
}

#[test]
fn unknown_labels_are_domain_errors() {
    assert_eq!(
        "PhD".parse::<Education>(),
        Err(DomainError::UnknownCategory {
            field: "education",
            value: "PhD".to_string(),
        })
    );
    assert!("Male".parse::<Gender>().is_err());
    assert!("maybe".parse::<PreviousDefaults>().is_err());
}
