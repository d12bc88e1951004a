use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{LoanIntent, RawApplication};
use super::encoding::{intent_indicators, CategoricalCode};

/// Every column the encoder produces, in canonical (training-time) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    PersonAge,
    PersonGender,
    PersonEducation,
    PersonIncome,
    PersonEmpExp,
    PersonHomeOwnership,
    LoanAmnt,
    LoanIntRate,
    LoanPercentIncome,
    CbPersonCredHistLength,
    CreditScore,
    PreviousLoanDefaultsOnFile,
    #[serde(rename = "loan_intent_EDUCATION")]
    LoanIntentEducation,
    #[serde(rename = "loan_intent_HOMEIMPROVEMENT")]
    LoanIntentHomeImprovement,
    #[serde(rename = "loan_intent_MEDICAL")]
    LoanIntentMedical,
    #[serde(rename = "loan_intent_PERSONAL")]
    LoanIntentPersonal,
    #[serde(rename = "loan_intent_VENTURE")]
    LoanIntentVenture,
}

pub const FEATURE_COUNT: usize = 17;

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::PersonAge,
        FeatureName::PersonGender,
        FeatureName::PersonEducation,
        FeatureName::PersonIncome,
        FeatureName::PersonEmpExp,
        FeatureName::PersonHomeOwnership,
        FeatureName::LoanAmnt,
        FeatureName::LoanIntRate,
        FeatureName::LoanPercentIncome,
        FeatureName::CbPersonCredHistLength,
        FeatureName::CreditScore,
        FeatureName::PreviousLoanDefaultsOnFile,
        FeatureName::LoanIntentEducation,
        FeatureName::LoanIntentHomeImprovement,
        FeatureName::LoanIntentMedical,
        FeatureName::LoanIntentPersonal,
        FeatureName::LoanIntentVenture,
    ];

    pub const INTENT_INDICATORS: [FeatureName; 5] = [
        FeatureName::LoanIntentEducation,
        FeatureName::LoanIntentHomeImprovement,
        FeatureName::LoanIntentMedical,
        FeatureName::LoanIntentPersonal,
        FeatureName::LoanIntentVenture,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FeatureName::PersonAge => "person_age",
            FeatureName::PersonGender => "person_gender",
            FeatureName::PersonEducation => "person_education",
            FeatureName::PersonIncome => "person_income",
            FeatureName::PersonEmpExp => "person_emp_exp",
            FeatureName::PersonHomeOwnership => "person_home_ownership",
            FeatureName::LoanAmnt => "loan_amnt",
            FeatureName::LoanIntRate => "loan_int_rate",
            FeatureName::LoanPercentIncome => "loan_percent_income",
            FeatureName::CbPersonCredHistLength => "cb_person_cred_hist_length",
            FeatureName::CreditScore => "credit_score",
            FeatureName::PreviousLoanDefaultsOnFile => "previous_loan_defaults_on_file",
            FeatureName::LoanIntentEducation => "loan_intent_EDUCATION",
            FeatureName::LoanIntentHomeImprovement => "loan_intent_HOMEIMPROVEMENT",
            FeatureName::LoanIntentMedical => "loan_intent_MEDICAL",
            FeatureName::LoanIntentPersonal => "loan_intent_PERSONAL",
            FeatureName::LoanIntentVenture => "loan_intent_VENTURE",
        }
    }

    /// One-hot column carrying the given loan intent.
    pub const fn for_intent(intent: LoanIntent) -> Self {
        match intent {
            LoanIntent::Education => FeatureName::LoanIntentEducation,
            LoanIntent::HomeImprovement => FeatureName::LoanIntentHomeImprovement,
            LoanIntent::Medical => FeatureName::LoanIntentMedical,
            LoanIntent::Personal => FeatureName::LoanIntentPersonal,
            LoanIntent::Venture => FeatureName::LoanIntentVenture,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .into_iter()
            .find(|name| name.as_str() == raw)
            .ok_or_else(|| raw.to_string())
    }
}

/// Name-keyed record holding exactly one value for each of the 17 features.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl EncodedFeatureVector {
    pub fn get(&self, name: FeatureName) -> f64 {
        self.values[name.slot()]
    }

    /// Feature/value pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL
            .into_iter()
            .map(move |name| (name, self.values[name.slot()]))
    }

    /// Project the record into the column order of `schema`.
    pub fn ordered(&self, schema: &FeatureSchema) -> OrderedFeatures {
        OrderedFeatures {
            names: schema.order.clone(),
            values: schema.order.iter().map(|name| self.get(*name)).collect(),
        }
    }
}

/// Feature values laid out in an artifact's declared column order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedFeatures {
    pub names: Vec<FeatureName>,
    pub values: Vec<f64>,
}

/// Validated permutation of the encoder's features as declared by an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    order: Vec<FeatureName>,
}

impl FeatureSchema {
    /// Resolve declared names against the encoder's feature set.
    ///
    /// The declared list must contain every encoder feature exactly once and nothing else;
    /// any difference is reported in full rather than coerced.
    pub fn resolve<S: AsRef<str>>(declared: &[S]) -> Result<Self, SchemaMismatch> {
        let mut order = Vec::with_capacity(declared.len());
        let mut seen = BTreeSet::new();
        let mut unexpected = Vec::new();
        let mut duplicated = Vec::new();

        for raw in declared {
            match raw.as_ref().parse::<FeatureName>() {
                Ok(name) => {
                    if seen.insert(name) {
                        order.push(name);
                    } else {
                        duplicated.push(name.as_str().to_string());
                    }
                }
                Err(unknown) => unexpected.push(unknown),
            }
        }

        let missing: Vec<String> = FeatureName::ALL
            .into_iter()
            .filter(|name| !seen.contains(name))
            .map(|name| name.as_str().to_string())
            .collect();

        if missing.is_empty() && unexpected.is_empty() && duplicated.is_empty() {
            Ok(Self { order })
        } else {
            Err(SchemaMismatch {
                missing,
                unexpected,
                duplicated,
                out_of_order: Vec::new(),
            })
        }
    }

    /// Confirm an already ordered vector lines up slot-for-slot with this schema.
    pub fn verify(&self, names: &[FeatureName]) -> Result<(), SchemaMismatch> {
        if names == self.order.as_slice() {
            return Ok(());
        }

        let mut seen = BTreeSet::new();
        let duplicated = names
            .iter()
            .filter(|name| !seen.insert(**name))
            .map(|name| name.as_str().to_string())
            .collect();
        let missing = self
            .order
            .iter()
            .filter(|name| !seen.contains(*name))
            .map(|name| name.as_str().to_string())
            .collect();
        let out_of_order = names
            .iter()
            .zip(&self.order)
            .filter(|(found, expected)| found != expected)
            .map(|(found, _)| found.as_str().to_string())
            .collect();

        Err(SchemaMismatch {
            missing,
            unexpected: Vec::new(),
            duplicated,
            out_of_order,
        })
    }

    pub fn canonical() -> Self {
        Self {
            order: FeatureName::ALL.to_vec(),
        }
    }

    pub fn names(&self) -> &[FeatureName] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Declared artifact columns disagree with the features the encoder produces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "feature schema mismatch (missing: {missing:?}, unexpected: {unexpected:?}, duplicated: {duplicated:?}, out of order: {out_of_order:?})"
)]
pub struct SchemaMismatch {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
    pub duplicated: Vec<String>,
    pub out_of_order: Vec<String>,
}

/// Encode every field of an application into its named feature slot.
pub fn encode_application(application: &RawApplication) -> EncodedFeatureVector {
    let mut values = [0.0; FEATURE_COUNT];
    let mut set = |name: FeatureName, value: f64| values[name.slot()] = value;

    set(FeatureName::PersonAge, f64::from(application.age));
    set(FeatureName::PersonGender, f64::from(application.gender.code()));
    set(
        FeatureName::PersonEducation,
        f64::from(application.education.code()),
    );
    set(FeatureName::PersonIncome, application.income);
    set(
        FeatureName::PersonEmpExp,
        f64::from(application.employment_experience),
    );
    set(
        FeatureName::PersonHomeOwnership,
        f64::from(application.home_ownership.code()),
    );
    set(FeatureName::LoanAmnt, application.loan_amount);
    set(FeatureName::LoanIntRate, application.interest_rate);
    set(FeatureName::LoanPercentIncome, application.loan_percent_income);
    set(
        FeatureName::CbPersonCredHistLength,
        f64::from(application.credit_history_length),
    );
    set(FeatureName::CreditScore, f64::from(application.credit_score));
    set(
        FeatureName::PreviousLoanDefaultsOnFile,
        f64::from(application.previous_defaults.code()),
    );

    let indicators = intent_indicators(application.loan_intent);
    for (name, flag) in FeatureName::INTENT_INDICATORS.into_iter().zip(indicators) {
        set(name, f64::from(flag));
    }

    EncodedFeatureVector { values }
}

/// Encode an application and lay it out in the order an artifact declares.
pub fn assemble<S: AsRef<str>>(
    application: &RawApplication,
    declared: &[S],
) -> Result<OrderedFeatures, SchemaMismatch> {
    let schema = FeatureSchema::resolve(declared)?;
    Ok(encode_application(application).ordered(&schema))
}
