use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Applicant-provided snapshot after categorical parsing, ready for encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawApplication {
    pub age: u8,
    pub gender: Gender,
    pub education: Education,
    pub income: f64,
    pub employment_experience: u8,
    pub home_ownership: HomeOwnership,
    pub loan_amount: f64,
    pub loan_intent: LoanIntent,
    pub interest_rate: f64,
    pub loan_percent_income: f64,
    pub credit_history_length: u8,
    pub credit_score: u16,
    pub previous_defaults: PreviousDefaults,
}

/// Gender as captured on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "female")]
    Female,
    #[serde(rename = "male")]
    Male,
}

/// Highest completed education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "High School", alias = "HighSchool")]
    HighSchool,
    Associate,
    Bachelor,
    Master,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeOwnership {
    Rent,
    Own,
    Mortgage,
    Other,
}

/// Declared purpose of the requested loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanIntent {
    Education,
    HomeImprovement,
    Medical,
    Personal,
    Venture,
}

/// Whether a previous loan default is on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreviousDefaults {
    Yes,
    No,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

impl Education {
    pub const ALL: [Education; 4] = [
        Education::HighSchool,
        Education::Associate,
        Education::Bachelor,
        Education::Master,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Associate => "Associate",
            Education::Bachelor => "Bachelor",
            Education::Master => "Master",
        }
    }
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 4] = [
        HomeOwnership::Rent,
        HomeOwnership::Own,
        HomeOwnership::Mortgage,
        HomeOwnership::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            HomeOwnership::Rent => "RENT",
            HomeOwnership::Own => "OWN",
            HomeOwnership::Mortgage => "MORTGAGE",
            HomeOwnership::Other => "OTHER",
        }
    }
}

impl LoanIntent {
    pub const ALL: [LoanIntent; 5] = [
        LoanIntent::Education,
        LoanIntent::HomeImprovement,
        LoanIntent::Medical,
        LoanIntent::Personal,
        LoanIntent::Venture,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanIntent::Education => "EDUCATION",
            LoanIntent::HomeImprovement => "HOMEIMPROVEMENT",
            LoanIntent::Medical => "MEDICAL",
            LoanIntent::Personal => "PERSONAL",
            LoanIntent::Venture => "VENTURE",
        }
    }
}

impl PreviousDefaults {
    pub const ALL: [PreviousDefaults; 2] = [PreviousDefaults::Yes, PreviousDefaults::No];

    pub const fn label(self) -> &'static str {
        match self {
            PreviousDefaults::Yes => "Yes",
            PreviousDefaults::No => "No",
        }
    }
}

macro_rules! labelled_category {
    ($ty:ident, $field:literal, [$($alias:literal => $variant:ident),* $(,)?]) => {
        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let trimmed = raw.trim();
                if let Some(value) = Self::ALL.into_iter().find(|value| value.label() == trimmed) {
                    return Ok(value);
                }
                match trimmed {
                    $($alias => Ok($ty::$variant),)*
                    _ => Err(DomainError::UnknownCategory {
                        field: $field,
                        value: raw.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_category!(Gender, "gender", []);
labelled_category!(Education, "education", ["HighSchool" => HighSchool]);
labelled_category!(HomeOwnership, "home_ownership", []);
labelled_category!(LoanIntent, "loan_intent", []);
labelled_category!(PreviousDefaults, "previous_defaults", []);

/// Raw field values exactly as the intake form submits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub age: f64,
    pub gender: String,
    pub education: String,
    pub income: f64,
    pub employment_experience: f64,
    pub home_ownership: String,
    pub loan_amount: f64,
    pub loan_intent: String,
    pub interest_rate: f64,
    pub loan_percent_income: f64,
    pub credit_history_length: f64,
    pub credit_score: f64,
    pub previous_defaults: String,
}

impl ApplicationForm {
    /// Parse categoricals and enforce the intake ranges, producing a typed application.
    pub fn to_application(&self) -> Result<RawApplication, DomainError> {
        Ok(RawApplication {
            age: whole_in_range("age", self.age, 18.0, 100.0)? as u8,
            gender: self.gender.parse()?,
            education: self.education.parse()?,
            income: ranged("income", self.income, 0.0, f64::INFINITY)?,
            employment_experience: whole_in_range(
                "employment_experience",
                self.employment_experience,
                0.0,
                50.0,
            )? as u8,
            home_ownership: self.home_ownership.parse()?,
            loan_amount: ranged("loan_amount", self.loan_amount, 500.0, 50_000.0)?,
            loan_intent: self.loan_intent.parse()?,
            interest_rate: ranged("interest_rate", self.interest_rate, 5.0, 25.0)?,
            loan_percent_income: ranged(
                "loan_percent_income",
                self.loan_percent_income,
                0.0,
                1.0,
            )?,
            credit_history_length: whole_in_range(
                "credit_history_length",
                self.credit_history_length,
                0.0,
                30.0,
            )? as u8,
            credit_score: whole_in_range("credit_score", self.credit_score, 300.0, 850.0)? as u16,
            previous_defaults: self.previous_defaults.parse()?,
        })
    }
}

impl From<&RawApplication> for ApplicationForm {
    fn from(application: &RawApplication) -> Self {
        Self {
            age: f64::from(application.age),
            gender: application.gender.label().to_string(),
            education: application.education.label().to_string(),
            income: application.income,
            employment_experience: f64::from(application.employment_experience),
            home_ownership: application.home_ownership.label().to_string(),
            loan_amount: application.loan_amount,
            loan_intent: application.loan_intent.label().to_string(),
            interest_rate: application.interest_rate,
            loan_percent_income: application.loan_percent_income,
            credit_history_length: f64::from(application.credit_history_length),
            credit_score: f64::from(application.credit_score),
            previous_defaults: application.previous_defaults.label().to_string(),
        }
    }
}

fn ranged(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(DomainError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

fn whole_in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, DomainError> {
    let value = ranged(field, value, min, max)?;
    if value.fract() != 0.0 {
        return Err(DomainError::NotWholeNumber { field, value });
    }
    Ok(value)
}

/// Intake value outside the declared domain of a field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("unknown {field} value '{value}'")]
    UnknownCategory { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max} (found {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a whole number (found {value})")]
    NotWholeNumber { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("malformed application: {detail}")]
    Malformed { detail: String },
}
