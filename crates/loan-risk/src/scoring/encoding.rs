//! Fixed numeric codes the classifier was trained against.
//!
//! Each code table below must stay in lockstep with the model artifact; changing a code
//! without retraining silently shifts predictions.

use super::domain::{Education, Gender, HomeOwnership, LoanIntent, PreviousDefaults};

/// Ordinal encoding for a single-column categorical field.
pub trait CategoricalCode: Sized + Copy {
    fn code(self) -> u8;
    fn from_code(code: u8) -> Option<Self>;
}

impl CategoricalCode for Gender {
    fn code(self) -> u8 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Gender::Female),
            1 => Some(Gender::Male),
            _ => None,
        }
    }
}

impl CategoricalCode for Education {
    fn code(self) -> u8 {
        match self {
            Education::HighSchool => 0,
            Education::Associate => 1,
            Education::Bachelor => 2,
            Education::Master => 3,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Education::HighSchool),
            1 => Some(Education::Associate),
            2 => Some(Education::Bachelor),
            3 => Some(Education::Master),
            _ => None,
        }
    }
}

impl CategoricalCode for HomeOwnership {
    fn code(self) -> u8 {
        match self {
            HomeOwnership::Rent => 0,
            HomeOwnership::Own => 1,
            HomeOwnership::Mortgage => 2,
            HomeOwnership::Other => 3,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(HomeOwnership::Rent),
            1 => Some(HomeOwnership::Own),
            2 => Some(HomeOwnership::Mortgage),
            3 => Some(HomeOwnership::Other),
            _ => None,
        }
    }
}

impl CategoricalCode for PreviousDefaults {
    fn code(self) -> u8 {
        match self {
            PreviousDefaults::No => 0,
            PreviousDefaults::Yes => 1,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PreviousDefaults::No),
            1 => Some(PreviousDefaults::Yes),
            _ => None,
        }
    }
}

/// One 0/1 indicator per loan intent, in `LoanIntent::ALL` order.
pub type IntentIndicators = [u8; 5];

/// Expand a loan intent into its five one-hot indicator columns.
pub fn intent_indicators(intent: LoanIntent) -> IntentIndicators {
    let hot = match intent {
        LoanIntent::Education => 0,
        LoanIntent::HomeImprovement => 1,
        LoanIntent::Medical => 2,
        LoanIntent::Personal => 3,
        LoanIntent::Venture => 4,
    };
    let mut indicators = [0; 5];
    indicators[hot] = 1;
    indicators
}

/// Recover the intent from its indicators; `None` unless exactly one column is hot.
pub fn intent_from_indicators(indicators: &IntentIndicators) -> Option<LoanIntent> {
    let mut hot = indicators
        .iter()
        .zip(LoanIntent::ALL)
        .filter(|(flag, _)| **flag == 1)
        .map(|(_, intent)| intent);
    let intent = hot.next()?;
    let all_binary = indicators.iter().all(|flag| *flag <= 1);
    (hot.next().is_none() && all_binary).then_some(intent)
}
