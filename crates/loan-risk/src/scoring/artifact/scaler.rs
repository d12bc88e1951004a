use serde::{Deserialize, Serialize};

/// Column-wise normalization fitted alongside the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedScaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FittedScaler {
    pub fn kind(&self) -> &'static str {
        match self {
            FittedScaler::Standard { .. } => "standard",
            FittedScaler::MinMax { .. } => "min_max",
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            FittedScaler::Standard { scale, .. } | FittedScaler::MinMax { scale, .. } => {
                scale.len()
            }
        }
    }

    /// Check fitted parameters against the expected column count.
    pub(crate) fn validate(&self, columns: usize) -> Result<(), String> {
        let (offsets, scale) = match self {
            FittedScaler::Standard { mean, scale } => (mean, scale),
            FittedScaler::MinMax { min, scale } => (min, scale),
        };

        if offsets.len() != columns || scale.len() != columns {
            return Err(format!(
                "{} scaler fitted on {}/{} columns, expected {columns}",
                self.kind(),
                offsets.len(),
                scale.len()
            ));
        }
        if let Some(column) = offsets.iter().position(|value| !value.is_finite()) {
            return Err(format!("non-finite offset in column {column}"));
        }
        if let Some(column) = scale
            .iter()
            .position(|value| !value.is_finite() || *value == 0.0)
        {
            return Err(format!("zero or non-finite scale in column {column}"));
        }
        Ok(())
    }

    pub fn transform(&self, input: &[f64]) -> Result<Vec<f64>, TransformError> {
        let expected = self.dimension();
        if input.len() != expected {
            return Err(TransformError::DimensionMismatch {
                expected,
                found: input.len(),
            });
        }
        if let Some(column) = input.iter().position(|value| !value.is_finite()) {
            return Err(TransformError::NonFiniteInput { column });
        }

        let scaled: Vec<f64> = match self {
            FittedScaler::Standard { mean, scale } => input
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (mean, scale))| (x - mean) / scale)
                .collect(),
            FittedScaler::MinMax { min, scale } => input
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (min, scale))| x * scale + min)
                .collect(),
        };

        match scaled.iter().position(|value| !value.is_finite()) {
            Some(column) => Err(TransformError::NonFiniteOutput { column }),
            None => Ok(scaled),
        }
    }
}

/// The fitted transform rejected the assembled vector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("scaler expects {expected} features, received {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("input feature at column {column} is not a finite number")]
    NonFiniteInput { column: usize },
    #[error("scaled value at column {column} is not a finite number")]
    NonFiniteOutput { column: usize },
}
