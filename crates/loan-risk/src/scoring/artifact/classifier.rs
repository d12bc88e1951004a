use serde::{Deserialize, Serialize};

/// Probability tolerance used when checking that a class distribution sums to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Binary default classifier operating on scaled feature vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

/// Flattened binary tree; node 0 is the root and children always follow their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Route to `left` when `x[feature] <= threshold`, otherwise to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class weights for (non-default, default).
    Leaf { value: [f64; 2] },
}

/// Class distribution returned by the classifier: index 0 is non-default, 1 is default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities(pub [f64; 2]);

impl ClassProbabilities {
    pub fn non_default(&self) -> f64 {
        self.0[0]
    }

    pub fn default_risk(&self) -> f64 {
        self.0[1]
    }

    /// Predicted class label; ties resolve to class 0.
    pub fn label(&self) -> u8 {
        if self.0[1] > self.0[0] {
            1
        } else {
            0
        }
    }

    pub fn of(&self, label: u8) -> f64 {
        self.0[usize::from(label.min(1))]
    }

    fn normalized(weights: [f64; 2]) -> Option<Self> {
        let total = weights[0] + weights[1];
        let valid = weights.iter().all(|weight| weight.is_finite() && *weight >= 0.0);
        (valid && total > 0.0).then(|| Self([weights[0] / total, weights[1] / total]))
    }
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Classifier::LogisticRegression { .. } => "logistic_regression",
            Classifier::RandomForest { .. } => "random_forest",
        }
    }

    /// Check the fitted parameters against the expected column count.
    pub(crate) fn validate(&self, columns: usize) -> Result<(), String> {
        match self {
            Classifier::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != columns {
                    return Err(format!(
                        "logistic regression has {} coefficients, expected {columns}",
                        coefficients.len()
                    ));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err("logistic regression has non-finite parameters".to_string());
                }
                Ok(())
            }
            Classifier::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err("random forest has no trees".to_string());
                }
                for (index, tree) in trees.iter().enumerate() {
                    tree.validate(columns)
                        .map_err(|detail| format!("tree {index}: {detail}"))?;
                }
                Ok(())
            }
        }
    }

    pub fn predict_proba(&self, scaled: &[f64]) -> Result<ClassProbabilities, InferenceError> {
        let probabilities = match self {
            Classifier::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if scaled.len() != coefficients.len() {
                    return Err(InferenceError::DimensionMismatch {
                        expected: coefficients.len(),
                        found: scaled.len(),
                    });
                }
                let margin = coefficients
                    .iter()
                    .zip(scaled)
                    .fold(*intercept, |acc, (weight, x)| acc + weight * x);
                let default = sigmoid(margin);
                ClassProbabilities([1.0 - default, default])
            }
            Classifier::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(InferenceError::EmptyEnsemble);
                }
                let mut sum = [0.0, 0.0];
                for (index, tree) in trees.iter().enumerate() {
                    let leaf = tree.leaf_for(scaled).map_err(|node| {
                        InferenceError::MalformedTree { tree: index, node }
                    })?;
                    let leaf = ClassProbabilities::normalized(leaf)
                        .ok_or(InferenceError::DegenerateProbabilities)?;
                    sum[0] += leaf.0[0];
                    sum[1] += leaf.0[1];
                }
                let count = trees.len() as f64;
                ClassProbabilities([sum[0] / count, sum[1] / count])
            }
        };

        let total = probabilities.0[0] + probabilities.0[1];
        let in_range = probabilities
            .0
            .iter()
            .all(|p| p.is_finite() && (0.0..=1.0).contains(p));
        if !in_range || (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(InferenceError::DegenerateProbabilities);
        }
        Ok(probabilities)
    }
}

impl DecisionTree {
    fn validate(&self, columns: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= columns {
                        return Err(format!("node {index} splits on unknown feature {feature}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if *child <= index || *child >= self.nodes.len() {
                            return Err(format!("node {index} points at invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if ClassProbabilities::normalized(*value).is_none() {
                        return Err(format!("node {index} has invalid class weights"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf; the error carries the offending node index.
    fn leaf_for(&self, scaled: &[f64]) -> Result<[f64; 2], usize> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = scaled.get(*feature).ok_or(index)?;
                    let next = if *x <= *threshold { *left } else { *right };
                    if next <= index {
                        return Err(index);
                    }
                    index = next;
                }
                None => return Err(index),
            }
        }
    }
}

fn sigmoid(margin: f64) -> f64 {
    if margin >= 0.0 {
        1.0 / (1.0 + (-margin).exp())
    } else {
        let exp = margin.exp();
        exp / (1.0 + exp)
    }
}

/// The classifier could not produce a usable class distribution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("classifier expects {expected} features, received {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("random forest contains no trees")]
    EmptyEnsemble,
    #[error("decision tree {tree} is malformed at node {node}")]
    MalformedTree { tree: usize, node: usize },
    #[error("classifier produced an invalid probability distribution")]
    DegenerateProbabilities,
}
