use {
    crate::error::{ExerciseError, Result},
    base::Tensor,
    std::collections::HashMap,
};

/// Raw classifier output: the winning label and the full distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub probabilities: HashMap<String, f32>,
}

impl Classification {
    /// Pair `scores` with `labels` and pick the highest-scoring label.
    ///
    /// With `softmax` set, the scores are treated as logits and normalized
    /// first; otherwise they are used as probabilities unchanged. Ties go to
    /// the earliest label.
    ///
    /// # Errors
    /// `ExerciseError::Classification` on a label/score count mismatch or on
    /// scores that do not form a finite distribution.
    pub fn from_scores(labels: &[String], scores: &[f32], softmax: bool) -> Result<Self> {
        if labels.is_empty() {
            return Err(ExerciseError::Classification(
                "classifier has no labels".to_string(),
            ));
        }
        if labels.len() != scores.len() {
            return Err(ExerciseError::Classification(format!(
                "expected {} scores, got {}",
                labels.len(),
                scores.len()
            )));
        }

        if let Some(index) = scores.iter().position(|s| !s.is_finite()) {
            return Err(ExerciseError::Classification(format!(
                "score {} for {} is not finite",
                scores[index], labels[index]
            )));
        }

        let probabilities: Vec<f32> = if softmax {
            let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let exp: Vec<f32> = scores.iter().map(|&s| (s - max).exp()).collect();
            let sum: f32 = exp.iter().sum();
            if !sum.is_finite() || sum <= 0.0 {
                return Err(ExerciseError::Classification(format!(
                    "softmax normalizer is {}",
                    sum
                )));
            }
            exp.iter().map(|&e| e / sum).collect()
        } else {
            scores.to_vec()
        };

        let mut best = 0;
        for (index, &p) in probabilities.iter().enumerate() {
            if p > probabilities[best] {
                best = index;
            }
        }

        Ok(Self {
            label: labels[best].clone(),
            probabilities: labels.iter().cloned().zip(probabilities).collect(),
        })
    }

    /// Probability of the winning label, 0 if the distribution lacks it.
    pub fn confidence(&self) -> f32 {
        self.probabilities.get(&self.label).copied().unwrap_or(0.0)
    }
}

/// Scores an assembled pose window.
pub trait Classifier {
    fn classify(&mut self, input: &Tensor<f32>) -> Result<Classification>;
}

impl<F> Classifier for F
where
    F: FnMut(&Tensor<f32>) -> Result<Classification>,
{
    fn classify(&mut self, input: &Tensor<f32>) -> Result<Classification> {
        self(input)
    }
}

/// What a `Predictor` reports: the recognized exercise and its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl From<&Classification> for Prediction {
    fn from(classification: &Classification) -> Self {
        Self {
            label: classification.label.clone(),
            confidence: classification.confidence(),
        }
    }
}
