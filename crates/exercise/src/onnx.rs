use {
    crate::{
        classifier::{Classification, Classifier},
        error::{ExerciseError, Result},
    },
    base::Tensor,
    ndarray::ArrayD,
    ort::{inputs, session::Session, value::TensorRef},
    serde::{Deserialize, Serialize},
    std::{
        fmt,
        path::{Path, PathBuf},
    },
};

fn default_input_name() -> String {
    "poses".to_string()
}

fn default_output_name() -> String {
    "labelProbabilities".to_string()
}

/// Description of an exported action classifier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    #[serde(default = "default_input_name")]
    pub input_name: String,
    #[serde(default = "default_output_name")]
    pub output_name: String,
    /// Class names in model output order
    pub labels: Vec<String>,
    /// Whether the output holds logits that still need a softmax
    #[serde(default)]
    pub softmax: bool,
}

impl ModelConfig {
    pub fn new(model_path: impl Into<PathBuf>, labels: Vec<String>) -> Self {
        Self {
            model_path: model_path.into(),
            input_name: default_input_name(),
            output_name: default_output_name(),
            labels,
            softmax: false,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        if config.labels.is_empty() {
            return Err(ExerciseError::Config("model has no labels".to_string()));
        }
        Ok(config)
    }
}

/// `Classifier` backed by an ONNX Runtime session.
///
/// The model takes one `[frames, 3, keypoints]` f32 input and produces one
/// score per label.
pub struct OnnxClassifier {
    session: Session,
    config: ModelConfig,
}

impl fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("config", &self.config)
            .finish()
    }
}

impl OnnxClassifier {
    pub fn new(config: ModelConfig) -> Result<Self> {
        if config.labels.is_empty() {
            return Err(ExerciseError::Config("model has no labels".to_string()));
        }

        let session = Session::builder()
            .map_err(|e| {
                ExerciseError::Config(format!("failed to create session builder: {}", e))
            })?
            .commit_from_file(&config.model_path)
            .map_err(|e| {
                ExerciseError::Config(format!(
                    "failed to load model {}: {}",
                    config.model_path.display(),
                    e
                ))
            })?;

        base::log_info!(
            "loaded action classifier {} ({} labels)",
            config.model_path.display(),
            config.labels.len()
        );

        Ok(Self { session, config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn scores(&mut self, input: &Tensor<f32>) -> Result<Vec<f32>> {
        let array = ArrayD::from_shape_vec(input.shape.clone(), input.data.clone()).map_err(|e| {
            ExerciseError::Classification(format!("failed to create ndarray from tensor: {}", e))
        })?;
        let tensor_ref = TensorRef::from_array_view(array.view()).map_err(|e| {
            ExerciseError::Classification(format!("failed to create tensor ref: {}", e))
        })?;

        let outputs = self
            .session
            .run(inputs![self.config.input_name.as_str() => tensor_ref])
            .map_err(|e| ExerciseError::Classification(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(self.config.output_name.as_str())
            .ok_or_else(|| {
                ExerciseError::Classification(format!(
                    "model has no output named {}",
                    self.config.output_name
                ))
            })?;
        let scores = output.try_extract_array::<f32>().map_err(|e| {
            ExerciseError::Classification(format!(
                "output '{}' is not f32: {}",
                self.config.output_name, e
            ))
        })?;

        Ok(scores.iter().copied().collect())
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&mut self, input: &Tensor<f32>) -> Result<Classification> {
        let scores = self.scores(input)?;
        Classification::from_scores(&self.config.labels, &scores, self.config.softmax)
    }
}
