use {base::TensorError, std::fmt};

#[derive(Debug)]
pub enum ExerciseError {
    /// The pose source could not process a frame.
    PoseExtraction(String),
    /// The classifier failed on an assembled window.
    Classification(String),
    /// A buffered observation could not be laid out as a `[1, 3, K]` frame.
    MalformedFrame { index: usize, reason: String },
    Tensor(TensorError),
    Config(String),
    Io(String),
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ExerciseError>;

impl fmt::Display for ExerciseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseError::PoseExtraction(msg) => write!(f, "pose extraction error: {msg}"),
            ExerciseError::Classification(msg) => write!(f, "classification error: {msg}"),
            ExerciseError::MalformedFrame { index, reason } => {
                write!(f, "malformed frame {index}: {reason}")
            }
            ExerciseError::Tensor(err) => write!(f, "tensor error: {err}"),
            ExerciseError::Config(msg) => write!(f, "config error: {msg}"),
            ExerciseError::Io(msg) => write!(f, "io error: {msg}"),
            ExerciseError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ExerciseError {}

impl From<std::io::Error> for ExerciseError {
    fn from(err: std::io::Error) -> Self {
        ExerciseError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExerciseError {
    fn from(err: serde_json::Error) -> Self {
        ExerciseError::Parse(err.to_string())
    }
}

impl From<TensorError> for ExerciseError {
    fn from(err: TensorError) -> Self {
        ExerciseError::Tensor(err)
    }
}
