use {
    crate::error::{ExerciseError, Result},
    serde::{Deserialize, Serialize},
    std::path::Path,
};

/// When the window evicts and when it reports ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Evict once the window holds more than `window_size` entries, report
    /// ready at exactly `window_size`. The window length oscillates between
    /// `window_size - eviction_batch_size + 1` and `window_size + 1`.
    #[default]
    Legacy,
    /// Evict once the window holds `window_size` entries, report ready at
    /// `window_size` or more. The window never exceeds `window_size`.
    Bounded,
}

/// What tensor assembly does with an observation that cannot be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePolicy {
    /// Drop the frame and keep going; later frames shift forward.
    #[default]
    SkipMalformed,
    /// Abort assembly with `ExerciseError::MalformedFrame`.
    FailFast,
}

/// Configuration for a `Predictor`.
///
/// The defaults match the trained action classifier: a 60 frame window of
/// 18 keypoints, refreshed 30 frames at a time, fed with poses whose overall
/// confidence is above 0.6.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PredictorConfig {
    window_size: usize,
    eviction_batch_size: usize,
    min_confidence: f32,
    keypoint_count: usize,
    eviction_policy: EvictionPolicy,
    frame_policy: FramePolicy,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            window_size: 60,
            eviction_batch_size: 30,
            min_confidence: 0.6,
            keypoint_count: 18,
            eviction_policy: EvictionPolicy::Legacy,
            frame_policy: FramePolicy::SkipMalformed,
        }
    }
}

impl PredictorConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(ExerciseError::Config(
                "window_size must be at least 1".to_string(),
            ));
        }
        if self.eviction_batch_size == 0 || self.eviction_batch_size > self.window_size {
            return Err(ExerciseError::Config(format!(
                "eviction_batch_size must be in 1..={}, got {}",
                self.window_size, self.eviction_batch_size
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ExerciseError::Config(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.keypoint_count == 0 {
            return Err(ExerciseError::Config(
                "keypoint_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the number of frames the classifier consumes.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set how many of the oldest entries are dropped at once.
    pub fn with_eviction_batch_size(mut self, eviction_batch_size: usize) -> Self {
        self.eviction_batch_size = eviction_batch_size;
        self
    }

    /// Set the overall pose confidence a frame must exceed to be buffered.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_keypoint_count(mut self, keypoint_count: usize) -> Self {
        self.keypoint_count = keypoint_count;
        self
    }

    pub fn with_eviction_policy(mut self, eviction_policy: EvictionPolicy) -> Self {
        self.eviction_policy = eviction_policy;
        self
    }

    pub fn with_frame_policy(mut self, frame_policy: FramePolicy) -> Self {
        self.frame_policy = frame_policy;
        self
    }

    // Getters
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn eviction_batch_size(&self) -> usize {
        self.eviction_batch_size
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    pub fn keypoint_count(&self) -> usize {
        self.keypoint_count
    }

    pub fn eviction_policy(&self) -> EvictionPolicy {
        self.eviction_policy
    }

    pub fn frame_policy(&self) -> FramePolicy {
        self.frame_policy
    }
}
