use {
    crate::{
        assemble::WindowAssembler,
        classifier::{Classifier, Prediction},
        config::PredictorConfig,
        error::{ExerciseError, Result},
        pose::PoseObservation,
        source::PoseSource,
        window::PoseWindow,
    },
    std::fmt,
};

/// Classifies exercises from a stream of frames.
///
/// Each submitted frame goes through the pose source; confident poses land in
/// a sliding window. Once the window is ready, `predict` assembles it into the
/// classifier input and reports the winning label.
///
/// A `Predictor` is not synchronized internally. Drive `submit_frame` and
/// `predict` from one thread, or wrap the predictor in a lock.
pub struct Predictor<S: PoseSource, C: Classifier> {
    config: PredictorConfig,
    source: S,
    classifier: C,
    window: PoseWindow,
    assembler: WindowAssembler,
}

impl<S: PoseSource, C: Classifier> fmt::Debug for Predictor<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("config", &self.config)
            .field("window", &self.window)
            .finish()
    }
}

impl<S: PoseSource, C: Classifier> Predictor<S, C> {
    pub fn new(config: PredictorConfig, source: S, classifier: C) -> Result<Self> {
        let window = PoseWindow::new(&config)?;
        let assembler = WindowAssembler::new(&config)?;
        base::log_info!(
            "predictor: window {} frames, eviction batch {}, min confidence {}, {:?}",
            config.window_size(),
            config.eviction_batch_size(),
            config.min_confidence(),
            config.eviction_policy()
        );
        Ok(Self {
            config,
            source,
            classifier,
            window,
            assembler,
        })
    }

    /// Extract a pose from `frame` and buffer it if it is confident enough.
    ///
    /// The extracted pose is returned whether or not it was buffered, so the
    /// caller can still draw it. `Ok(None)` means no body was detected.
    ///
    /// # Errors
    /// `ExerciseError::PoseExtraction` if the pose source fails on the frame.
    pub fn submit_frame(&mut self, frame: &S::Frame) -> Result<Option<PoseObservation>> {
        let pose = self.source.extract_pose(frame).map_err(|err| match err {
            ExerciseError::PoseExtraction(_) => err,
            other => ExerciseError::PoseExtraction(other.to_string()),
        })?;

        if let Some(observation) = &pose {
            self.window.accept(observation.clone());
        }
        Ok(pose)
    }

    /// Classify the current window.
    ///
    /// Returns `Ok(None)` while the window is not ready or when assembly comes
    /// up short. The window itself is never modified here.
    ///
    /// # Errors
    /// `ExerciseError::Classification` if the classifier fails, and
    /// `ExerciseError::MalformedFrame` under `FramePolicy::FailFast`.
    pub fn predict(&mut self) -> Result<Option<Prediction>> {
        if !self.window.is_ready() {
            return Ok(None);
        }

        let Some(input) = self.assembler.assemble(self.window.iter())? else {
            return Ok(None);
        };

        let classification = self.classifier.classify(&input).map_err(|err| {
            base::log_error!("classification failed: {}", err);
            match err {
                ExerciseError::Classification(_) => err,
                other => ExerciseError::Classification(other.to_string()),
            }
        })?;

        let prediction = Prediction::from(&classification);
        base::log_debug!(
            "predicted {} ({:.3})",
            prediction.label,
            prediction.confidence
        );
        Ok(Some(prediction))
    }

    pub fn is_ready(&self) -> bool {
        self.window.is_ready()
    }

    pub fn window(&self) -> &PoseWindow {
        &self.window
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Drop every buffered pose, e.g. when a new capture session starts.
    pub fn reset(&mut self) {
        self.window.clear();
        base::log_debug!("predictor window cleared");
    }
}
