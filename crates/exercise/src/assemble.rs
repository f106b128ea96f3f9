use {
    crate::{
        config::{FramePolicy, PredictorConfig},
        error::{ExerciseError, Result},
        pose::{FRAME_CHANNELS, PoseObservation},
    },
    base::Tensor,
};

/// Builds the `[window_size, 3, keypoint_count]` classifier input from a
/// sequence of observations.
#[derive(Debug, Clone, Copy)]
pub struct WindowAssembler {
    window_size: usize,
    keypoint_count: usize,
    frame_policy: FramePolicy,
}

impl WindowAssembler {
    pub fn new(config: &PredictorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            window_size: config.window_size(),
            keypoint_count: config.keypoint_count(),
            frame_policy: config.frame_policy(),
        })
    }

    /// Assemble the model input from `observations`, oldest first.
    ///
    /// At most `window_size` observations are converted. If fewer than
    /// `window_size` are available, all-zero frames are appended after the
    /// real ones. Returns `Ok(None)` when skipped frames leave the result
    /// short of `window_size` frames.
    ///
    /// # Errors
    /// `ExerciseError::MalformedFrame` under `FramePolicy::FailFast`.
    pub fn assemble<'a, I>(&self, observations: I) -> Result<Option<Tensor<f32>>>
    where
        I: IntoIterator<Item = &'a PoseObservation>,
    {
        let observations: Vec<&PoseObservation> = observations.into_iter().collect();
        let available = observations.len();
        let needed = self.window_size;

        let mut frames = Vec::with_capacity(needed);
        for (index, observation) in observations.iter().take(needed).enumerate() {
            match observation.to_frame(self.keypoint_count) {
                Ok(frame) => frames.push(frame),
                Err(reason) => match self.frame_policy {
                    FramePolicy::SkipMalformed => {
                        base::log_warn!("skipping malformed frame {}: {}", index, reason);
                    }
                    FramePolicy::FailFast => {
                        return Err(ExerciseError::MalformedFrame { index, reason });
                    }
                },
            }
        }

        if available < needed {
            let padding = Tensor::zeros(vec![1, FRAME_CHANNELS, self.keypoint_count])?;
            frames.extend(std::iter::repeat_n(padding, needed - available));
        }

        if frames.len() < needed {
            base::log_warn!(
                "window assembly short: {} of {} frames usable",
                frames.len(),
                needed
            );
            return Ok(None);
        }

        Ok(Some(Tensor::concat(&frames)?))
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn keypoint_count(&self) -> usize {
        self.keypoint_count
    }
}
