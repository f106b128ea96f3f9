use {
    crate::{
        error::{ExerciseError, Result},
        pose::{Keypoint, PoseObservation},
        source::PoseSource,
    },
    serde::{Deserialize, Serialize},
};

/// One recorded pose as stored in a `.jsonl` capture.
///
/// Each keypoint is `[x, y, confidence]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PoseRecord {
    pub confidence: f32,
    pub keypoints: Vec<[f32; 3]>,
}

impl From<PoseRecord> for PoseObservation {
    fn from(record: PoseRecord) -> Self {
        let keypoints = record
            .keypoints
            .iter()
            .map(|&[x, y, confidence]| Keypoint::new(x, y, confidence))
            .collect();
        PoseObservation::new(keypoints, record.confidence)
    }
}

impl From<&PoseObservation> for PoseRecord {
    fn from(observation: &PoseObservation) -> Self {
        Self {
            confidence: observation.confidence,
            keypoints: observation
                .keypoints
                .iter()
                .map(|k| [k.position.x, k.position.y, k.confidence])
                .collect(),
        }
    }
}

/// Pose source that replays a recorded capture, one JSON line per frame.
///
/// A `null` line is a frame where no body was detected.
#[derive(Debug, Default)]
pub struct RecordedPoseSource {
    frames_read: usize,
}

impl RecordedPoseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames handed to `extract_pose` so far, bad ones included.
    pub fn frames_read(&self) -> usize {
        self.frames_read
    }
}

impl PoseSource for RecordedPoseSource {
    type Frame = str;

    fn extract_pose(&mut self, frame: &str) -> Result<Option<PoseObservation>> {
        self.frames_read += 1;
        let record: Option<PoseRecord> = serde_json::from_str(frame).map_err(|e| {
            ExerciseError::PoseExtraction(format!("frame {}: {}", self.frames_read, e))
        })?;
        Ok(record.map(PoseObservation::from))
    }
}
