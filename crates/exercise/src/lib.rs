//! Exercise classification from a sliding window of body poses.
//!
//! A `PoseSource` turns camera frames into `PoseObservation`s, a `PoseWindow`
//! keeps the most recent confident ones, a `WindowAssembler` lays them out as
//! a `[frames, 3, keypoints]` tensor and a `Classifier` scores that tensor.
//! `Predictor` drives the whole thing.

pub mod assemble;
pub mod classifier;
pub mod config;
pub mod error;
pub mod onnx;
pub mod pose;
pub mod predictor;
pub mod replay;
pub mod source;
pub mod window;

pub use assemble::WindowAssembler;
pub use classifier::{Classification, Classifier, Prediction};
pub use config::{EvictionPolicy, FramePolicy, PredictorConfig};
pub use error::{ExerciseError, Result};
pub use onnx::{ModelConfig, OnnxClassifier};
pub use pose::{
    BODY_JOINT_COUNT, BodyJoint, COCO_KEYPOINT_COUNT, FRAME_CHANNELS, Keypoint, PoseObservation,
};
pub use predictor::Predictor;
pub use replay::{PoseRecord, RecordedPoseSource};
pub use source::PoseSource;
pub use window::PoseWindow;
