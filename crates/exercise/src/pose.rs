use base::{Tensor, Vec2};

/// Number of joints in the layout the action classifier was trained on
pub const BODY_JOINT_COUNT: usize = 18;

/// Number of keypoints produced by COCO-style pose detectors
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// Channels per keypoint in a model frame: x, y, confidence
pub const FRAME_CHANNELS: usize = 3;

/// A single keypoint in normalized image coordinates with its confidence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keypoint {
    pub position: Vec2<f32>,
    /// Detection confidence in [0.0, 1.0]
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            confidence,
        }
    }
}

/// Joint order of the classifier input (18 joints, neck included)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyJoint {
    Nose = 0,
    Neck = 1,
    RightShoulder = 2,
    RightElbow = 3,
    RightWrist = 4,
    LeftShoulder = 5,
    LeftElbow = 6,
    LeftWrist = 7,
    RightHip = 8,
    RightKnee = 9,
    RightAnkle = 10,
    LeftHip = 11,
    LeftKnee = 12,
    LeftAnkle = 13,
    RightEye = 14,
    LeftEye = 15,
    RightEar = 16,
    LeftEar = 17,
}

impl BodyJoint {
    pub const ALL: [BodyJoint; BODY_JOINT_COUNT] = [
        BodyJoint::Nose,
        BodyJoint::Neck,
        BodyJoint::RightShoulder,
        BodyJoint::RightElbow,
        BodyJoint::RightWrist,
        BodyJoint::LeftShoulder,
        BodyJoint::LeftElbow,
        BodyJoint::LeftWrist,
        BodyJoint::RightHip,
        BodyJoint::RightKnee,
        BodyJoint::RightAnkle,
        BodyJoint::LeftHip,
        BodyJoint::LeftKnee,
        BodyJoint::LeftAnkle,
        BodyJoint::RightEye,
        BodyJoint::LeftEye,
        BodyJoint::RightEar,
        BodyJoint::LeftEar,
    ];

    /// Index of this joint in a COCO 17-keypoint detection. The neck has no
    /// COCO counterpart.
    pub fn coco_index(self) -> Option<usize> {
        match self {
            BodyJoint::Nose => Some(0),
            BodyJoint::Neck => None,
            BodyJoint::LeftEye => Some(1),
            BodyJoint::RightEye => Some(2),
            BodyJoint::LeftEar => Some(3),
            BodyJoint::RightEar => Some(4),
            BodyJoint::LeftShoulder => Some(5),
            BodyJoint::RightShoulder => Some(6),
            BodyJoint::LeftElbow => Some(7),
            BodyJoint::RightElbow => Some(8),
            BodyJoint::LeftWrist => Some(9),
            BodyJoint::RightWrist => Some(10),
            BodyJoint::LeftHip => Some(11),
            BodyJoint::RightHip => Some(12),
            BodyJoint::LeftKnee => Some(13),
            BodyJoint::RightKnee => Some(14),
            BodyJoint::LeftAnkle => Some(15),
            BodyJoint::RightAnkle => Some(16),
        }
    }
}

impl From<BodyJoint> for usize {
    fn from(joint: BodyJoint) -> usize {
        joint as usize
    }
}

impl TryFrom<usize> for BodyJoint {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        BodyJoint::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid body joint index: {}. Must be in range 0-{}.",
                value,
                BODY_JOINT_COUNT - 1
            )
        })
    }
}

/// One detected body in one frame.
///
/// Keypoints are stored as delivered by the pose source; their count is only
/// checked when the observation is laid out as a model frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseObservation {
    pub keypoints: Vec<Keypoint>,
    /// Confidence for the whole observation in [0.0, 1.0]
    pub confidence: f32,
}

impl PoseObservation {
    pub fn new(keypoints: Vec<Keypoint>, confidence: f32) -> Self {
        Self {
            keypoints,
            confidence,
        }
    }

    /// Build an 18-joint observation from a COCO 17-keypoint detection.
    ///
    /// The neck is placed between the shoulders and gets the lower of the two
    /// shoulder confidences.
    pub fn from_coco17(coco: &[Keypoint; COCO_KEYPOINT_COUNT], confidence: f32) -> Self {
        let left = coco[5];
        let right = coco[6];
        let neck = Keypoint {
            position: left.position.midpoint(right.position),
            confidence: left.confidence.min(right.confidence),
        };

        let keypoints = BodyJoint::ALL
            .iter()
            .map(|joint| match joint.coco_index() {
                Some(index) => coco[index],
                None => neck,
            })
            .collect();

        Self {
            keypoints,
            confidence,
        }
    }

    /// Get a keypoint by joint, if the observation has that many keypoints
    pub fn keypoint(&self, joint: BodyJoint) -> Option<&Keypoint> {
        self.keypoints.get(usize::from(joint))
    }

    /// Lay the observation out as one model frame of shape `[1, 3, K]`.
    ///
    /// Channel 0 holds x, channel 1 holds y and channel 2 holds the keypoint
    /// confidence, each indexed by joint.
    pub fn to_frame(&self, keypoint_count: usize) -> Result<Tensor<f32>, String> {
        if self.keypoints.len() != keypoint_count {
            return Err(format!(
                "expected {} keypoints, got {}",
                keypoint_count,
                self.keypoints.len()
            ));
        }

        let mut data = vec![0.0f32; FRAME_CHANNELS * keypoint_count];
        for (joint, keypoint) in self.keypoints.iter().enumerate() {
            if !keypoint.position.is_finite() || !keypoint.confidence.is_finite() {
                return Err(format!("keypoint {} has a non-finite value", joint));
            }
            data[joint] = keypoint.position.x;
            data[keypoint_count + joint] = keypoint.position.y;
            data[2 * keypoint_count + joint] = keypoint.confidence;
        }

        Tensor::new(vec![1, FRAME_CHANNELS, keypoint_count], data).map_err(|e| e.to_string())
    }
}
