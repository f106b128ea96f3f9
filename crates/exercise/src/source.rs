use crate::{error::Result, pose::PoseObservation};

/// Turns raw frames into body poses.
///
/// Returning `Ok(None)` means no body was found in the frame, which is not an
/// error. `Err` is reserved for frames that could not be processed at all.
pub trait PoseSource {
    type Frame: ?Sized;

    fn extract_pose(&mut self, frame: &Self::Frame) -> Result<Option<PoseObservation>>;
}
