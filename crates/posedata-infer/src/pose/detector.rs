use super::types::PoseDetection;
use crate::InferError;
use posedata_base::Tensor;

/// Single-person keypoint detector.
///
/// Contract: `image` is an HWC `Tensor<u8>` with 3 channels in RGB order.
/// On success the detection holds exactly `BODY_PART_COUNT` keypoints in
/// `BodyPart` order, positioned in the pixel space of `image`, with
/// confidences in [0, 1]. Callers rely on this and do not re-check it.
pub trait PoseDetector {
    fn detect(&mut self, image: &Tensor<u8>) -> Result<PoseDetection, InferError>;
}

impl<D: PoseDetector + ?Sized> PoseDetector for Box<D> {
    fn detect(&mut self, image: &Tensor<u8>) -> Result<PoseDetection, InferError> {
        (**self).detect(image)
    }
}
