mod detector;
mod movenet;
mod types;

pub use detector::PoseDetector;
pub use movenet::{decode_keypoints, MoveNet, THUNDER_INPUT_SIZE};
pub use types::{BodyPart, Keypoint, PoseDetection, BODY_PART_COUNT};
