use posedata_base::{Rect, Vec2};

/// Number of tracked body parts (COCO / MoveNet order)
pub const BODY_PART_COUNT: usize = 17;

/// Anatomical landmarks reported by single-pose models, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyPart {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl BodyPart {
    /// Every body part, in output order.
    pub const ALL: [BodyPart; BODY_PART_COUNT] = [
        BodyPart::Nose,
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::LeftKnee,
        BodyPart::RightKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightAnkle,
    ];

    /// Upper-case name used in dataset column headers (`LEFT_SHOULDER`).
    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Nose => "NOSE",
            BodyPart::LeftEye => "LEFT_EYE",
            BodyPart::RightEye => "RIGHT_EYE",
            BodyPart::LeftEar => "LEFT_EAR",
            BodyPart::RightEar => "RIGHT_EAR",
            BodyPart::LeftShoulder => "LEFT_SHOULDER",
            BodyPart::RightShoulder => "RIGHT_SHOULDER",
            BodyPart::LeftElbow => "LEFT_ELBOW",
            BodyPart::RightElbow => "RIGHT_ELBOW",
            BodyPart::LeftWrist => "LEFT_WRIST",
            BodyPart::RightWrist => "RIGHT_WRIST",
            BodyPart::LeftHip => "LEFT_HIP",
            BodyPart::RightHip => "RIGHT_HIP",
            BodyPart::LeftKnee => "LEFT_KNEE",
            BodyPart::RightKnee => "RIGHT_KNEE",
            BodyPart::LeftAnkle => "LEFT_ANKLE",
            BodyPart::RightAnkle => "RIGHT_ANKLE",
        }
    }
}

impl From<BodyPart> for usize {
    fn from(part: BodyPart) -> usize {
        part as usize
    }
}

impl TryFrom<usize> for BodyPart {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        BodyPart::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid body part index: {}. Must be in range 0-{}.",
                value,
                BODY_PART_COUNT - 1
            )
        })
    }
}

/// A single keypoint with 2D position and confidence score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keypoint {
    /// Pixel position in the image handed to the detector
    pub position: Vec2<f32>,
    /// Confidence score in [0.0, 1.0]
    pub confidence: f32,
}

/// One detected person.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseDetection {
    /// Box enclosing all keypoints
    pub bbox: Rect<f32>,
    /// Mean keypoint confidence
    pub score: f32,
    /// Keypoints indexed by `BodyPart`
    pub keypoints: [Keypoint; BODY_PART_COUNT],
}

impl PoseDetection {
    /// Build a detection from keypoints, deriving the box and overall score.
    pub fn from_keypoints(keypoints: [Keypoint; BODY_PART_COUNT]) -> Self {
        let bbox = Rect::enclosing(keypoints.iter().map(|k| k.position));
        let score =
            keypoints.iter().map(|k| k.confidence).sum::<f32>() / BODY_PART_COUNT as f32;
        Self {
            bbox,
            score,
            keypoints,
        }
    }

    /// Get a keypoint by body part
    pub fn keypoint(&self, part: BodyPart) -> &Keypoint {
        &self.keypoints[usize::from(part)]
    }

    /// Lowest keypoint confidence.
    pub fn min_confidence(&self) -> f32 {
        self.keypoints
            .iter()
            .map(|k| k.confidence)
            .fold(f32::INFINITY, f32::min)
    }

    /// `[x0, y0, x1, y1, ...]` in body-part order.
    pub fn flattened_coordinates(&self) -> Vec<f32> {
        self.keypoints
            .iter()
            .flat_map(|k| [k.position.x, k.position.y])
            .collect()
    }
}
