use posedata_infer::PoseDetection;

/// Decides whether a detection is confident enough to become a dataset row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceFilter {
    threshold: f32,
    always_keep: bool,
}

impl ConfidenceFilter {
    pub fn new(threshold: f32, always_keep: bool) -> Self {
        Self {
            threshold,
            always_keep,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Keep when `always_keep` is set or every keypoint reaches the threshold.
    pub fn keep(&self, detection: &PoseDetection) -> bool {
        self.always_keep || detection.min_confidence() >= self.threshold
    }
}
