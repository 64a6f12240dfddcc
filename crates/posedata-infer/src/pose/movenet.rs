use super::detector::PoseDetector;
use super::types::{Keypoint, PoseDetection, BODY_PART_COUNT};
use crate::{Backend, InferError, ModelSource, Session};
use posedata_base::{Tensor, Vec2};

/// Input side length of MoveNet SinglePose Thunder.
pub const THUNDER_INPUT_SIZE: usize = 256;

/// MoveNet single-pose detector.
///
/// Expects an ONNX export with one NHWC float input `[1, S, S, 3]` holding
/// RGB values in [0, 255], and one output `[1, 1, 17, 3]` of normalized
/// `(y, x, score)` triples.
pub struct MoveNet {
    session: Box<dyn Session>,
    input_size: usize,
}

impl MoveNet {
    /// Load a MoveNet model through the given backend.
    pub fn new(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        Ok(Self::from_session(session))
    }

    /// Wrap an already loaded session. Input size defaults to Thunder's 256.
    pub fn from_session(session: Box<dyn Session>) -> Self {
        Self {
            session,
            input_size: THUNDER_INPUT_SIZE,
        }
    }

    /// Set the model input side length (192 for Lightning).
    pub fn with_input_size(mut self, size: usize) -> Self {
        self.input_size = size;
        self
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Nearest-neighbor resize to the model input and widen to f32 NHWC.
    fn input_tensor(&self, image: &Tensor<u8>) -> Result<Tensor<f32>, InferError> {
        let (h, w, c) = image.hwc()?;
        if c != 3 {
            return Err(InferError::ShapeMismatch {
                expected: "3 channels".to_string(),
                got: format!("{} channels", c),
            });
        }
        if h == 0 || w == 0 {
            return Err(InferError::ShapeMismatch {
                expected: "non-zero image dimensions".to_string(),
                got: format!("{}x{}", w, h),
            });
        }

        let size = self.input_size;
        let mut data = Vec::with_capacity(size * size * 3);
        for out_y in 0..size {
            let src_y = (out_y * h / size).min(h - 1);
            for out_x in 0..size {
                let src_x = (out_x * w / size).min(w - 1);
                let idx = (src_y * w + src_x) * 3;
                data.extend(image.data[idx..idx + 3].iter().map(|&v| v as f32));
            }
        }

        Ok(Tensor::new(vec![1, size, size, 3], data)?)
    }
}

/// Turn a raw `[1, 1, 17, 3]` MoveNet output into a detection whose
/// keypoints are scaled to a `width` x `height` image.
pub fn decode_keypoints(
    output: &Tensor<f32>,
    width: f32,
    height: f32,
) -> Result<PoseDetection, InferError> {
    if output.shape != [1, 1, BODY_PART_COUNT, 3] {
        return Err(InferError::ShapeMismatch {
            expected: format!("[1, 1, {}, 3]", BODY_PART_COUNT),
            got: format!("{:?}", output.shape),
        });
    }

    let mut keypoints = [Keypoint::default(); BODY_PART_COUNT];
    for (keypoint, row) in keypoints.iter_mut().zip(output.data.chunks_exact(3)) {
        // rows are (y, x, score)
        *keypoint = Keypoint {
            position: Vec2::new(row[1] * width, row[0] * height),
            confidence: row[2],
        };
    }

    Ok(PoseDetection::from_keypoints(keypoints))
}

impl PoseDetector for MoveNet {
    fn detect(&mut self, image: &Tensor<u8>) -> Result<PoseDetection, InferError> {
        let input = self.input_tensor(image)?;
        let (h, w, _) = image.hwc()?;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::Backend("model has no inputs".to_string()))?
            .clone();
        let output_name = self
            .session
            .output_names()
            .first()
            .ok_or_else(|| InferError::Backend("model has no outputs".to_string()))?
            .clone();

        let mut outputs = self.session.run(&[(input_name.as_str(), input)])?;
        let output = outputs.remove(&output_name).ok_or_else(|| {
            InferError::Backend(format!("model produced no '{}' output", output_name))
        })?;

        decode_keypoints(&output, w as f32, h as f32)
    }
}
