pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelcache;
pub mod modelsource;
pub mod pose;
pub mod session;

pub use backend::Backend;
pub use backends::OnnxBackend;
pub use device::Device;
pub use error::InferError;
pub use modelcache::ensure_model;
pub use modelsource::ModelSource;
pub use pose::{BodyPart, Keypoint, MoveNet, PoseDetection, PoseDetector, BODY_PART_COUNT};
pub use session::Session;
