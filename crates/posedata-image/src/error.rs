use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Io(String),
    Decode(String),
    Channels { expected: usize, got: usize },
    Tensor(posedata_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io(msg) => write!(f, "io error: {msg}"),
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Channels { expected, got } => {
                write!(f, "expected {expected} channels, got {got}")
            }
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err.to_string())
    }
}

impl From<posedata_base::TensorError> for ImageError {
    fn from(err: posedata_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
