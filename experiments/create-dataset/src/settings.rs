use posedata_base::LogTarget;
use posedata_dataset::DatasetConfig;
use posedata_infer::{Device, InferError};
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "models/movenet_thunder.onnx";

/// Run settings, resolved from `POSEDATA_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dataset: DatasetConfig,
    pub model_path: PathBuf,
    pub model_url: Option<String>,
    pub device: Device,
    pub log_target: LogTarget,
}

impl Settings {
    pub fn from_env() -> Result<Self, InferError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; unset or empty values keep the default.
    ///
    /// Fails only when `POSEDATA_DEVICE` does not name a device.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InferError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut dataset = DatasetConfig::default();
        if let Some(images) = var("POSEDATA_IMAGES") {
            dataset = dataset.with_images_root(images);
        }
        if let Some(output) = var("POSEDATA_OUTPUT") {
            dataset = dataset.with_output_csv(output);
        }

        let model_path = var("POSEDATA_MODEL_PATH")
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
            .into();

        let log_target = match var("POSEDATA_LOG_DIR") {
            Some(dir) => LogTarget::Directory(dir.into()),
            None => LogTarget::Stdout,
        };

        let device = match var("POSEDATA_DEVICE") {
            Some(text) => text.parse()?,
            None => Device::Cpu,
        };

        Ok(Self {
            dataset,
            model_path,
            model_url: var("POSEDATA_MODEL_URL"),
            device,
            log_target,
        })
    }
}
