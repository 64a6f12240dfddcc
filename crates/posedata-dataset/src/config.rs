use std::path::{Path, PathBuf};

/// Configuration for a dataset build.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetConfig {
    images_root: PathBuf,
    output_csv: PathBuf,
    per_class_dir: PathBuf,
    detection_threshold: f32,
    always_keep: bool,
    input_size: u32,
    flip_horizontal: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            images_root: PathBuf::from("all_images").join("train"),
            output_csv: PathBuf::from("train_data.csv"),
            per_class_dir: PathBuf::from("csv_per_pose"),
            detection_threshold: 0.1,
            always_keep: true,
            input_size: 256,
            flip_horizontal: true,
        }
    }
}

impl DatasetConfig {
    /// Set the folder holding one sub-folder per pose class.
    pub fn with_images_root(mut self, images_root: impl Into<PathBuf>) -> Self {
        self.images_root = images_root.into();
        self
    }

    /// Set the combined CSV path.
    pub fn with_output_csv(mut self, output_csv: impl Into<PathBuf>) -> Self {
        self.output_csv = output_csv.into();
        self
    }

    /// Set the directory receiving one CSV per class.
    pub fn with_per_class_dir(mut self, per_class_dir: impl Into<PathBuf>) -> Self {
        self.per_class_dir = per_class_dir.into();
        self
    }

    /// Set the minimum keypoint score an image needs to be kept.
    pub fn with_detection_threshold(mut self, threshold: f32) -> Self {
        self.detection_threshold = threshold;
        self
    }

    /// Keep every detected image regardless of the threshold.
    pub fn with_always_keep(mut self, always_keep: bool) -> Self {
        self.always_keep = always_keep;
        self
    }

    /// Set the square side images are resized to before detection.
    pub fn with_input_size(mut self, input_size: u32) -> Self {
        self.input_size = input_size;
        self
    }

    /// Mirror images before detection.
    pub fn with_flip_horizontal(mut self, flip: bool) -> Self {
        self.flip_horizontal = flip;
        self
    }

    // Getters
    pub fn images_root(&self) -> &Path {
        &self.images_root
    }

    pub fn output_csv(&self) -> &Path {
        &self.output_csv
    }

    pub fn per_class_dir(&self) -> &Path {
        &self.per_class_dir
    }

    pub fn detection_threshold(&self) -> f32 {
        self.detection_threshold
    }

    pub fn always_keep(&self) -> bool {
        self.always_keep
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Path of the headerless CSV for one class.
    pub fn class_csv_path(&self, class_name: &str) -> PathBuf {
        self.per_class_dir.join(format!("{class_name}.csv"))
    }
}
