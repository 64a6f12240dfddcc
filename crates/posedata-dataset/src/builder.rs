use crate::filter::ConfidenceFilter;
use crate::landmarks::{self, ClassCsvWriter, LandmarkTable};
use crate::layout;
use crate::{DatasetConfig, DatasetError};
use posedata_image::{load_image, prepare_for_detection};
use posedata_infer::PoseDetector;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Why an image produced no row.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    InvalidImage,
    NotRgb { channels: usize },
    DetectionFailed(String),
    LowConfidence { min_score: f32, threshold: f32 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidImage => write!(f, "Invalid image."),
            SkipReason::NotRgb { .. } => write!(f, "Image is not in RGB."),
            SkipReason::DetectionFailed(err) => write!(f, "Pose detection failed: {err}"),
            SkipReason::LowConfidence { .. } => {
                write!(f, "Keypoints score are below than threshold.")
            }
        }
    }
}

/// A skipped image and the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipMessage {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl fmt::Display for SkipMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipped {}. {}", self.path.display(), self.reason)
    }
}

/// Kept images for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub class_no: usize,
    pub name: String,
    pub kept: usize,
}

/// Outcome of `DatasetBuilder::process`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSummary {
    pub classes: Vec<ClassSummary>,
    pub skipped: Vec<SkipMessage>,
    /// Rows in the combined CSV
    pub rows: usize,
}

/// Turns a folder of class-labeled images into landmark CSVs.
pub struct DatasetBuilder<D: PoseDetector> {
    config: DatasetConfig,
    detector: D,
    filter: ConfidenceFilter,
    class_names: Vec<String>,
}

impl<D: PoseDetector> DatasetBuilder<D> {
    /// Enumerate the class folders and create the per-class output directory.
    ///
    /// # Errors
    ///
    /// `DatasetError::Io` if the images root cannot be listed or the output
    /// directory cannot be created.
    pub fn new(config: DatasetConfig, detector: D) -> Result<Self, DatasetError> {
        let class_names = layout::class_names(config.images_root())?;
        fs::create_dir_all(config.per_class_dir())
            .map_err(|e| DatasetError::io(config.per_class_dir(), e))?;

        log::info!(
            "Found {} classes in {}: {:?}",
            class_names.len(),
            config.images_root().display(),
            class_names
        );

        let filter = ConfidenceFilter::new(config.detection_threshold(), config.always_keep());
        Ok(Self {
            config,
            detector,
            filter,
            class_names,
        })
    }

    /// Class names in `class_no` order.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Write one CSV per class, then the combined CSV.
    pub fn process(&mut self) -> Result<ProcessSummary, DatasetError> {
        let mut classes = Vec::with_capacity(self.class_names.len());
        let mut skipped = Vec::new();

        for (class_no, name) in self.class_names.clone().into_iter().enumerate() {
            let kept = self.process_class(&name, &mut skipped)?;
            classes.push(ClassSummary {
                class_no,
                name,
                kept,
            });
        }

        for message in &skipped {
            log::warn!("{message}");
        }
        for class in &classes {
            log::info!("{}: {} valid images", class.name, class.kept);
        }

        let table = self.all_landmarks()?;
        table.write_csv(self.config.output_csv())?;
        log::info!(
            "Wrote {} rows to {}",
            table.len(),
            self.config.output_csv().display()
        );

        Ok(ProcessSummary {
            classes,
            skipped,
            rows: table.len(),
        })
    }

    /// Merge the per-class CSVs currently on disk.
    pub fn all_landmarks(&self) -> Result<LandmarkTable, DatasetError> {
        landmarks::all_landmarks(self.config.per_class_dir(), &self.class_names)
    }

    fn process_class(
        &mut self,
        class_name: &str,
        skipped: &mut Vec<SkipMessage>,
    ) -> Result<usize, DatasetError> {
        let class_dir = self.config.images_root().join(class_name);
        let image_names = layout::image_names(&class_dir)?;
        log::info!("Processing {} ({} images)", class_name, image_names.len());

        let mut writer = ClassCsvWriter::create(self.config.class_csv_path(class_name))?;
        for image_name in &image_names {
            let path = class_dir.join(image_name);
            log::debug!("Detecting {}", path.display());

            match self.landmarks_for(&path) {
                Ok(coordinates) => writer.write_row(image_name, &coordinates)?,
                Err(reason) => skipped.push(SkipMessage { path, reason }),
            }
        }
        writer.finish()
    }

    fn landmarks_for(&mut self, path: &Path) -> Result<Vec<f32>, SkipReason> {
        let image = load_image(path).map_err(|_| SkipReason::InvalidImage)?;
        if image.channels() != 3 {
            return Err(SkipReason::NotRgb {
                channels: image.channels(),
            });
        }

        let input = prepare_for_detection(
            &image,
            self.config.input_size(),
            self.config.flip_horizontal(),
        )
        .map_err(|_| SkipReason::InvalidImage)?;

        let detection = self
            .detector
            .detect(&input)
            .map_err(|e| SkipReason::DetectionFailed(e.to_string()))?;

        if !self.filter.keep(&detection) {
            return Err(SkipReason::LowConfidence {
                min_score: detection.min_confidence(),
                threshold: self.filter.threshold(),
            });
        }
        Ok(detection.flattened_coordinates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_message_text() {
        let message = |reason| SkipMessage {
            path: PathBuf::from("imgs/sit/a.jpg"),
            reason,
        };
        assert_eq!(
            message(SkipReason::InvalidImage).to_string(),
            "Skipped imgs/sit/a.jpg. Invalid image."
        );
        assert_eq!(
            message(SkipReason::NotRgb { channels: 4 }).to_string(),
            "Skipped imgs/sit/a.jpg. Image is not in RGB."
        );
        assert_eq!(
            message(SkipReason::DetectionFailed("boom".into())).to_string(),
            "Skipped imgs/sit/a.jpg. Pose detection failed: boom"
        );
        assert_eq!(
            message(SkipReason::LowConfidence {
                min_score: 0.01,
                threshold: 0.1
            }).to_string(),
            "Skipped imgs/sit/a.jpg. Keypoints score are below than threshold."
        );
    }
}
