use posedata_base::{Tensor, Vec2};
use posedata_dataset::{DatasetBuilder, DatasetConfig, DatasetError, SkipReason};
use posedata_infer::{InferError, Keypoint, PoseDetection, PoseDetector, BODY_PART_COUNT};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Replays scripted confidences (or failures) in call order, then 0.9.
struct ScriptedDetector {
    script: VecDeque<Result<f32, String>>,
    seen_shapes: Vec<Vec<usize>>,
}

impl ScriptedDetector {
    fn new(script: Vec<Result<f32, String>>) -> Self {
        Self {
            script: script.into(),
            seen_shapes: Vec::new(),
        }
    }

    fn confident() -> Self {
        Self::new(Vec::new())
    }
}

impl PoseDetector for ScriptedDetector {
    fn detect(&mut self, image: &Tensor<u8>) -> Result<PoseDetection, InferError> {
        self.seen_shapes.push(image.shape.clone());
        let confidence = self
            .script
            .pop_front()
            .unwrap_or(Ok(0.9))
            .map_err(InferError::Backend)?;

        let mut keypoints = [Keypoint::default(); BODY_PART_COUNT];
        for (i, keypoint) in keypoints.iter_mut().enumerate() {
            keypoint.position = Vec2::new(i as f32 * 2.0, 100.0 - i as f32);
            keypoint.confidence = confidence;
        }
        Ok(PoseDetection::from_keypoints(keypoints))
    }
}

struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "posedata-builder-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("images")).unwrap();
        Self { dir }
    }

    fn images(&self) -> PathBuf {
        self.dir.join("images")
    }

    fn config(&self) -> DatasetConfig {
        DatasetConfig::default()
            .with_images_root(self.images())
            .with_output_csv(self.dir.join("train_data.csv"))
            .with_per_class_dir(self.dir.join("csv_per_pose"))
            .with_input_size(16)
    }

    fn rgb(&self, class_name: &str, file_name: &str) {
        let path = self.class_dir(class_name).join(file_name);
        image::RgbImage::from_fn(12, 8, |x, y| image::Rgb([x as u8 * 20, y as u8 * 30, 77]))
            .save(path)
            .unwrap();
    }

    fn rgba(&self, class_name: &str, file_name: &str) {
        let path = self.class_dir(class_name).join(file_name);
        image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 128]))
            .save(path)
            .unwrap();
    }

    fn corrupt(&self, class_name: &str, file_name: &str) {
        fs::write(self.class_dir(class_name).join(file_name), b"definitely not a jpeg").unwrap();
    }

    fn class_dir(&self, class_name: &str) -> PathBuf {
        let dir = self.images().join(class_name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.dir).ok();
    }
}

fn read_records(path: &Path, has_headers: bool) -> Vec<csv::StringRecord> {
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .from_path(path)
        .unwrap()
        .records()
        .map(|r| r.unwrap())
        .collect()
}

#[test]
fn test_sit_stand_scenario() {
    let fixture = Fixture::new("sit-stand");
    fixture.rgb("sit", "a.png");
    fixture.corrupt("sit", "b.jpg");
    fixture.rgb("stand", "c.png");

    let config = fixture.config();
    let mut builder = DatasetBuilder::new(config.clone(), ScriptedDetector::confident()).unwrap();
    assert_eq!(builder.class_names(), &["sit".to_string(), "stand".to_string()]);

    let summary = builder.process().unwrap();
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.classes.len(), 2);
    assert_eq!(summary.classes[0].name, "sit");
    assert_eq!(summary.classes[0].kept, 1);
    assert_eq!(summary.classes[1].name, "stand");
    assert_eq!(summary.classes[1].kept, 1);

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].reason, SkipReason::InvalidImage);
    assert_eq!(
        summary.skipped[0].to_string(),
        format!(
            "Skipped {}. Invalid image.",
            fixture.images().join("sit").join("b.jpg").display()
        )
    );

    let sit = read_records(&config.class_csv_path("sit"), false);
    assert_eq!(sit.len(), 1);
    assert_eq!(sit[0].len(), 1 + 2 * BODY_PART_COUNT);
    assert_eq!(&sit[0][0], "a.png");
    assert_eq!(&sit[0][1], "0.0");
    assert_eq!(&sit[0][2], "100.0");
    assert_eq!(read_records(&config.class_csv_path("stand"), false).len(), 1);

    let combined = read_records(config.output_csv(), true);
    assert_eq!(combined.len(), 2);
    assert_eq!(&combined[0][0], "sit/a.png");
    assert_eq!(&combined[0][35], "0");
    assert_eq!(&combined[0][36], "sit");
    assert_eq!(&combined[1][0], "stand/c.png");
    assert_eq!(&combined[1][35], "1");
    assert_eq!(&combined[1][36], "stand");
}

#[test]
fn test_detector_sees_square_rgb_input() {
    let fixture = Fixture::new("input-shape");
    fixture.rgb("wave", "a.png");

    let mut builder = DatasetBuilder::new(fixture.config(), ScriptedDetector::confident()).unwrap();
    builder.process().unwrap();

    assert_eq!(builder.detector().seen_shapes, vec![vec![16, 16, 3]]);
}

#[test]
fn test_rgba_image_is_skipped() {
    let fixture = Fixture::new("rgba");
    fixture.rgba("sit", "alpha.png");
    fixture.rgb("sit", "plain.png");

    let mut builder = DatasetBuilder::new(fixture.config(), ScriptedDetector::confident()).unwrap();
    let summary = builder.process().unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].reason, SkipReason::NotRgb { channels: 4 });
    assert!(summary.skipped[0].to_string().ends_with("alpha.png. Image is not in RGB."));
}

#[test]
fn test_low_confidence_skipped_without_always_keep() {
    let fixture = Fixture::new("threshold");
    fixture.rgb("sit", "a.png");
    fixture.rgb("sit", "b.png");

    let config = fixture
        .config()
        .with_always_keep(false)
        .with_detection_threshold(0.1);
    let detector = ScriptedDetector::new(vec![Ok(0.05), Ok(0.5)]);
    let mut builder = DatasetBuilder::new(config.clone(), detector).unwrap();
    let summary = builder.process().unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(
        summary.skipped[0].reason,
        SkipReason::LowConfidence {
            min_score: 0.05,
            threshold: 0.1
        }
    );
    assert!(summary.skipped[0]
        .to_string()
        .ends_with("a.png. Keypoints score are below than threshold."));

    let sit = read_records(&config.class_csv_path("sit"), false);
    assert_eq!(sit.len(), 1);
    assert_eq!(&sit[0][0], "b.png");
}

#[test]
fn test_always_keep_ignores_low_confidence() {
    let fixture = Fixture::new("always-keep");
    fixture.rgb("sit", "a.png");

    let detector = ScriptedDetector::new(vec![Ok(0.0)]);
    let mut builder = DatasetBuilder::new(fixture.config(), detector).unwrap();
    let summary = builder.process().unwrap();

    assert_eq!(summary.rows, 1);
    assert!(summary.skipped.is_empty());
}

#[test]
fn test_detector_failure_skips_image_and_continues() {
    let fixture = Fixture::new("detector-failure");
    fixture.rgb("sit", "a.png");
    fixture.rgb("sit", "b.png");

    let detector = ScriptedDetector::new(vec![Err("no person".to_string())]);
    let mut builder = DatasetBuilder::new(fixture.config(), detector).unwrap();
    let summary = builder.process().unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0]
        .to_string()
        .ends_with("a.png. Pose detection failed: backend error: no person"));
}

#[test]
fn test_class_numbers_follow_sorted_names() {
    let fixture = Fixture::new("ordering");
    for class_name in ["warrior", "chair", "tree"] {
        fixture.rgb(class_name, "x.png");
        fixture.rgb(class_name, "y.png");
    }
    fs::write(fixture.images().join("README.txt"), b"ignored").unwrap();

    let config = fixture.config();
    let mut builder = DatasetBuilder::new(config.clone(), ScriptedDetector::confident()).unwrap();
    let summary = builder.process().unwrap();

    let per_class: usize = summary.classes.iter().map(|c| c.kept).sum();
    assert_eq!(summary.rows, per_class);

    let combined = read_records(config.output_csv(), true);
    assert_eq!(combined.len(), 6);
    let mut last_class_no = 0;
    for record in &combined {
        let class_no: usize = record[35].parse().unwrap();
        let class_name = &record[36];
        assert!(class_no >= last_class_no);
        assert_eq!(builder.class_names()[class_no], class_name);
        assert!(record[0].starts_with(&format!("{class_name}/")));
        last_class_no = class_no;
    }
    assert_eq!(&combined[0][36], "chair");
    assert_eq!(&combined[5][36], "warrior");
}

#[test]
fn test_combined_header() {
    let fixture = Fixture::new("header");
    fixture.rgb("sit", "a.png");

    let config = fixture.config();
    DatasetBuilder::new(config.clone(), ScriptedDetector::confident())
        .unwrap()
        .process()
        .unwrap();

    let mut reader = csv::Reader::from_path(config.output_csv()).unwrap();
    let header = reader.headers().unwrap().clone();
    assert_eq!(header.len(), 37);
    assert_eq!(&header[0], "filename");
    assert_eq!(&header[1], "NOSE_x");
    assert_eq!(&header[12], "LEFT_SHOULDER_y");
    assert_eq!(&header[35], "class_no");
    assert_eq!(&header[36], "class_name");
}

#[test]
fn test_process_is_idempotent() {
    let fixture = Fixture::new("idempotent");
    fixture.rgb("sit", "a.png");
    fixture.corrupt("sit", "b.jpg");
    fixture.rgb("stand", "c.png");

    let config = fixture.config();
    DatasetBuilder::new(config.clone(), ScriptedDetector::confident())
        .unwrap()
        .process()
        .unwrap();
    let first = fs::read(config.output_csv()).unwrap();

    DatasetBuilder::new(config.clone(), ScriptedDetector::confident())
        .unwrap()
        .process()
        .unwrap();
    let second = fs::read(config.output_csv()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_class_contributes_no_rows() {
    let fixture = Fixture::new("empty-class");
    fixture.class_dir("lie");
    fixture.rgb("sit", "a.png");

    let config = fixture.config();
    let mut builder = DatasetBuilder::new(config.clone(), ScriptedDetector::confident()).unwrap();
    let summary = builder.process().unwrap();

    assert_eq!(summary.classes[0].kept, 0);
    assert_eq!(summary.rows, 1);
    assert!(fs::read(config.class_csv_path("lie")).unwrap().is_empty());

    let combined = read_records(config.output_csv(), true);
    assert_eq!(&combined[0][35], "1");
}

#[test]
fn test_missing_images_root_fails() {
    let fixture = Fixture::new("missing-root");
    let config = fixture.config().with_images_root(fixture.dir.join("nope"));

    let result = DatasetBuilder::new(config, ScriptedDetector::confident());
    assert!(matches!(result, Err(DatasetError::Io { .. })));
}
