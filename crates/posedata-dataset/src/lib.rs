//! Build a keypoint dataset from class-labeled pose images.
//!
//! `images_root/<class_name>/<image>` is turned into one headerless CSV per
//! class (`per_class_dir/<class_name>.csv`) and a combined, labeled CSV with
//! a fixed column layout.

pub mod builder;
pub mod config;
pub mod error;
pub mod filter;
pub mod landmarks;
pub mod layout;

pub use builder::{ClassSummary, DatasetBuilder, ProcessSummary, SkipMessage, SkipReason};
pub use config::DatasetConfig;
pub use error::DatasetError;
pub use filter::ConfidenceFilter;
pub use landmarks::{all_landmarks, header, DatasetRow, LandmarkTable};
