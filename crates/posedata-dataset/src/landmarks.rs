//! Per-class landmark CSVs and the combined, labeled table.

use crate::DatasetError;
use posedata_infer::{BodyPart, BODY_PART_COUNT};
use std::path::{Path, PathBuf};

/// Fields in a per-class record: filename plus (x, y) per body part.
pub const CLASS_RECORD_LEN: usize = 1 + 2 * BODY_PART_COUNT;

/// One row of the combined dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// `<class_name>/<file_name>`
    pub filename: String,
    /// `[x0, y0, x1, y1, ...]` in `BodyPart` order
    pub coordinates: Vec<f32>,
    pub class_no: usize,
    pub class_name: String,
}

/// Header and rows of the combined CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkTable {
    pub header: Vec<String>,
    pub rows: Vec<DatasetRow>,
}

/// Combined CSV header:
/// `filename, <PART>_x, <PART>_y, ..., class_no, class_name`.
pub fn header() -> Vec<String> {
    let mut columns = Vec::with_capacity(CLASS_RECORD_LEN + 2);
    columns.push("filename".to_string());
    for part in BodyPart::ALL {
        columns.push(format!("{}_x", part.name()));
        columns.push(format!("{}_y", part.name()));
    }
    columns.push("class_no".to_string());
    columns.push("class_name".to_string());
    columns
}

/// Shortest round-trip form that keeps a decimal point (`128.0`) and never
/// switches to exponent notation.
pub fn format_coordinate(value: f32) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

fn writer_for(path: &Path) -> Result<csv::Writer<std::fs::File>, DatasetError> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))
}

/// Headerless writer for one class: `file_name, x0, y0, ...` per kept image.
pub struct ClassCsvWriter {
    path: PathBuf,
    writer: csv::Writer<std::fs::File>,
    rows: usize,
}

impl ClassCsvWriter {
    /// Create or truncate the class CSV.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let path = path.into();
        let writer = writer_for(&path)?;
        Ok(Self {
            path,
            writer,
            rows: 0,
        })
    }

    pub fn write_row(&mut self, file_name: &str, coordinates: &[f32]) -> Result<(), DatasetError> {
        let mut record = Vec::with_capacity(1 + coordinates.len());
        record.push(file_name.to_string());
        record.extend(coordinates.iter().map(|&v| format_coordinate(v)));

        self.writer
            .write_record(&record)
            .map_err(|e| DatasetError::csv(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and close the file, returning the number of rows written.
    pub fn finish(mut self) -> Result<usize, DatasetError> {
        self.writer
            .flush()
            .map_err(|e| DatasetError::io(&self.path, e))?;
        Ok(self.rows)
    }
}

/// Read a headerless per-class CSV into `(file_name, coordinates)` pairs.
pub fn read_class_csv(path: &Path) -> Result<Vec<(String, Vec<f32>)>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DatasetError::csv(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let malformed = |message: String| DatasetError::Malformed {
            path: path.to_path_buf(),
            line,
            message,
        };

        if record.len() != CLASS_RECORD_LEN {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                CLASS_RECORD_LEN,
                record.len()
            )));
        }

        let file_name = record[0].to_string();
        let mut coordinates = Vec::with_capacity(CLASS_RECORD_LEN - 1);
        for (column, field) in record.iter().enumerate().skip(1) {
            let value = field
                .trim()
                .parse::<f32>()
                .map_err(|_| malformed(format!("column {column}: '{field}' is not a number")))?;
            coordinates.push(value);
        }
        records.push((file_name, coordinates));
    }
    Ok(records)
}

/// Merge the per-class CSVs in `per_class_dir` into one labeled table.
///
/// `class_names` must be sorted; a class's position is its `class_no`.
/// Filenames are prefixed with `<class_name>/`.
pub fn all_landmarks(
    per_class_dir: &Path,
    class_names: &[String],
) -> Result<LandmarkTable, DatasetError> {
    let mut rows = Vec::new();
    for (class_no, class_name) in class_names.iter().enumerate() {
        let path = per_class_dir.join(format!("{class_name}.csv"));
        for (file_name, coordinates) in read_class_csv(&path)? {
            rows.push(DatasetRow {
                filename: format!("{class_name}/{file_name}"),
                coordinates,
                class_no,
                class_name: class_name.clone(),
            });
        }
    }

    Ok(LandmarkTable {
        header: header(),
        rows,
    })
}

impl LandmarkTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write header and rows to `path`, replacing any existing file.
    pub fn write_csv(&self, path: &Path) -> Result<(), DatasetError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
        }

        let mut writer = writer_for(path)?;
        writer
            .write_record(&self.header)
            .map_err(|e| DatasetError::csv(path, e))?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(self.header.len());
            record.push(row.filename.clone());
            record.extend(row.coordinates.iter().map(|&v| format_coordinate(v)));
            record.push(row.class_no.to_string());
            record.push(row.class_name.clone());
            writer
                .write_record(&record)
                .map_err(|e| DatasetError::csv(path, e))?;
        }

        writer.flush().map_err(|e| DatasetError::io(path, e))
    }
}
