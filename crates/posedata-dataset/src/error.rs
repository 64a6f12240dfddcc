use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DatasetError {
    /// Filesystem failure on the images root, a class folder or an output file.
    Io { path: PathBuf, message: String },
    /// CSV encoding or decoding failure.
    Csv { path: PathBuf, message: String },
    /// A per-class CSV record that does not hold a filename and 2K coordinates.
    Malformed {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        DatasetError::Csv {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io { path, message } => {
                write!(f, "io error at {}: {message}", path.display())
            }
            DatasetError::Csv { path, message } => {
                write!(f, "csv error in {}: {message}", path.display())
            }
            DatasetError::Malformed {
                path,
                line,
                message,
            } => write!(f, "malformed record {}:{line}: {message}", path.display()),
        }
    }
}

impl std::error::Error for DatasetError {}
